use crate::blueprints::Stack;
use crate::input::Action;
use crate::tlog;

use super::command::{Command, Message};
use super::filter_list::{FilterList, ListItem};

/// Breadcrumb, spacer, list title, filter bar and footer.
pub const STACK_LIST_CHROME: u16 = 5;

impl ListItem for Stack {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        format!("{}  •  {}", self.id, self.blueprint_id)
    }

    fn filter_value(&self) -> &str {
        &self.name
    }
}

pub struct StackList {
    list: FilterList<Stack>,
    loading: bool,
    error: Option<String>,
    height: u16,
}

impl StackList {
    pub fn new(height: u16) -> Self {
        Self {
            list: FilterList::default(),
            loading: true,
            error: None,
            height,
        }
    }

    pub fn init(&self) -> Vec<Command> {
        vec![Command::LoadStacks]
    }

    /// Re-enters loading and fetches again. A previous error stays visible
    /// until something newer replaces it.
    pub fn refresh(&mut self) -> Vec<Command> {
        self.loading = true;
        vec![Command::LoadStacks]
    }

    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::StacksLoaded(Ok(stacks)) => {
                self.loading = false;
                tlog!(info, "loaded {} stacks", stacks.len());
                self.list.set_items(stacks);
            }
            Message::StacksLoaded(Err(e)) => {
                self.loading = false;
                self.error = Some(e.to_string());
            }
            other => tlog!(info, "stack list ignored {} result", other.label()),
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        if self.loading {
            return;
        }
        let page = self.page_size();
        match action {
            Action::MoveUp => self.list.move_up(),
            Action::MoveDown => self.list.move_down(),
            Action::PageUp => self.list.page_up(page),
            Action::PageDown => self.list.page_down(page),
            Action::MoveToTop => self.list.move_to_top(),
            Action::MoveToBottom => self.list.move_to_bottom(),
            Action::StartFilter => self.list.start_filter(),
            Action::FilterInput(c) => self.list.push_char(c),
            Action::FilterBackspace => self.list.pop_char(),
            Action::FilterSubmit => self.list.accept_filter(),
            Action::FilterCancel | Action::Back => self.list.clear_filter(),
            _ => {}
        }
    }

    pub fn resize(&mut self, height: u16) {
        self.height = height;
    }

    fn page_size(&self) -> usize {
        (self.height.saturating_sub(STACK_LIST_CHROME) / 2) as usize
    }

    pub fn selected_stack(&self) -> Option<&Stack> {
        self.list.selected_item()
    }

    pub fn is_filtering(&self) -> bool {
        self.list.is_filtering()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn list(&self) -> &FilterList<Stack> {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command::testing::stack;
    use crate::blueprints::ApiError;

    fn loaded(stacks: Vec<Stack>) -> StackList {
        let mut list = StackList::new(24);
        list.update(Message::StacksLoaded(Ok(stacks)));
        list
    }

    #[test]
    fn test_stack_row_text() {
        let s = stack("S1", "production");
        assert_eq!(s.title(), "production");
        assert_eq!(s.description(), "S1  •  bp1");
    }

    #[test]
    fn test_refresh_issues_one_fetch() {
        let mut list = loaded(vec![stack("S1", "prod")]);
        assert!(!list.is_loading());
        assert_eq!(list.refresh(), vec![Command::LoadStacks]);
        assert!(list.is_loading());
    }

    #[test]
    fn test_error_survives_later_success() {
        let mut list = StackList::new(24);
        list.update(Message::StacksLoaded(Err(ApiError::Status {
            status: 500,
            message: "boom".into(),
        })));
        list.update(Message::StacksLoaded(Ok(vec![stack("S1", "prod")])));
        assert_eq!(list.error(), Some("API error 500: boom"));

        list.update(Message::StacksLoaded(Err(ApiError::Transport("offline".into()))));
        assert_eq!(list.error(), Some("request failed: offline"));
    }

    #[test]
    fn test_filter_by_name_and_select() {
        let mut list = loaded(vec![stack("S1", "production"), stack("S2", "staging")]);
        list.handle_action(Action::StartFilter);
        list.handle_action(Action::FilterInput('s'));
        list.handle_action(Action::FilterInput('t'));
        list.handle_action(Action::FilterSubmit);
        assert!(!list.is_filtering());
        assert_eq!(list.selected_stack().map(|s| s.id.as_str()), Some("S2"));

        list.handle_action(Action::Back);
        assert_eq!(list.list().visible_items().len(), 2);
    }

    #[test]
    fn test_other_results_are_ignored() {
        let mut list = loaded(vec![stack("S1", "prod")]);
        list.update(Message::ResourcesLoaded(Ok(Vec::new())));
        assert_eq!(list.list().items().len(), 1);
    }
}
