use crate::blueprints::models::format_timestamp;
use crate::blueprints::{ListOperationsOpts, Operation, Resource, Stack};
use crate::input::Action;
use crate::tlog;

use super::command::{Command, Message};
use super::viewport::LogPane;

/// Rows around the tab content: breadcrumb, tab bar, footer and two spacers.
pub const DETAIL_CHROME: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Resources,
    Operations,
    Logs,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [Self::Resources, Self::Operations, Self::Logs];

    pub fn label(self) -> &'static str {
        match self {
            Self::Resources => "Resources",
            Self::Operations => "Operations",
            Self::Logs => "Logs",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Resources => 0,
            Self::Operations => 1,
            Self::Logs => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub fn resource_row(r: &Resource) -> [String; 3] {
    [r.name.clone(), r.resource_type.clone(), r.id.clone()]
}

pub fn operation_row(op: &Operation) -> [String; 3] {
    [
        op.id.clone(),
        op.status.clone(),
        format_timestamp(&op.created_at),
    ]
}

/// Row cursor over a table whose rows may be replaced at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RowCursor(usize);

impl RowCursor {
    fn apply(&mut self, action: Action, len: usize, page: usize) {
        let last = len.saturating_sub(1);
        self.0 = match action {
            Action::MoveUp => self.0.saturating_sub(1),
            Action::MoveDown => (self.0 + 1).min(last),
            Action::PageUp => self.0.saturating_sub(page.max(1)),
            Action::PageDown => (self.0 + page.max(1)).min(last),
            Action::MoveToTop => 0,
            Action::MoveToBottom => last,
            _ => self.0,
        };
    }

    fn clamp(&mut self, len: usize) {
        self.0 = self.0.min(len.saturating_sub(1));
    }
}

pub struct StackDetail {
    stack: Stack,
    active_tab: DetailTab,
    resources: Vec<Resource>,
    operations: Vec<Operation>,
    resource_cursor: RowCursor,
    operation_cursor: RowCursor,
    log_pane: LogPane,
    loading_resources: bool,
    loading_operations: bool,
    loading_logs: bool,
    error: Option<String>,
}

impl StackDetail {
    pub fn new(stack: Stack, height: u16) -> Self {
        Self {
            stack,
            active_tab: DetailTab::Resources,
            resources: Vec::new(),
            operations: Vec::new(),
            resource_cursor: RowCursor::default(),
            operation_cursor: RowCursor::default(),
            log_pane: LogPane::new(content_height(height)),
            loading_resources: true,
            loading_operations: true,
            loading_logs: true,
            error: None,
        }
    }

    pub fn init(&self) -> Vec<Command> {
        self.fetch_all()
    }

    /// Puts all three tabs back into loading and refetches them. The error
    /// slot is left alone.
    pub fn refresh(&mut self) -> Vec<Command> {
        self.loading_resources = true;
        self.loading_operations = true;
        self.loading_logs = true;
        self.fetch_all()
    }

    fn fetch_all(&self) -> Vec<Command> {
        let stack_id = self.stack.id.clone();
        vec![
            Command::LoadResources {
                stack_id: stack_id.clone(),
            },
            Command::LoadOperations {
                stack_id: stack_id.clone(),
                opts: ListOperationsOpts::default(),
            },
            Command::LoadStackLogs { stack_id },
        ]
    }

    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::ResourcesLoaded(Ok(resources)) => {
                self.loading_resources = false;
                self.resources = resources;
                self.resource_cursor.clamp(self.resources.len());
            }
            Message::OperationsLoaded(Ok(operations)) => {
                self.loading_operations = false;
                self.operations = operations;
                self.operation_cursor.clamp(self.operations.len());
            }
            Message::StackLogsLoaded(Ok(logs)) => {
                self.loading_logs = false;
                self.log_pane.set_logs(&logs);
            }
            Message::ResourcesLoaded(Err(e))
            | Message::OperationsLoaded(Err(e))
            | Message::StackLogsLoaded(Err(e)) => {
                tlog!(error, "stack {}: {}", self.stack.id, e);
                self.error = Some(e.to_string());
                self.loading_resources = false;
                self.loading_operations = false;
                self.loading_logs = false;
            }
            other => tlog!(info, "stack detail ignored {} result", other.label()),
        }
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    /// Movement reaches only the widget of the active tab.
    pub fn handle_action(&mut self, action: Action) {
        if !action.is_movement() {
            return;
        }
        let page = self.log_pane.viewport().height();
        match self.active_tab {
            DetailTab::Resources => {
                self.resource_cursor
                    .apply(action, self.resources.len(), page)
            }
            DetailTab::Operations => {
                self.operation_cursor
                    .apply(action, self.operations.len(), page)
            }
            DetailTab::Logs => {
                let vp = self.log_pane.viewport_mut();
                match action {
                    Action::MoveUp => vp.scroll_up(1),
                    Action::MoveDown => vp.scroll_down(1),
                    Action::PageUp => vp.page_up(),
                    Action::PageDown => vp.page_down(),
                    Action::MoveToTop => vp.goto_top(),
                    Action::MoveToBottom => vp.goto_bottom(),
                    _ => {}
                }
            }
        }
    }

    pub fn resize(&mut self, height: u16) {
        self.log_pane
            .viewport_mut()
            .set_height(content_height(height));
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn active_tab(&self) -> DetailTab {
        self.active_tab
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn resource_cursor(&self) -> usize {
        self.resource_cursor.0
    }

    pub fn operation_cursor(&self) -> usize {
        self.operation_cursor.0
    }

    pub fn log_pane(&self) -> &LogPane {
        &self.log_pane
    }

    pub fn selected_resource(&self) -> Option<&Resource> {
        self.resources.get(self.resource_cursor.0)
    }

    pub fn selected_operation(&self) -> Option<&Operation> {
        self.operations.get(self.operation_cursor.0)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading_resources || self.loading_operations || self.loading_logs
    }

    /// Whether the given tab is still waiting for its first result.
    pub fn tab_loading(&self, tab: DetailTab) -> bool {
        match tab {
            DetailTab::Resources => self.loading_resources,
            DetailTab::Operations => self.loading_operations,
            DetailTab::Logs => self.loading_logs,
        }
    }
}

fn content_height(height: u16) -> usize {
    height.saturating_sub(DETAIL_CHROME) as usize
}
