pub mod command;
pub mod filter_list;
pub mod operation_detail;
pub mod resource_detail;
pub mod scope_picker;
pub mod stack_detail;
pub mod stack_list;
pub mod viewport;

use std::sync::Arc;

use crate::blueprints::{BlueprintsApi, Operation, Resource, Scope, Stack};
use crate::input::Action;
use crate::tlog;

pub use command::{Command, Dispatcher, Message};
use operation_detail::OperationDetail;
use resource_detail::ResourceDetail;
use scope_picker::ScopePicker;
use stack_detail::{DetailTab, StackDetail};
use stack_list::StackList;

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    ScopePicker,
    StackList,
    StackDetail,
    ResourceDetail,
    OperationDetail,
}

#[derive(Debug, Clone)]
enum Transition {
    SelectScope(Scope),
    OpenStack(Stack),
    OpenResource(Resource),
    OpenOperation(Operation),
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrumbDetail {
    Id(String),
    Status(String),
}

/// One breadcrumb segment. `current` marks segments naming what is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub detail: Option<CrumbDetail>,
    pub current: bool,
}

impl Crumb {
    fn new(label: impl Into<String>, current: bool) -> Self {
        Self {
            label: label.into(),
            detail: None,
            current,
        }
    }

    fn with_detail(mut self, detail: CrumbDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn text(&self) -> String {
        match &self.detail {
            Some(CrumbDetail::Id(s)) | Some(CrumbDetail::Status(s)) => {
                format!("{} {}", self.label, s)
            }
            None => self.label.clone(),
        }
    }
}

/// Root of the view hierarchy. Children further down the chain than the
/// active view are always `None`; parents above it are kept for back.
pub struct App {
    api: Arc<dyn BlueprintsApi>,
    view: ViewMode,
    scope: Option<Scope>,
    scope_picker: Option<ScopePicker>,
    stack_list: Option<StackList>,
    stack_detail: Option<StackDetail>,
    resource_detail: Option<ResourceDetail>,
    operation_detail: Option<OperationDetail>,
    show_help: bool,
    width: u16,
    height: u16,
    spinner_frame: usize,
    should_quit: bool,
}

impl App {
    /// With a pre-supplied scope the picker is skipped entirely; the API
    /// client is expected to carry that scope already.
    pub fn new(api: Arc<dyn BlueprintsApi>, scope: Option<Scope>, width: u16, height: u16) -> Self {
        let (view, scope_picker, stack_list) = match scope {
            Some(_) => (ViewMode::StackList, None, Some(StackList::new(height))),
            None => (ViewMode::ScopePicker, Some(ScopePicker::new(height)), None),
        };
        Self {
            api,
            view,
            scope,
            scope_picker,
            stack_list,
            stack_detail: None,
            resource_detail: None,
            operation_detail: None,
            show_help: false,
            width,
            height,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Commands for the first view's initial fetch.
    pub fn init(&self) -> Vec<Command> {
        match (&self.scope_picker, &self.stack_list) {
            (_, Some(list)) => list.init(),
            (Some(picker), None) => picker.init(),
            (None, None) => Vec::new(),
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Vec<Command> {
        if action == Action::ForceQuit {
            self.quit();
            return Vec::new();
        }

        if !self.is_filtering() {
            match action {
                Action::Quit => {
                    self.quit();
                    return Vec::new();
                }
                Action::ToggleHelp => {
                    self.show_help = !self.show_help;
                    return Vec::new();
                }
                _ => {}
            }
        }

        if let Some(transition) = self.transition_for(action) {
            let commands = self.navigate(transition);
            tlog!(info, "at {:?}: {}", self.view, self.breadcrumb_text());
            return commands;
        }

        match action {
            Action::Refresh => self.refresh(),
            Action::NextTab | Action::PrevTab => {
                if let Some(detail) = self.stack_detail.as_mut() {
                    if self.view == ViewMode::StackDetail {
                        if action == Action::NextTab {
                            detail.next_tab();
                        } else {
                            detail.prev_tab();
                        }
                    }
                }
                Vec::new()
            }
            _ => {
                self.forward_action(action);
                Vec::new()
            }
        }
    }

    fn transition_for(&self, action: Action) -> Option<Transition> {
        match (self.view, action) {
            (ViewMode::ScopePicker, Action::Select) => self
                .scope_picker
                .as_ref()
                .and_then(ScopePicker::selected_scope)
                .map(Transition::SelectScope),
            (ViewMode::StackList, Action::Back) if self.scope_picker.is_some() => {
                Some(Transition::Back)
            }
            (ViewMode::StackList, Action::Select) => self
                .stack_list
                .as_ref()
                .and_then(StackList::selected_stack)
                .cloned()
                .map(Transition::OpenStack),
            (ViewMode::StackDetail, Action::Select) => {
                let detail = self.stack_detail.as_ref()?;
                match detail.active_tab() {
                    DetailTab::Resources => detail
                        .selected_resource()
                        .cloned()
                        .map(Transition::OpenResource),
                    DetailTab::Operations => detail
                        .selected_operation()
                        .cloned()
                        .map(Transition::OpenOperation),
                    DetailTab::Logs => None,
                }
            }
            (
                ViewMode::StackDetail | ViewMode::ResourceDetail | ViewMode::OperationDetail,
                Action::Back,
            ) => Some(Transition::Back),
            _ => None,
        }
    }

    /// Forward transitions build a fresh child and return its fetches. Back
    /// drops the child and shows the kept parent as it was left.
    fn navigate(&mut self, transition: Transition) -> Vec<Command> {
        tlog!(info, "navigate {:?} from {:?}", transition, self.view);
        match (self.view, transition) {
            (ViewMode::ScopePicker, Transition::SelectScope(scope)) => {
                self.api.set_scope(&scope);
                self.scope = Some(scope);
                let list = StackList::new(self.height);
                let commands = list.init();
                self.stack_list = Some(list);
                self.view = ViewMode::StackList;
                commands
            }
            (ViewMode::StackList, Transition::OpenStack(stack)) => {
                let detail = StackDetail::new(stack, self.height);
                let commands = detail.init();
                self.stack_detail = Some(detail);
                self.view = ViewMode::StackDetail;
                commands
            }
            (ViewMode::StackDetail, Transition::OpenResource(resource)) => {
                self.resource_detail = Some(ResourceDetail::new(resource, self.height));
                self.view = ViewMode::ResourceDetail;
                Vec::new()
            }
            (ViewMode::StackDetail, Transition::OpenOperation(operation)) => {
                let stack_id = self
                    .stack_detail
                    .as_ref()
                    .map(|d| d.stack().id.clone())
                    .unwrap_or_default();
                let detail = OperationDetail::new(stack_id, operation, self.height);
                let commands = detail.init();
                self.operation_detail = Some(detail);
                self.view = ViewMode::OperationDetail;
                commands
            }
            (_, Transition::Back) => {
                self.back();
                Vec::new()
            }
            (view, transition) => {
                tlog!(warn, "no transition {:?} from {:?}", transition, view);
                Vec::new()
            }
        }
    }

    fn back(&mut self) {
        self.view = match self.view {
            ViewMode::StackList if self.scope_picker.is_some() => {
                self.stack_list = None;
                ViewMode::ScopePicker
            }
            ViewMode::StackDetail => {
                self.stack_detail = None;
                ViewMode::StackList
            }
            ViewMode::ResourceDetail => {
                self.resource_detail = None;
                ViewMode::StackDetail
            }
            ViewMode::OperationDetail => {
                self.operation_detail = None;
                ViewMode::StackDetail
            }
            other => other,
        };
        self.resize(self.width, self.height);
    }

    fn refresh(&mut self) -> Vec<Command> {
        match self.view {
            ViewMode::StackList => self
                .stack_list
                .as_mut()
                .map(StackList::refresh)
                .unwrap_or_default(),
            ViewMode::StackDetail => self
                .stack_detail
                .as_mut()
                .map(StackDetail::refresh)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn forward_action(&mut self, action: Action) {
        match self.view {
            ViewMode::ScopePicker => {
                if let Some(picker) = self.scope_picker.as_mut() {
                    picker.handle_action(action);
                }
            }
            ViewMode::StackList => {
                if let Some(list) = self.stack_list.as_mut() {
                    list.handle_action(action);
                }
            }
            ViewMode::StackDetail => {
                if let Some(detail) = self.stack_detail.as_mut() {
                    detail.handle_action(action);
                }
            }
            ViewMode::ResourceDetail => {
                if let Some(detail) = self.resource_detail.as_mut() {
                    detail.handle_action(action);
                }
            }
            ViewMode::OperationDetail => {
                if let Some(detail) = self.operation_detail.as_mut() {
                    detail.handle_action(action);
                }
            }
        }
    }

    /// Results go to the active view only.
    pub fn handle_message(&mut self, msg: Message) {
        if msg.is_err() {
            tlog!(warn, "{} request failed", msg.label());
        }
        match self.view {
            ViewMode::ScopePicker => {
                if let Some(picker) = self.scope_picker.as_mut() {
                    picker.update(msg);
                }
            }
            ViewMode::StackList => {
                if let Some(list) = self.stack_list.as_mut() {
                    list.update(msg);
                }
            }
            ViewMode::StackDetail => {
                if let Some(detail) = self.stack_detail.as_mut() {
                    detail.update(msg);
                }
            }
            ViewMode::OperationDetail => {
                if let Some(detail) = self.operation_detail.as_mut() {
                    detail.update(msg);
                }
            }
            ViewMode::ResourceDetail => {
                tlog!(info, "resource detail dropped {} result", msg.label());
            }
        }
    }

    /// Stores the window size and passes it to the active view.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        match self.view {
            ViewMode::ScopePicker => {
                if let Some(picker) = self.scope_picker.as_mut() {
                    picker.resize(height);
                }
            }
            ViewMode::StackList => {
                if let Some(list) = self.stack_list.as_mut() {
                    list.resize(height);
                }
            }
            ViewMode::StackDetail => {
                if let Some(detail) = self.stack_detail.as_mut() {
                    detail.resize(height);
                }
            }
            ViewMode::ResourceDetail => {
                if let Some(detail) = self.resource_detail.as_mut() {
                    detail.resize(height);
                }
            }
            ViewMode::OperationDetail => {
                if let Some(detail) = self.operation_detail.as_mut() {
                    detail.resize(height);
                }
            }
        }
    }

    /// Advances the spinner while the active view waits on a fetch.
    pub fn tick(&mut self) -> bool {
        if self.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            true
        } else {
            false
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn is_loading(&self) -> bool {
        match self.view {
            ViewMode::ScopePicker => self
                .scope_picker
                .as_ref()
                .is_some_and(ScopePicker::is_loading),
            ViewMode::StackList => self.stack_list.as_ref().is_some_and(StackList::is_loading),
            ViewMode::StackDetail => self
                .stack_detail
                .as_ref()
                .is_some_and(StackDetail::is_loading),
            ViewMode::ResourceDetail => false,
            ViewMode::OperationDetail => self
                .operation_detail
                .as_ref()
                .is_some_and(OperationDetail::is_loading),
        }
    }

    /// True while the active list is editing its filter query.
    pub fn is_filtering(&self) -> bool {
        match self.view {
            ViewMode::ScopePicker => self
                .scope_picker
                .as_ref()
                .is_some_and(ScopePicker::is_filtering),
            ViewMode::StackList => self
                .stack_list
                .as_ref()
                .is_some_and(StackList::is_filtering),
            _ => false,
        }
    }

    /// Path from the scope down to the active view. Empty on the picker.
    pub fn breadcrumb(&self) -> Vec<Crumb> {
        let Some(scope) = &self.scope else {
            return Vec::new();
        };
        if self.view == ViewMode::ScopePicker {
            return Vec::new();
        }

        let mut crumbs = vec![
            Crumb::new(scope.label.clone(), true),
            Crumb::new("Stacks", self.view == ViewMode::StackList),
        ];
        let Some(detail) = &self.stack_detail else {
            return crumbs;
        };
        let stack = detail.stack();
        match self.view {
            ViewMode::StackDetail => {
                crumbs.push(
                    Crumb::new(stack.name.clone(), true)
                        .with_detail(CrumbDetail::Id(stack.id.clone())),
                );
            }
            ViewMode::ResourceDetail => {
                crumbs.push(Crumb::new(stack.name.clone(), false));
                if let Some(r) = &self.resource_detail {
                    let resource = r.resource();
                    crumbs.push(
                        Crumb::new(resource.name.clone(), true)
                            .with_detail(CrumbDetail::Id(resource.id.clone())),
                    );
                }
            }
            ViewMode::OperationDetail => {
                crumbs.push(Crumb::new(stack.name.clone(), false));
                if let Some(o) = &self.operation_detail {
                    let op = o.operation();
                    crumbs.push(
                        Crumb::new(op.id.clone(), true)
                            .with_detail(CrumbDetail::Status(op.status.clone())),
                    );
                }
            }
            _ => {}
        }
        crumbs
    }

    pub fn breadcrumb_text(&self) -> String {
        self.breadcrumb()
            .iter()
            .map(Crumb::text)
            .collect::<Vec<_>>()
            .join(" › ")
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn scope_picker(&self) -> Option<&ScopePicker> {
        self.scope_picker.as_ref()
    }

    pub fn stack_list(&self) -> Option<&StackList> {
        self.stack_list.as_ref()
    }

    pub fn stack_detail(&self) -> Option<&StackDetail> {
        self.stack_detail.as_ref()
    }

    pub fn resource_detail(&self) -> Option<&ResourceDetail> {
        self.resource_detail.as_ref()
    }

    pub fn operation_detail(&self) -> Option<&OperationDetail> {
        self.operation_detail.as_ref()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::command::testing::*;
    use super::*;
    use crate::blueprints::models::ScopeKind;

    fn fixture() -> Arc<FakeApi> {
        let mut resources = HashMap::new();
        resources.insert(
            "S1".to_string(),
            vec![resource("r1", "db", "aws:rds"), resource("r2", "cache", "aws:redis")],
        );
        let mut operations = HashMap::new();
        operations.insert(
            "S1".to_string(),
            vec![operation("op1", "COMPLETED"), operation("op2", "FAILED")],
        );
        Arc::new(FakeApi {
            organizations: vec![org("o1", "Acme")],
            projects: vec![project("p1", "Proj", "o1")],
            stacks: vec![stack("S1", "prod"), stack("S2", "staging")],
            resources,
            operations,
            logs: vec![log("deployed", "INFO", ts(9, 0))],
            ..FakeApi::default()
        })
    }

    /// Runs commands inline and feeds each result back, like the event loop
    /// does once the background task finishes.
    fn settle(app: &mut App, api: &FakeApi, commands: Vec<Command>) {
        for command in commands {
            let msg = command.run(api);
            app.handle_message(msg);
        }
    }

    fn press(app: &mut App, api: &FakeApi, action: Action) -> usize {
        let commands = app.handle_action(action);
        let count = commands.len();
        settle(app, api, commands);
        count
    }

    fn start(api: &Arc<FakeApi>, scope: Option<Scope>) -> App {
        let dyn_api: Arc<dyn BlueprintsApi> = api.clone();
        let mut app = App::new(dyn_api, scope, 100, 30);
        let commands = app.init();
        settle(&mut app, api, commands);
        app
    }

    #[test]
    fn test_picker_selection_sets_scope_once_and_loads_stacks() {
        let api = fixture();
        let mut app = start(&api, None);
        assert_eq!(app.view_mode(), ViewMode::ScopePicker);

        assert_eq!(press(&mut app, &api, Action::Select), 1);
        assert_eq!(app.view_mode(), ViewMode::StackList);
        let scope = api.scope().unwrap();
        assert_eq!(scope.kind, ScopeKind::Organization);
        assert_eq!(scope.id, "o1");
        assert_eq!(app.breadcrumb_text(), "Acme › Stacks");
        assert_eq!(
            api.calls(),
            vec!["organizations", "projects", "stacks"]
        );
    }

    #[test]
    fn test_presupplied_scope_skips_picker() {
        let api = fixture();
        let mut app = start(&api, Some(Scope::project("p1", "p1")));
        assert_eq!(app.view_mode(), ViewMode::StackList);
        assert!(app.scope_picker().is_none());
        assert_eq!(api.calls(), vec!["stacks"]);
        assert!(api.scope().is_none());

        // Nowhere to go back to: esc stays on the list.
        press(&mut app, &api, Action::Back);
        assert_eq!(app.view_mode(), ViewMode::StackList);
        assert_eq!(app.breadcrumb_text(), "p1 › Stacks");
    }

    #[test]
    fn test_stack_detail_end_to_end() {
        let api = fixture();
        let mut app = start(&api, Some(Scope::organization("o1", "o1")));
        assert_eq!(press(&mut app, &api, Action::Select), 3);

        let detail = app.stack_detail().unwrap();
        assert!(!detail.is_loading());
        assert_eq!(app.breadcrumb_text(), "o1 › Stacks › prod S1");

        press(&mut app, &api, Action::Select);
        assert_eq!(app.view_mode(), ViewMode::ResourceDetail);
        assert_eq!(app.breadcrumb_text(), "o1 › Stacks › prod › db r1");
    }

    #[test]
    fn test_back_reuses_parent_without_refetch() {
        let api = fixture();
        let mut app = start(&api, Some(Scope::organization("o1", "o1")));
        press(&mut app, &api, Action::MoveDown);
        press(&mut app, &api, Action::Select);
        assert_eq!(app.stack_detail().unwrap().stack().id, "S2");
        let calls_before = api.calls().len();

        assert_eq!(press(&mut app, &api, Action::Back), 0);
        assert_eq!(app.view_mode(), ViewMode::StackList);
        assert!(app.stack_detail().is_none());
        assert_eq!(api.calls().len(), calls_before);
        let list = app.stack_list().unwrap();
        assert_eq!(list.selected_stack().map(|s| s.id.as_str()), Some("S2"));
    }

    #[test]
    fn test_operation_detail_fetches_once_and_back_keeps_tab() {
        let api = fixture();
        let mut app = start(&api, Some(Scope::organization("o1", "o1")));
        press(&mut app, &api, Action::Select);
        press(&mut app, &api, Action::NextTab);
        press(&mut app, &api, Action::MoveDown);

        assert_eq!(press(&mut app, &api, Action::Select), 1);
        assert_eq!(app.view_mode(), ViewMode::OperationDetail);
        assert_eq!(app.operation_detail().unwrap().stack_id(), "S1");
        assert_eq!(app.breadcrumb_text(), "o1 › Stacks › prod › op2 FAILED");
        let calls_before = api.calls();

        assert_eq!(press(&mut app, &api, Action::Back), 0);
        assert_eq!(api.calls(), calls_before);
        let detail = app.stack_detail().unwrap();
        assert_eq!(detail.active_tab(), DetailTab::Operations);
        assert_eq!(detail.operation_cursor(), 1);
    }

    #[test]
    fn test_back_from_resource_detail_keeps_stack_detail() {
        let api = fixture();
        let mut app = start(&api, Some(Scope::organization("o1", "o1")));
        press(&mut app, &api, Action::Select);
        press(&mut app, &api, Action::MoveDown);

        assert_eq!(press(&mut app, &api, Action::Select), 0);
        assert_eq!(app.view_mode(), ViewMode::ResourceDetail);
        assert_eq!(app.resource_detail().unwrap().resource().id, "r2");
        let calls_before = api.calls();

        assert_eq!(press(&mut app, &api, Action::Back), 0);
        assert_eq!(app.view_mode(), ViewMode::StackDetail);
        assert!(app.resource_detail().is_none());
        assert_eq!(api.calls(), calls_before);

        let detail = app.stack_detail().unwrap();
        assert!(!detail.is_loading());
        assert_eq!(detail.resources().len(), 2);
        assert_eq!(detail.resource_cursor(), 1);
        assert_eq!(detail.active_tab(), DetailTab::Resources);
    }

    #[test]
    fn test_logs_tab_has_no_select() {
        let api = fixture();
        let mut app = start(&api, Some(Scope::organization("o1", "o1")));
        press(&mut app, &api, Action::Select);
        press(&mut app, &api, Action::PrevTab);
        assert_eq!(press(&mut app, &api, Action::Select), 0);
        assert_eq!(app.view_mode(), ViewMode::StackDetail);
    }

    #[test]
    fn test_refresh_in_stack_detail_issues_three_commands() {
        let api = fixture();
        let mut app = start(&api, Some(Scope::organization("o1", "o1")));
        press(&mut app, &api, Action::Select);
        let commands = app.handle_action(Action::Refresh);
        assert_eq!(commands.len(), 3);
        assert!(app.is_loading());
    }

    #[test]
    fn test_results_for_inactive_view_are_dropped() {
        let api = fixture();
        let dyn_api: Arc<dyn BlueprintsApi> = api.clone();
        let mut app = App::new(dyn_api, Some(Scope::organization("o1", "o1")), 100, 30);
        app.handle_message(Message::StacksLoaded(Ok(vec![stack("S1", "prod")])));
        app.handle_action(Action::Select);
        assert_eq!(app.view_mode(), ViewMode::StackDetail);

        // A late stacks result must not reach the list behind the detail.
        app.handle_message(Message::StacksLoaded(Ok(Vec::new())));
        app.handle_action(Action::Back);
        assert_eq!(app.stack_list().unwrap().list().items().len(), 1);
    }

    #[test]
    fn test_quit_and_help_are_suppressed_while_filtering() {
        let api = fixture();
        let mut app = start(&api, None);
        press(&mut app, &api, Action::StartFilter);
        assert!(app.is_filtering());

        press(&mut app, &api, Action::Quit);
        press(&mut app, &api, Action::ToggleHelp);
        assert!(!app.should_quit());
        assert!(!app.show_help());

        press(&mut app, &api, Action::ForceQuit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_help_overlay_lets_navigation_through() {
        let api = fixture();
        let mut app = start(&api, None);
        press(&mut app, &api, Action::ToggleHelp);
        assert!(app.show_help());

        assert_eq!(press(&mut app, &api, Action::Select), 1);
        assert_eq!(app.view_mode(), ViewMode::StackList);
        press(&mut app, &api, Action::Back);
        assert_eq!(app.view_mode(), ViewMode::ScopePicker);
        assert!(app.show_help());

        press(&mut app, &api, Action::ToggleHelp);
        assert!(!app.show_help());
    }

    #[test]
    fn test_back_to_picker_resizes_it() {
        let api = fixture();
        let mut app = start(&api, None);
        press(&mut app, &api, Action::Select);
        app.resize(120, 40);
        press(&mut app, &api, Action::Back);
        assert_eq!(app.view_mode(), ViewMode::ScopePicker);
        assert!(app.stack_list().is_none());
        assert!(app.breadcrumb().is_empty());
    }

    #[test]
    fn test_spinner_advances_only_while_loading() {
        let api = fixture();
        let dyn_api: Arc<dyn BlueprintsApi> = api.clone();
        let mut app = App::new(dyn_api, None, 80, 24);
        let first = app.spinner();
        assert!(app.tick());
        assert_ne!(app.spinner(), first);

        let commands = app.init();
        settle(&mut app, &api, commands);
        assert!(!app.tick());
    }
}
