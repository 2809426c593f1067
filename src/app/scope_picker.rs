use std::collections::HashMap;

use crate::blueprints::{Organization, Project, Scope};
use crate::input::Action;
use crate::tlog;

use super::command::{Command, Message, ScopeCatalog};
use super::filter_list::{FilterList, ListItem};

pub const PROJECT_SCOPE_NOTICE: &str =
    "Project scope is being phased out. Consider selecting the organization instead.";

/// List title, filter bar, notice and footer.
pub const SCOPE_PICKER_CHROME: u16 = 4;

/// A row of the picker: an organization, or one of its projects nested
/// directly underneath it.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeRow {
    Organization {
        org: Organization,
        project_count: usize,
    },
    Project(Project),
}

impl ScopeRow {
    pub fn scope(&self) -> Scope {
        match self {
            Self::Organization { org, .. } => Scope::organization(org.id.clone(), org.name.clone()),
            Self::Project(p) => Scope::project(p.id.clone(), p.display_name.clone()),
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project(_))
    }
}

impl ListItem for ScopeRow {
    fn title(&self) -> String {
        match self {
            Self::Organization { org, .. } => org.name.clone(),
            Self::Project(p) => format!("  ↳ {}", p.display_name),
        }
    }

    fn description(&self) -> String {
        match self {
            Self::Organization { org, project_count } => {
                format!("Organization  •  {}  •  {} projects", org.id, project_count)
            }
            Self::Project(p) => format!("    Project  •  {}", p.id),
        }
    }

    fn filter_value(&self) -> &str {
        match self {
            Self::Organization { org, .. } => &org.name,
            Self::Project(p) => &p.display_name,
        }
    }
}

/// Flattens organizations and projects into picker order: organizations by
/// name, each followed by its own projects by display name. Projects whose
/// organization is unknown are left out.
pub fn build_scope_rows(mut orgs: Vec<Organization>, projects: Vec<Project>) -> Vec<ScopeRow> {
    let mut by_org: HashMap<String, Vec<Project>> = HashMap::new();
    for project in projects {
        if let Some(org_id) = project.organization_id.clone() {
            by_org.entry(org_id).or_default().push(project);
        }
    }

    orgs.sort_by(|a, b| a.name.cmp(&b.name));

    let mut rows = Vec::new();
    for org in orgs {
        let mut org_projects = by_org.remove(&org.id).unwrap_or_default();
        org_projects.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        rows.push(ScopeRow::Organization {
            project_count: org_projects.len(),
            org,
        });
        rows.extend(org_projects.into_iter().map(ScopeRow::Project));
    }

    let orphaned: usize = by_org.values().map(Vec::len).sum();
    if orphaned > 0 {
        tlog!(warn, "dropped {} projects without a known organization", orphaned);
    }
    rows
}

pub struct ScopePicker {
    list: FilterList<ScopeRow>,
    loading: bool,
    error: Option<String>,
    height: u16,
}

impl ScopePicker {
    pub fn new(height: u16) -> Self {
        Self {
            list: FilterList::default(),
            loading: true,
            error: None,
            height,
        }
    }

    pub fn init(&self) -> Vec<Command> {
        vec![Command::LoadScopes]
    }

    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::ScopesLoaded(Ok(ScopeCatalog {
                organizations,
                projects,
            })) => {
                self.loading = false;
                self.list
                    .set_items(build_scope_rows(organizations, projects));
            }
            Message::ScopesLoaded(Err(e)) => {
                self.loading = false;
                self.error = Some(e.to_string());
            }
            other => tlog!(info, "scope picker ignored {} result", other.label()),
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        if self.loading || self.error.is_some() {
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

    // Two-line rows.
    fn page_size(&self) -> usize {
        (self.height.saturating_sub(SCOPE_PICKER_CHROME) / 2) as usize
    }

    pub fn selected_scope(&self) -> Option<Scope> {
        self.list.selected_item().map(ScopeRow::scope)
    }

    /// True while a project row is highlighted.
    pub fn shows_project_notice(&self) -> bool {
        self.list
            .selected_item()
            .map(ScopeRow::is_project)
            .unwrap_or(false)
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

    pub fn list(&self) -> &FilterList<ScopeRow> {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command::testing::{org, project};
    use crate::blueprints::models::ScopeKind;
    use crate::blueprints::ApiError;

    fn titles(rows: &[ScopeRow]) -> Vec<String> {
        rows.iter().map(ListItem::title).collect()
    }

    fn loaded(orgs: Vec<Organization>, projects: Vec<Project>) -> ScopePicker {
        let mut picker = ScopePicker::new(24);
        picker.update(Message::ScopesLoaded(Ok(ScopeCatalog {
            organizations: orgs,
            projects,
        })));
        picker
    }

    #[test]
    fn test_projects_nest_under_their_organization() {
        let rows = build_scope_rows(
            vec![org("o2", "Zeta"), org("o1", "Acme")],
            vec![
                project("p3", "Website", "o1"),
                project("p1", "Api", "o2"),
                project("p2", "Blog", "o1"),
                project("p9", "Lost", "o404"),
            ],
        );
        assert_eq!(
            titles(&rows),
            vec!["Acme", "  ↳ Blog", "  ↳ Website", "Zeta", "  ↳ Api"]
        );
    }

    #[test]
    fn test_project_without_organization_is_dropped() {
        let mut orphan = project("p1", "Orphan", "o1");
        orphan.organization_id = None;
        let rows = build_scope_rows(vec![org("o1", "Acme")], vec![orphan]);
        assert_eq!(titles(&rows), vec!["Acme"]);
    }

    #[test]
    fn test_organization_description_counts_projects() {
        let rows = build_scope_rows(
            vec![org("o1", "Acme")],
            vec![project("p1", "A", "o1"), project("p2", "B", "o1")],
        );
        assert_eq!(rows[0].description(), "Organization  •  o1  •  2 projects");
        assert_eq!(rows[1].description(), "    Project  •  p1");
    }

    #[test]
    fn test_select_first_row_yields_organization_scope() {
        let picker = loaded(
            vec![org("o1", "Acme")],
            vec![project("p1", "Proj", "o1")],
        );
        let rows: Vec<String> = picker.list().visible_items().iter().map(|r| r.title()).collect();
        assert_eq!(rows, vec!["Acme", "  ↳ Proj"]);
        assert_eq!(
            picker.selected_scope(),
            Some(Scope::organization("o1", "Acme"))
        );
        assert!(!picker.shows_project_notice());
    }

    #[test]
    fn test_project_row_shows_notice_and_yields_project_scope() {
        let mut picker = loaded(
            vec![org("o1", "Acme")],
            vec![project("p1", "Proj", "o1")],
        );
        picker.handle_action(Action::MoveDown);
        let scope = picker.selected_scope().unwrap();
        assert_eq!(scope.kind, ScopeKind::Project);
        assert_eq!(scope.label, "Proj");
        assert!(picker.shows_project_notice());
    }

    #[test]
    fn test_error_is_sticky() {
        let mut picker = ScopePicker::new(24);
        picker.update(Message::ScopesLoaded(Err(ApiError::Transport("offline".into()))));
        assert!(!picker.is_loading());
        assert_eq!(picker.error(), Some("request failed: offline"));
        picker.handle_action(Action::MoveDown);
        assert!(picker.selected_scope().is_none());
    }

    #[test]
    fn test_filter_narrows_rows() {
        let mut picker = loaded(
            vec![org("o1", "Acme"), org("o2", "Globex")],
            vec![project("p1", "Storefront", "o2")],
        );
        picker.handle_action(Action::StartFilter);
        for c in "store".chars() {
            picker.handle_action(Action::FilterInput(c));
        }
        assert!(picker.is_filtering());
        assert_eq!(
            picker.selected_scope(),
            Some(Scope::project("p1", "Storefront"))
        );
    }
}
