mod chrome;
mod help;
mod leaf_detail;
mod list_view;
mod log_pane;
mod scope_picker;
mod stack_detail;
mod stack_list;
mod theme;

use ratatui::Frame;

use crate::app::{App, ViewMode};

use help::render_help;
use leaf_detail::{render_operation_detail, render_resource_detail};
use scope_picker::render_scope_picker;
use stack_detail::render_stack_detail;
use stack_list::render_stack_list;

/// Draws the active view, then the help popup on top when it is open.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let crumbs = app.breadcrumb();
    let spinner = app.spinner();

    match app.view_mode() {
        ViewMode::ScopePicker => {
            if let Some(picker) = app.scope_picker() {
                render_scope_picker(f, picker, spinner, area);
            }
        }
        ViewMode::StackList => {
            if let Some(list) = app.stack_list() {
                let has_picker = app.scope_picker().is_some();
                render_stack_list(f, list, &crumbs, has_picker, spinner, area);
            }
        }
        ViewMode::StackDetail => {
            if let Some(detail) = app.stack_detail() {
                render_stack_detail(f, detail, &crumbs, spinner, area);
            }
        }
        ViewMode::ResourceDetail => {
            if let Some(detail) = app.resource_detail() {
                render_resource_detail(f, detail, &crumbs, area);
            }
        }
        ViewMode::OperationDetail => {
            if let Some(detail) = app.operation_detail() {
                render_operation_detail(f, detail, &crumbs, spinner, area);
            }
        }
    }

    if app.show_help() {
        render_help(f, area);
    }
}
