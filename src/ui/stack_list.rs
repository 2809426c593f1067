use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

use crate::app::stack_list::StackList;
use crate::app::Crumb;
use crate::ui::chrome::{render_breadcrumb, render_error, render_footer, render_loading};
use crate::ui::list_view::render_filter_list;

pub fn render_stack_list(
    f: &mut Frame,
    list: &StackList,
    crumbs: &[Crumb],
    has_picker: bool,
    spinner: &str,
    area: Rect,
) {
    let [crumb_area, _, body_area, footer_area] = stack_list_areas(area);

    render_breadcrumb(f, crumbs, crumb_area);

    if let Some(err) = list.error() {
        render_error(f, err, body_area);
    } else if list.is_loading() {
        render_loading(f, spinner, "stacks", body_area);
    } else {
        render_filter_list(f, list.list(), "Stacks", body_area);
    }

    let keys = if list.is_filtering() {
        "Enter:apply  Esc:cancel"
    } else if has_picker {
        "Enter:open  /:filter  r:refresh  Esc:scopes  ?:help  q:quit"
    } else {
        "Enter:open  /:filter  r:refresh  ?:help  q:quit"
    };
    render_footer(f, keys, footer_area);
}

/// Breadcrumb, spacer, list, footer.
fn stack_list_areas(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area)
}
