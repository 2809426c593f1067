use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::scope_picker::{ScopePicker, PROJECT_SCOPE_NOTICE};
use crate::ui::chrome::{render_error, render_footer, render_loading};
use crate::ui::list_view::render_filter_list;
use crate::ui::theme::Theme;

pub fn render_scope_picker(f: &mut Frame, picker: &ScopePicker, spinner: &str, area: Rect) {
    if let Some(err) = picker.error() {
        render_error(f, err, area);
        return;
    }
    if picker.is_loading() {
        render_loading(f, spinner, "organizations and projects", area);
        return;
    }

    let [list_area, notice_area, footer_area] = picker_areas(area);

    render_filter_list(f, picker.list(), "Select a scope", list_area);

    if picker.shows_project_notice() {
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {}", PROJECT_SCOPE_NOTICE), Theme::notice())),
            notice_area,
        );
    }

    let keys = if picker.is_filtering() {
        "Enter:apply  Esc:cancel"
    } else {
        "Enter:select  /:filter  j/k:move  ?:help  q:quit"
    };
    render_footer(f, keys, footer_area);
}

/// List, project-scope notice, footer.
fn picker_areas(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scope_picker::SCOPE_PICKER_CHROME;
    use crate::ui::list_view::list_areas;

    #[test]
    fn test_row_area_matches_picker_chrome() {
        let height = 24;
        let [list, _, _] = picker_areas(Rect::new(0, 0, 80, height));
        let [.., rows] = list_areas(list);
        assert_eq!(rows.height, height - SCOPE_PICKER_CHROME);
    }
}
