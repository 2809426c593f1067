use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::app::stack_detail::{operation_row, resource_row, DetailTab, StackDetail};
use crate::app::Crumb;
use crate::ui::chrome::{render_breadcrumb, render_error, render_footer, render_loading};
use crate::ui::log_pane::render_log_pane;
use crate::ui::theme::Theme;

pub fn render_stack_detail(
    f: &mut Frame,
    detail: &StackDetail,
    crumbs: &[Crumb],
    spinner: &str,
    area: Rect,
) {
    let [crumb_area, _, tab_area, _, content_area, footer_area] = detail_areas(area);

    render_breadcrumb(f, crumbs, crumb_area);
    render_tab_bar(f, detail, tab_area);
    render_tab_content(f, detail, spinner, content_area);

    let keys = match detail.active_tab() {
        DetailTab::Logs => "Tab:next tab  j/k:scroll  Esc:back  r:refresh  q:quit",
        _ => "Enter:open  Tab:next tab  Esc:back  r:refresh  q:quit",
    };
    render_footer(f, keys, footer_area);
}

/// Breadcrumb, spacer, tab bar, spacer, tab content, footer.
fn detail_areas(area: Rect) -> [Rect; 6] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area)
}

fn render_tab_bar(f: &mut Frame, detail: &StackDetail, area: Rect) {
    let tabs: Vec<Span> = DetailTab::ALL
        .iter()
        .flat_map(|&tab| {
            let style = if tab == detail.active_tab() {
                Theme::tab_active()
            } else {
                Theme::tab_inactive()
            };
            vec![Span::styled(tab.label(), style), Span::raw("  ")]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(tabs)), area);
}

fn render_tab_content(f: &mut Frame, detail: &StackDetail, spinner: &str, area: Rect) {
    // One error slot for all three tabs.
    if let Some(err) = detail.error() {
        render_error(f, err, area);
        return;
    }

    let tab = detail.active_tab();
    if detail.tab_loading(tab) {
        render_loading(f, spinner, &tab.label().to_lowercase(), area);
        return;
    }

    match tab {
        DetailTab::Resources => {
            let rows = detail
                .resources()
                .iter()
                .map(|r| Row::new(resource_row(r)))
                .collect();
            render_table(
                f,
                ["Name", "Type", "ID"],
                [30, 30, 16],
                rows,
                detail.resource_cursor(),
                area,
            );
        }
        DetailTab::Operations => {
            let rows = detail
                .operations()
                .iter()
                .map(|op| {
                    let [id, status, created] = operation_row(op);
                    let style = Theme::operation_status(&status);
                    Row::new(vec![
                        Cell::from(id),
                        Cell::from(status).style(style),
                        Cell::from(created),
                    ])
                })
                .collect();
            render_table(
                f,
                ["ID", "Status", "Created"],
                [16, 14, 20],
                rows,
                detail.operation_cursor(),
                area,
            );
        }
        DetailTab::Logs => render_log_pane(f, detail.log_pane(), area),
    }
}

fn render_table(
    f: &mut Frame,
    headers: [&str; 3],
    widths: [u16; 3],
    rows: Vec<Row>,
    cursor: usize,
    area: Rect,
) {
    let header = Row::new(
        headers
            .iter()
            .map(|h| Cell::from(*h).style(Theme::header())),
    )
    .height(1);

    let table = Table::new(rows, widths.map(Constraint::Length))
        .header(header)
        .row_highlight_style(Theme::selected());

    let mut state = TableState::default().with_selected(Some(cursor));
    f.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::stack_detail::DETAIL_CHROME;

    #[test]
    fn test_content_area_matches_detail_chrome() {
        for height in [12, 20, 48] {
            let [.., content, _] = detail_areas(Rect::new(0, 0, 80, height));
            assert_eq!(content.height, height - DETAIL_CHROME);
        }
    }
}
