use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::operation_detail::OperationDetail;
use crate::app::resource_detail::{DetailLine, ResourceDetail};
use crate::app::Crumb;
use crate::ui::chrome::{render_breadcrumb, render_error, render_footer, render_loading};
use crate::ui::log_pane::render_log_pane;
use crate::ui::theme::Theme;

pub fn render_resource_detail(f: &mut Frame, detail: &ResourceDetail, crumbs: &[Crumb], area: Rect) {
    let [crumb_area, type_area, _, body_area, footer_area] = resource_areas(area);

    render_breadcrumb(f, crumbs, crumb_area);
    f.render_widget(
        Paragraph::new(Span::styled(
            detail.resource().resource_type.clone(),
            Theme::muted(),
        )),
        type_area,
    );

    let lines: Vec<Line> = detail
        .lines()
        .iter()
        .map(|line| match line {
            DetailLine::Header(s) => Line::from(Span::styled(s.clone(), Theme::header())),
            DetailLine::Body(s) => Line::from(Span::styled(s.clone(), Theme::value())),
            DetailLine::Muted(s) => Line::from(Span::styled(s.clone(), Theme::muted())),
            DetailLine::Blank => Line::from(""),
        })
        .collect();
    let offset = detail.viewport().offset().min(u16::MAX as usize) as u16;
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), body_area);

    render_footer(f, "j/k:scroll  g/G:top/btm  Esc:back  q:quit", footer_area);
}

/// Breadcrumb, type line, spacer, body, footer.
fn resource_areas(area: Rect) -> [Rect; 5] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

pub fn render_operation_detail(
    f: &mut Frame,
    detail: &OperationDetail,
    crumbs: &[Crumb],
    spinner: &str,
    area: Rect,
) {
    let [crumb_area, _, time_area, _, header_area, log_area, footer_area] =
        operation_areas(area);

    render_breadcrumb(f, crumbs, crumb_area);
    f.render_widget(
        Paragraph::new(Span::styled(detail.timestamps().join("  "), Theme::muted())),
        time_area,
    );
    f.render_widget(
        Paragraph::new(Span::styled("Logs", Theme::header())),
        header_area,
    );

    if let Some(err) = detail.error() {
        render_error(f, err, log_area);
    } else if detail.is_loading() {
        render_loading(f, spinner, "logs", log_area);
    } else {
        render_log_pane(f, detail.log_pane(), log_area);
    }

    render_footer(f, "j/k:scroll  g/G:top/btm  Esc:back  q:quit", footer_area);
}

/// Breadcrumb, spacer, timestamps, spacer, logs header, log pane, footer.
fn operation_areas(area: Rect) -> [Rect; 7] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area)
}
