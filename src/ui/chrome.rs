use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{Crumb, CrumbDetail};
use crate::ui::theme::Theme;

pub fn render_breadcrumb(f: &mut Frame, crumbs: &[Crumb], area: Rect) {
    let mut spans = Vec::new();
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Theme::muted()));
        }
        let style = if crumb.current {
            Theme::title()
        } else {
            Theme::muted()
        };
        spans.push(Span::styled(crumb.label.clone(), style));
        match &crumb.detail {
            Some(CrumbDetail::Id(id)) => {
                spans.push(Span::styled(format!(" {}", id), Theme::muted()));
            }
            Some(CrumbDetail::Status(status)) => {
                spans.push(Span::styled(
                    format!(" {}", status),
                    Theme::operation_status(status),
                ));
            }
            None => {}
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_footer(f: &mut Frame, keys: &str, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", keys),
        Theme::footer(),
    )));
    f.render_widget(paragraph, area);
}

pub fn render_loading(f: &mut Frame, spinner: &str, what: &str, area: Rect) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", spinner), Theme::title()),
        Span::styled(format!("Loading {}…", what), Theme::muted()),
    ]));
    f.render_widget(paragraph, area);
}

pub fn render_error(f: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(" Error", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(format!(" {}", message), Theme::error())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
