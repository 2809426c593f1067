use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem as Row, ListState, Paragraph};
use ratatui::Frame;

use crate::app::filter_list::{FilterList, FilterState, ListItem};
use crate::ui::theme::Theme;

/// Title line, filter bar and two-line rows of a [`FilterList`].
pub fn render_filter_list<T: ListItem>(f: &mut Frame, list: &FilterList<T>, title: &str, area: Rect) {
    let [title_area, filter_area, rows_area] = list_areas(area);

    let visible = list.visible_items();
    let count = if list.state() == FilterState::Unfiltered {
        format!("  {} items", visible.len())
    } else {
        format!("  {} of {} items", visible.len(), list.items().len())
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {}", title), Theme::title()),
            Span::styled(count, Theme::muted()),
        ])),
        title_area,
    );

    render_filter_bar(f, list, filter_area);

    if visible.is_empty() {
        let empty = if list.query().is_empty() {
            " No items."
        } else {
            " Nothing matched."
        };
        f.render_widget(
            Paragraph::new(Span::styled(empty, Theme::muted())),
            rows_area,
        );
        return;
    }

    let cursor = list.cursor();
    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (marker, title_style) = if i == cursor {
                ("│ ", Theme::selected_marker())
            } else {
                ("  ", Theme::value())
            };
            Row::new(vec![
                Line::from(vec![
                    Span::styled(marker, Theme::selected_marker()),
                    Span::styled(item.title(), title_style),
                ]),
                Line::from(vec![
                    Span::styled(marker, Theme::selected_marker()),
                    Span::styled(item.description(), Theme::muted()),
                ]),
            ])
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(cursor));
    f.render_stateful_widget(List::new(rows), rows_area, &mut state);
}

/// Title line, filter bar, rows.
pub fn list_areas(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(area)
}

fn render_filter_bar<T: ListItem>(f: &mut Frame, list: &FilterList<T>, area: Rect) {
    let line = match list.state() {
        FilterState::Unfiltered => Line::from(""),
        FilterState::Filtering => Line::from(vec![
            Span::styled(" Filter: ", Theme::filter_prompt()),
            Span::styled(list.query().to_string(), Theme::value()),
            Span::styled("_", Theme::filter_prompt()),
        ]),
        FilterState::Applied => Line::from(vec![
            Span::styled(" Filter: ", Theme::muted()),
            Span::styled(list.query().to_string(), Theme::value()),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}
