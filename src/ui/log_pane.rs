use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::viewport::{LogPane, NO_LOGS};
use crate::ui::theme::Theme;

/// Newest-first log lines, scrolled to the pane's viewport offset.
pub fn render_log_pane(f: &mut Frame, pane: &LogPane, area: Rect) {
    let lines: Vec<Line> = if pane.lines().is_empty() {
        vec![Line::from(Span::styled(NO_LOGS, Theme::muted()))]
    } else {
        pane.lines()
            .iter()
            .map(|line| {
                Line::from(vec![
                    Span::styled(line.timestamp.clone(), Theme::muted()),
                    Span::raw(" "),
                    Span::styled(line.padded_level(), Theme::log_level(&line.level)),
                    Span::raw(" "),
                    Span::styled(line.message.clone(), Theme::value()),
                ])
            })
            .collect()
    };

    let offset = pane.viewport().offset().min(u16::MAX as usize) as u16;
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::app::command::testing::{log, ts};

    fn draw(pane: &LogPane, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_log_pane(f, pane, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_lines_show_time_padded_level_and_message() {
        let mut pane = LogPane::new(3);
        pane.set_logs(&[log("first", "INFO", ts(10, 0)), log("boom", "ERROR", ts(10, 5))]);
        let rows = draw(&pane, 50, 3);
        assert_eq!(rows[0].trim_end(), "2024-05-01 10:05:00 ERROR boom");
        assert_eq!(rows[1].trim_end(), "2024-05-01 10:00:00 INFO  first");
    }

    #[test]
    fn test_empty_pane_shows_placeholder() {
        let mut pane = LogPane::new(3);
        pane.set_logs(&[]);
        let rows = draw(&pane, 40, 3);
        assert_eq!(rows[0].trim_end(), NO_LOGS);
    }
}
