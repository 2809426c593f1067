use crate::blueprints::models::format_timestamp;
use crate::blueprints::LogEntry;

pub const NO_LOGS: &str = "No logs available.";

/// Vertical scroll state over `total` lines shown `height` at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    total: usize,
    offset: usize,
    height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            total: 0,
            offset: 0,
            height,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height)
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    pub fn goto_top(&mut self) {
        self.offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }
}

/// One rendered log row, newest first in a [`LogPane`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

impl LogLine {
    /// Level padded so messages line up in one column.
    pub fn padded_level(&self) -> String {
        format!("{:<5}", self.level)
    }
}

impl From<&LogEntry> for LogLine {
    fn from(entry: &LogEntry) -> Self {
        Self {
            timestamp: format_timestamp(&entry.timestamp),
            level: entry.level.clone(),
            message: entry.message.clone(),
        }
    }
}

/// Scrollable log text shared by the stack Logs tab and operation detail.
#[derive(Debug, Clone, Default)]
pub struct LogPane {
    lines: Vec<LogLine>,
    viewport: Viewport,
}

impl LogPane {
    pub fn new(height: usize) -> Self {
        Self {
            lines: Vec::new(),
            viewport: Viewport::new(height),
        }
    }

    /// Entries arrive oldest first and are shown newest first; the view then
    /// jumps to its bottom edge.
    pub fn set_logs(&mut self, logs: &[LogEntry]) {
        self.lines = logs.iter().rev().map(LogLine::from).collect();
        self.viewport.set_total(self.lines.len().max(1));
        self.viewport.goto_bottom();
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command::testing::{log, ts};

    #[test]
    fn test_viewport_clamps() {
        let mut vp = Viewport::new(10);
        vp.set_total(25);
        vp.scroll_down(100);
        assert_eq!(vp.offset(), 15);
        vp.set_height(20);
        assert_eq!(vp.offset(), 5);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut vp = Viewport::new(10);
        vp.set_total(3);
        vp.goto_bottom();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_logs_are_newest_first() {
        let mut pane = LogPane::new(5);
        pane.set_logs(&[log("first", "INFO", ts(10, 0)), log("second", "WARN", ts(10, 5))]);
        let lines = pane.lines();
        assert_eq!(lines[0].message, "second");
        assert_eq!(lines[0].timestamp, "2024-05-01 10:05:00");
        assert_eq!(lines[1].message, "first");
    }

    #[test]
    fn test_level_is_padded_to_five() {
        let line = LogLine::from(&log("boom", "ERROR", ts(1, 2)));
        assert_eq!(line.padded_level(), "ERROR");
        let line = LogLine::from(&log("quiet", "", ts(1, 2)));
        assert_eq!(line.padded_level(), "     ");
    }

    #[test]
    fn test_set_logs_scrolls_to_bottom() {
        let mut pane = LogPane::new(2);
        let logs: Vec<_> = (0..6).map(|i| log(&format!("m{}", i), "INFO", ts(10, i))).collect();
        pane.set_logs(&logs);
        assert_eq!(pane.viewport().offset(), 4);
    }

    #[test]
    fn test_empty_logs_keep_one_row_for_placeholder() {
        let mut pane = LogPane::new(5);
        pane.set_logs(&[]);
        assert!(pane.lines().is_empty());
        assert_eq!(pane.viewport().max_offset(), 0);
    }
}
