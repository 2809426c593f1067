use crate::blueprints::models::format_timestamp;
use crate::blueprints::Operation;
use crate::input::Action;
use crate::tlog;

use super::command::{Command, Message};
use super::viewport::LogPane;

/// Rows around the log pane: breadcrumb, timestamps, logs header, footer
/// and two spacers.
pub const OPERATION_CHROME: u16 = 6;

pub struct OperationDetail {
    operation: Operation,
    stack_id: String,
    log_pane: LogPane,
    loading: bool,
    error: Option<String>,
}

impl OperationDetail {
    pub fn new(stack_id: impl Into<String>, operation: Operation, height: u16) -> Self {
        Self {
            operation,
            stack_id: stack_id.into(),
            log_pane: LogPane::new(content_height(height)),
            loading: true,
            error: None,
        }
    }

    pub fn init(&self) -> Vec<Command> {
        vec![Command::LoadOperationLogs {
            operation_id: self.operation.id.clone(),
        }]
    }

    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::OperationLogsLoaded(Ok(logs)) => {
                self.loading = false;
                self.log_pane.set_logs(&logs);
            }
            Message::OperationLogsLoaded(Err(e)) => {
                tlog!(error, "operation {} logs: {}", self.operation.id, e);
                self.loading = false;
                self.error = Some(e.to_string());
            }
            other => tlog!(info, "operation detail ignored {} result", other.label()),
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let vp = self.log_pane.viewport_mut();
        match action {
            Action::MoveUp => vp.scroll_up(1),
            Action::MoveDown => vp.scroll_down(1),
            Action::PageUp => vp.page_up(),
            Action::PageDown => vp.page_down(),
            Action::MoveToTop => vp.goto_top(),
            Action::MoveToBottom => vp.goto_bottom(),
            _ => {}
        }
    }

    pub fn resize(&mut self, height: u16) {
        self.log_pane
            .viewport_mut()
            .set_height(content_height(height));
    }

    /// "Created: …" plus "Completed: …" once the operation has finished.
    pub fn timestamps(&self) -> Vec<String> {
        let mut parts = vec![format!(
            "Created: {}",
            format_timestamp(&self.operation.created_at)
        )];
        if let Some(done) = &self.operation.completed_at {
            parts.push(format!("Completed: {}", format_timestamp(done)));
        }
        parts
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn stack_id(&self) -> &str {
        &self.stack_id
    }

    pub fn log_pane(&self) -> &LogPane {
        &self.log_pane
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn content_height(height: u16) -> usize {
    height.saturating_sub(OPERATION_CHROME) as usize
}
