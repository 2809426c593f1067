use crate::blueprints::models::{format_timestamp, JsonMap};
use crate::blueprints::Resource;
use crate::input::Action;

use super::viewport::Viewport;

/// Rows around the text: breadcrumb, type line, one spacer and the footer.
pub const RESOURCE_CHROME: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine {
    Header(String),
    Body(String),
    Muted(String),
    Blank,
}

/// Lays out a resource as scrollable text.
pub fn format_resource(r: &Resource) -> Vec<DetailLine> {
    let mut lines = vec![DetailLine::Header("Parameters".into())];
    lines.extend(format_map(&r.parameters));
    lines.push(DetailLine::Blank);

    lines.push(DetailLine::Header("Provider Metadata".into()));
    lines.extend(format_map(&r.provider_metadata));
    lines.push(DetailLine::Blank);

    lines.push(DetailLine::Muted(format!(
        "Created: {}",
        format_timestamp(&r.created_at)
    )));
    lines.push(DetailLine::Muted(format!(
        "Updated: {}",
        format_timestamp(&r.updated_at)
    )));
    if let Some(external_id) = r.external_id() {
        lines.push(DetailLine::Muted(format!("External ID: {}", external_id)));
    }
    lines
}

fn format_map(map: &JsonMap) -> Vec<DetailLine> {
    if map.is_empty() {
        return vec![DetailLine::Muted("  (empty)".into())];
    }
    let pretty = serde_json::to_string_pretty(map).unwrap_or_else(|_| format!("{:?}", map));
    pretty
        .lines()
        .map(|line| DetailLine::Body(format!("  {}", line)))
        .collect()
}

pub struct ResourceDetail {
    resource: Resource,
    lines: Vec<DetailLine>,
    viewport: Viewport,
}

impl ResourceDetail {
    pub fn new(resource: Resource, height: u16) -> Self {
        let lines = format_resource(&resource);
        let mut viewport = Viewport::new(content_height(height));
        viewport.set_total(lines.len());
        Self {
            resource,
            lines,
            viewport,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.viewport.scroll_up(1),
            Action::MoveDown => self.viewport.scroll_down(1),
            Action::PageUp => self.viewport.page_up(),
            Action::PageDown => self.viewport.page_down(),
            Action::MoveToTop => self.viewport.goto_top(),
            Action::MoveToBottom => self.viewport.goto_bottom(),
            _ => {}
        }
    }

    pub fn resize(&mut self, height: u16) {
        self.viewport.set_height(content_height(height));
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn lines(&self) -> &[DetailLine] {
        &self.lines
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

fn content_height(height: u16) -> usize {
    height.saturating_sub(RESOURCE_CHROME) as usize
}
