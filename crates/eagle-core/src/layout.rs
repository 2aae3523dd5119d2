//! User-configurable dashboard widget set

use serde::{Deserialize, Serialize};

/// Widgets shown on a fresh dashboard, in render order.
pub const DEFAULT_WIDGETS: [&str; 6] = [
    "risk-overview",
    "upcoming-deadlines",
    "doc-history",
    "doc-status",
    "counterparty-overview",
    "team-activity-feed",
];

/// Every widget the dashboard can render.
pub const ALL_WIDGETS: [&str; 7] = [
    "risk-overview",
    "upcoming-deadlines",
    "doc-history",
    "doc-status",
    "counterparty-overview",
    "team-activity-feed",
    "clause-frequency",
];

/// Ordered widget-id list with set membership: order is significant for
/// rendering, duplicates are forbidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardLayout {
    widgets: Vec<String>,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            widgets: DEFAULT_WIDGETS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl DashboardLayout {
    /// Restore a layout from persisted ids, dropping any duplicates
    /// while keeping first-occurrence order.
    pub fn from_widgets(widgets: Vec<String>) -> Self {
        let mut layout = Self { widgets: Vec::new() };
        for widget in widgets {
            layout.add(&widget);
        }
        layout
    }

    pub fn widgets(&self) -> &[String] {
        &self.widgets
    }

    pub fn contains(&self, widget_id: &str) -> bool {
        self.widgets.iter().any(|w| w == widget_id)
    }

    /// Append if not already present. Re-adding an existing widget never
    /// reorders it. Returns whether the layout changed.
    pub fn add(&mut self, widget_id: &str) -> bool {
        if self.contains(widget_id) {
            return false;
        }
        self.widgets.push(widget_id.to_string());
        true
    }

    /// Remove a widget, preserving the order of the remainder. Returns
    /// whether the layout changed.
    pub fn remove(&mut self, widget_id: &str) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|w| w != widget_id);
        self.widgets.len() != before
    }
}
