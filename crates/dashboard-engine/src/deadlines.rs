//! Unified calendar of AI-extracted key dates and manual deadlines

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared_types::{ManualDeadline, StoredDocument};
use tracing::warn;

/// Number of events shown when no calendar date is selected.
pub const UPCOMING_WINDOW: usize = 7;

/// A deadline in the unified view, tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedDeadline {
    pub id: String,
    pub date: NaiveDate,
    pub event_name: String,
    /// Resolved at merge time; `None` when `doc_id` is absent or dangling.
    pub doc_name: Option<String>,
    pub doc_id: Option<String>,
    pub is_manual: bool,
}

/// Merge every document key date and every manual deadline into one
/// sequence, ascending by date.
///
/// Document-derived events get the stable id `{doc_id}-{date}`, so
/// re-deriving the view reproduces the same identities. Duplicate key
/// dates are kept as distinct events. The sort is stable and documents
/// are pushed before manual deadlines, so for equal dates document
/// events come first, each group in insertion order.
pub fn merge_deadlines(
    documents: &[StoredDocument],
    manual: &[ManualDeadline],
) -> Vec<MergedDeadline> {
    let mut merged = Vec::new();

    for doc in documents {
        for key_date in &doc.analysis.key_dates {
            let Some(date) = parse_date(&key_date.date) else {
                continue;
            };
            merged.push(MergedDeadline {
                id: format!("{}-{}", doc.id, key_date.date),
                date,
                event_name: key_date.event_name.clone(),
                doc_name: Some(doc.name.clone()),
                doc_id: Some(doc.id.clone()),
                is_manual: false,
            });
        }
    }

    for deadline in manual {
        let Some(date) = parse_date(&deadline.date) else {
            continue;
        };
        let doc_name = deadline
            .doc_id
            .as_deref()
            .and_then(|id| documents.iter().find(|d| d.id == id))
            .map(|d| d.name.clone());
        merged.push(MergedDeadline {
            id: deadline.id.clone(),
            date,
            event_name: deadline.event_name.clone(),
            doc_name,
            doc_id: deadline.doc_id.clone(),
            is_manual: true,
        });
    }

    merged.sort_by_key(|d| d.date);
    merged
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(date = raw, "skipping deadline with unparseable date");
            None
        }
    }
}

/// Events on or after `today`, soonest first. Past events are silently
/// dropped from this view; they still mark the calendar.
pub fn upcoming(merged: &[MergedDeadline], today: NaiveDate) -> Vec<MergedDeadline> {
    merged.iter().filter(|d| d.date >= today).cloned().collect()
}

/// Day-of-month values in `(year, month)` containing at least one event.
///
/// Computed over the unfiltered merge, so past events still produce
/// calendar dots when browsing back through earlier months.
pub fn calendar_marks(merged: &[MergedDeadline], year: i32, month: u32) -> BTreeSet<u32> {
    merged
        .iter()
        .filter(|d| d.date.year() == year && d.date.month() == month)
        .map(|d| d.date.day())
        .collect()
}

/// Toggleable calendar-date filter over the merged view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlineSelection {
    selected: Option<NaiveDate>,
}

impl DeadlineSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Select a date; selecting the same date again clears the filter.
    pub fn toggle(&mut self, date: NaiveDate) {
        if self.selected == Some(date) {
            self.selected = None;
        } else {
            self.selected = Some(date);
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The visible slice of the merged view: every event on the selected
    /// date, or the next [`UPCOMING_WINDOW`] upcoming events when no date
    /// is selected.
    pub fn visible(&self, merged: &[MergedDeadline], today: NaiveDate) -> Vec<MergedDeadline> {
        match self.selected {
            Some(date) => merged.iter().filter(|d| d.date == date).cloned().collect(),
            None => {
                let mut events = upcoming(merged, today);
                events.truncate(UPCOMING_WINDOW);
                events
            }
        }
    }
}
