//! Sortable, searchable, selectable view over the document collection

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use shared_types::StoredDocument;
use thiserror::Error;

use crate::aggregate::overall_risk;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("comparison requires exactly 2 selected documents, found {0}")]
    SelectionNotPair(usize),

    #[error("selected document no longer exists: {0}")]
    UnknownDocument(String),
}

/// Column the history table sorts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Date,
    Risk,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active search and sort configuration. Defaults to newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub search: String,
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            key: SortKey::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl HistoryQuery {
    /// Header click: re-requesting the active key toggles the direction,
    /// a new key starts ascending.
    pub fn request_sort(&mut self, key: SortKey) {
        if self.key == key && self.direction == SortDirection::Ascending {
            self.direction = SortDirection::Descending;
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Apply the case-insensitive name filter, then the active sort.
    pub fn apply(&self, documents: &[StoredDocument]) -> Vec<StoredDocument> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<StoredDocument> = documents
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match self.key {
                SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortKey::Date => {
                    timestamp_millis(&a.created_at).cmp(&timestamp_millis(&b.created_at))
                }
                SortKey::Risk => overall_risk(a).rank().cmp(&overall_risk(b).rank()),
                SortKey::Status => a
                    .status
                    .as_str()
                    .to_lowercase()
                    .cmp(&b.status.as_str().to_lowercase()),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }
}

/// Unparseable timestamps sort as the epoch.
fn timestamp_millis(raw: &str) -> i64 {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}

/// Row selection for the compare action, independent of filter and sort.
///
/// Set semantics with insertion order preserved, so the first-selected
/// document is document 1 of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: Vec<String>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, doc_id: &str) {
        if let Some(pos) = self.selected.iter().position(|id| id == doc_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(doc_id.to_string());
        }
    }

    pub fn is_selected(&self, doc_id: &str) -> bool {
        self.selected.iter().any(|id| id == doc_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Compare is enabled only for exactly two selected rows.
    pub fn compare_ready(&self) -> bool {
        self.selected.len() == 2
    }

    /// Resolve the two selected documents by id against the collection as
    /// it exists right now, then clear the selection. Stale captures are
    /// impossible: a selected id whose document was deleted in the
    /// meantime fails the invocation (and keeps the selection).
    pub fn comparison_pair(
        &mut self,
        documents: &[StoredDocument],
    ) -> Result<(StoredDocument, StoredDocument), HistoryError> {
        if self.selected.len() != 2 {
            return Err(HistoryError::SelectionNotPair(self.selected.len()));
        }
        let find = |id: &String| {
            documents
                .iter()
                .find(|d| &d.id == id)
                .cloned()
                .ok_or_else(|| HistoryError::UnknownDocument(id.clone()))
        };
        let first = find(&self.selected[0])?;
        let second = find(&self.selected[1])?;
        self.selected.clear();
        Ok((first, second))
    }
}
