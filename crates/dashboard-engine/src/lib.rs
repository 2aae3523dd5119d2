//! Derived views over the canonical dashboard collections.
//!
//! Everything in this crate is a pure function of the document and
//! deadline collections passed in. Nothing here is a source of truth:
//! recomputing any view from the same input yields the same value, so
//! views can be rebuilt after every mutation without invalidation
//! bookkeeping.

pub mod aggregate;
pub mod deadlines;
pub mod history;

pub use aggregate::{
    clause_frequencies, counterparty_frequencies, overall_risk, risk_counts, status_counts,
    FrequencyEntry, RiskCounts, StatusCounts,
};
pub use deadlines::{
    calendar_marks, merge_deadlines, upcoming, DeadlineSelection, MergedDeadline, UPCOMING_WINDOW,
};
pub use history::{HistoryError, HistoryQuery, RowSelection, SortDirection, SortKey};
