//! Legal Eagle application core
//!
//! Owns the four canonical collections (documents, manual deadlines,
//! activity feed, dashboard layout) behind a single controller. All
//! mutations go through commands on [`AppState`]; every successful
//! mutation persists the affected collection through the configured
//! [`storage::Storage`] backend. Derived views are computed by the
//! `dashboard-engine` crate from the collections exposed here.

pub mod error;
pub mod layout;
pub mod seed;
pub mod state;
pub mod storage;
pub mod upload;

pub use error::CommandError;
pub use layout::{DashboardLayout, ALL_WIDGETS, DEFAULT_WIDGETS};
pub use state::{AppState, DEFAULT_CURRENT_USER};
pub use storage::{FileStorage, MemoryStorage, Storage, StoreError};
