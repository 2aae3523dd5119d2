//! Error types for the application core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    /// Missing or invalid user input. Blocks the action; fully
    /// recoverable by correcting the input.
    #[error("{0}")]
    Validation(String),

    /// AI call failure or schema mismatch. Surfaced to the user as a
    /// dismissible message; never retried automatically.
    #[error(transparent)]
    Gateway(#[from] ai_gateway::GatewayError),

    /// Invalid history-table interaction (bad comparison selection).
    #[error(transparent)]
    History(#[from] dashboard_engine::HistoryError),
}
