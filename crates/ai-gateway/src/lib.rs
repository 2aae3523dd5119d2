//! AI analysis gateway boundary
//!
//! The generative model behind this interface is an external
//! collaborator: this crate owns the request prompts, the response
//! schema, and the validation that keeps unvalidated model output from
//! flowing into the canonical document model. It deliberately ships no
//! network client; callers plug in a transport by implementing
//! [`AnalysisGateway`], and tests use [`StubGateway`].

pub mod prompt;
pub mod schema;

use async_trait::async_trait;
use shared_types::{AnalysisResult, ComparisonResult};
use thiserror::Error;

/// Fallback title when a suggestion cannot be produced.
pub const FALLBACK_TITLE: &str = "Untitled Document";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("AI model call failed: {0}")]
    Upstream(String),

    #[error("model response does not match the expected schema: {0}")]
    Schema(String),
}

/// The call-out to the external document-understanding model.
///
/// Calls are async and non-cancelable: a caller that navigates away
/// simply discards the orphaned result. Failures are surfaced to the
/// user and never retried automatically.
#[async_trait]
pub trait AnalysisGateway {
    /// Summarize a document and extract clauses, risks, key dates and
    /// counterparties.
    async fn analyze(&self, document_text: &str) -> Result<AnalysisResult, GatewayError>;

    /// Compare two documents clause by clause.
    async fn compare(
        &self,
        doc1_text: &str,
        doc2_text: &str,
    ) -> Result<ComparisonResult, GatewayError>;

    /// Best-effort title suggestion. Returns an empty string for blank
    /// input and [`FALLBACK_TITLE`] when the model call fails; never an
    /// error.
    async fn suggest_title(&self, document_text: &str) -> String;
}

/// Canned gateway for tests: replays fixed responses through the same
/// schema validation a real transport would use.
#[derive(Debug, Clone, Default)]
pub struct StubGateway {
    pub analysis_json: Option<String>,
    pub comparison_json: Option<String>,
    pub title: Option<String>,
}

impl StubGateway {
    pub fn with_analysis(json: impl Into<String>) -> Self {
        Self {
            analysis_json: Some(json.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AnalysisGateway for StubGateway {
    async fn analyze(&self, _document_text: &str) -> Result<AnalysisResult, GatewayError> {
        let raw = self
            .analysis_json
            .as_deref()
            .ok_or_else(|| GatewayError::Upstream("no canned analysis".to_string()))?;
        schema::parse_analysis(raw)
    }

    async fn compare(
        &self,
        _doc1_text: &str,
        _doc2_text: &str,
    ) -> Result<ComparisonResult, GatewayError> {
        let raw = self
            .comparison_json
            .as_deref()
            .ok_or_else(|| GatewayError::Upstream("no canned comparison".to_string()))?;
        schema::parse_comparison(raw)
    }

    async fn suggest_title(&self, document_text: &str) -> String {
        if prompt::title_snippet(document_text).is_empty() {
            return String::new();
        }
        self.title.clone().unwrap_or_else(|| FALLBACK_TITLE.to_string())
    }
}
