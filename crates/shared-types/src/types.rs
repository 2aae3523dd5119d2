use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity assigned to a single potential risk by the AI analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskSeverity {
    High,
    Medium,
    Low,
}

impl RiskSeverity {
    /// Ordinal used when ranking documents by risk (higher is riskier).
    pub fn rank(self) -> u8 {
        match self {
            RiskSeverity::High => 2,
            RiskSeverity::Medium => 1,
            RiskSeverity::Low => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskSeverity::High => "High",
            RiskSeverity::Medium => "Medium",
            RiskSeverity::Low => "Low",
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a stored document. Any value is settable by the
/// user; no transition order is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Draft,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Awaiting Signature")]
    AwaitingSignature,
    Active,
    Expired,
}

impl DocumentStatus {
    /// All statuses in display order. Zero-count buckets still render.
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::Draft,
        DocumentStatus::InReview,
        DocumentStatus::AwaitingSignature,
        DocumentStatus::Active,
        DocumentStatus::Expired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Draft",
            DocumentStatus::InReview => "In Review",
            DocumentStatus::AwaitingSignature => "Awaiting Signature",
            DocumentStatus::Active => "Active",
            DocumentStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An important clause identified by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyClause {
    pub clause_title: String,
    pub explanation: String,
    pub original_text_snippet: String,
}

/// A potential risk or unfavorable term flagged by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialRisk {
    pub risk_title: String,
    pub risk_description: String,
    pub severity: RiskSeverity,
}

/// A deadline or other dated event extracted from the document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDate {
    pub event_name: String,
    /// ISO 8601 calendar date, "YYYY-MM-DD".
    pub date: String,
    pub original_text_snippet: String,
}

/// Structured output of a single document analysis.
///
/// Every sequence field defaults to empty when absent in a stored payload,
/// so older saves load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub summary: String,
    pub key_clauses: Vec<KeyClause>,
    pub potential_risks: Vec<PotentialRisk>,
    pub key_dates: Vec<KeyDate>,
    pub counterparties: Vec<String>,
}

/// A document saved to the dashboard after a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp of when the document was analyzed and saved.
    pub created_at: String,
    pub original_text: String,
    #[serde(default)]
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

/// A user-entered deadline, optionally associated with a document.
///
/// `doc_id` is a weak reference: the document it names may have been
/// deleted, in which case the deadline renders without a document link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualDeadline {
    pub id: String,
    pub event_name: String,
    /// ISO 8601 calendar date, "YYYY-MM-DD".
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
}

/// One clause that differs between two compared documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseComparison {
    pub clause_title: String,
    pub summary_of_difference: String,
    pub details_doc1: String,
    pub details_doc2: String,
}

/// One risk whose profile differs between two compared documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskComparison {
    pub risk_title: String,
    pub summary_of_difference: String,
    /// Risk level or status in document 1, e.g. "Low" or "Not Present".
    pub risk_in_doc1: String,
    pub risk_in_doc2: String,
}

/// Structured output of a two-document comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub overall_summary: String,
    pub clause_comparisons: Vec<ClauseComparison>,
    pub risk_profile_differences: Vec<RiskComparison>,
}
