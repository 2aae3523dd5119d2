//! Derived statistics over the document collection
//!
//! All functions here are pure: the same collection always yields the
//! same rollups, and nothing is cached between calls.

use std::collections::HashMap;

use serde::Serialize;
use shared_types::{DocumentStatus, RiskSeverity, StoredDocument};

/// Clause-frequency histogram keeps the top 7 titles.
pub const CLAUSE_HISTOGRAM_LIMIT: usize = 7;

/// Counterparty histogram keeps the top 5 names.
pub const COUNTERPARTY_HISTOGRAM_LIMIT: usize = 5;

/// Overall severity for one document: High if any risk is High, else
/// Medium if any is Medium, else Low. Documents without risks are Low.
pub fn overall_risk(doc: &StoredDocument) -> RiskSeverity {
    let risks = &doc.analysis.potential_risks;
    if risks.iter().any(|r| r.severity == RiskSeverity::High) {
        RiskSeverity::High
    } else if risks.iter().any(|r| r.severity == RiskSeverity::Medium) {
        RiskSeverity::Medium
    } else {
        RiskSeverity::Low
    }
}

/// Per-severity document counts for the risk overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

pub fn risk_counts(documents: &[StoredDocument]) -> RiskCounts {
    let mut counts = RiskCounts::default();
    for doc in documents {
        counts.total += 1;
        match overall_risk(doc) {
            RiskSeverity::High => counts.high += 1,
            RiskSeverity::Medium => counts.medium += 1,
            RiskSeverity::Low => counts.low += 1,
        }
    }
    counts
}

/// Document counts per status. All five buckets are always present,
/// zero-filled when empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    counts: [usize; 5],
    pub total: usize,
}

impl StatusCounts {
    pub fn get(&self, status: DocumentStatus) -> usize {
        self.counts[Self::slot(status)]
    }

    /// Buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentStatus, usize)> + '_ {
        DocumentStatus::ALL.iter().map(|&s| (s, self.get(s)))
    }

    fn slot(status: DocumentStatus) -> usize {
        DocumentStatus::ALL
            .iter()
            .position(|&s| s == status)
            .unwrap_or(0)
    }
}

pub fn status_counts(documents: &[StoredDocument]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for doc in documents {
        counts.counts[StatusCounts::slot(doc.status)] += 1;
        counts.total += 1;
    }
    counts
}

/// One bar of a frequency histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub name: String,
    pub count: usize,
}

/// Count occurrences of each distinct (trimmed) clause title across all
/// documents, descending by count, top 7. Ties keep first-encountered
/// order.
pub fn clause_frequencies(documents: &[StoredDocument]) -> Vec<FrequencyEntry> {
    let titles = documents
        .iter()
        .flat_map(|d| d.analysis.key_clauses.iter())
        .map(|c| c.clause_title.trim());
    frequency_histogram(titles, CLAUSE_HISTOGRAM_LIMIT)
}

/// Count occurrences of each trimmed, non-empty counterparty name,
/// descending by count, top 5.
pub fn counterparty_frequencies(documents: &[StoredDocument]) -> Vec<FrequencyEntry> {
    let names = documents
        .iter()
        .flat_map(|d| d.analysis.counterparties.iter())
        .map(|n| n.trim())
        .filter(|n| !n.is_empty());
    frequency_histogram(names, COUNTERPARTY_HISTOGRAM_LIMIT)
}

fn frequency_histogram<'a>(
    values: impl Iterator<Item = &'a str>,
    limit: usize,
) -> Vec<FrequencyEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in values {
        let slot = counts.entry(name).or_insert_with(|| {
            order.push(name);
            0
        });
        *slot += 1;
    }

    let mut entries: Vec<FrequencyEntry> = order
        .into_iter()
        .map(|name| FrequencyEntry {
            name: name.to_string(),
            count: counts[name],
        })
        .collect();
    // Stable sort: equal counts keep first-encountered order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{AnalysisResult, KeyClause, PotentialRisk};

    fn doc_with_risks(id: &str, severities: &[RiskSeverity]) -> StoredDocument {
        StoredDocument {
            id: id.to_string(),
            name: format!("Document {id}"),
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
            original_text: String::new(),
            analysis: AnalysisResult {
                potential_risks: severities
                    .iter()
                    .map(|&severity| PotentialRisk {
                        risk_title: "Risk".to_string(),
                        risk_description: String::new(),
                        severity,
                    })
                    .collect(),
                ..Default::default()
            },
            status: DocumentStatus::Draft,
            modified_by: None,
        }
    }

    fn doc_with_clauses(id: &str, titles: &[&str]) -> StoredDocument {
        let mut doc = doc_with_risks(id, &[]);
        doc.analysis.key_clauses = titles
            .iter()
            .map(|t| KeyClause {
                clause_title: t.to_string(),
                explanation: String::new(),
                original_text_snippet: String::new(),
            })
            .collect();
        doc
    }

    #[test]
    fn test_overall_risk_is_three_valued_max() {
        use RiskSeverity::*;
        assert_eq!(overall_risk(&doc_with_risks("a", &[Low, High, Medium])), High);
        assert_eq!(overall_risk(&doc_with_risks("b", &[Low, Medium])), Medium);
        assert_eq!(overall_risk(&doc_with_risks("c", &[Low, Low])), Low);
        assert_eq!(overall_risk(&doc_with_risks("d", &[])), Low);
    }

    #[test]
    fn test_risk_counts_buckets_by_rollup() {
        use RiskSeverity::*;
        let docs = vec![
            doc_with_risks("1", &[High, High]),
            doc_with_risks("2", &[Medium, High]),
            doc_with_risks("3", &[Medium]),
            doc_with_risks("4", &[Low]),
            doc_with_risks("5", &[]),
        ];
        let counts = risk_counts(&docs);
        assert_eq!(
            counts,
            RiskCounts {
                high: 2,
                medium: 1,
                low: 2,
                total: 5
            }
        );
    }

    #[test]
    fn test_status_counts_zero_fill_all_buckets() {
        let mut doc = doc_with_risks("1", &[]);
        doc.status = DocumentStatus::Active;
        let counts = status_counts(&[doc]);
        assert_eq!(counts.total, 1);
        assert_eq!(counts.get(DocumentStatus::Active), 1);
        // Every bucket is present even when empty.
        let buckets: Vec<(DocumentStatus, usize)> = counts.iter().collect();
        assert_eq!(buckets.len(), 5);
        assert_eq!(counts.get(DocumentStatus::Expired), 0);
    }

    #[test]
    fn test_clause_frequencies_trim_sort_and_truncate() {
        let docs = vec![
            doc_with_clauses("1", &["Payment Terms ", "Term of Agreement"]),
            doc_with_clauses("2", &["Payment Terms", "Indemnification"]),
            doc_with_clauses("3", &["Payment Terms", "Term of Agreement"]),
        ];
        let freqs = clause_frequencies(&docs);
        assert_eq!(freqs[0].name, "Payment Terms");
        assert_eq!(freqs[0].count, 3);
        assert_eq!(freqs[1].name, "Term of Agreement");
        assert_eq!(freqs[1].count, 2);
        assert_eq!(freqs[2].name, "Indemnification");
    }

    #[test]
    fn test_clause_frequencies_tie_break_is_first_encountered() {
        let docs = vec![doc_with_clauses("1", &["Zeta", "Alpha"])];
        let freqs = clause_frequencies(&docs);
        assert_eq!(freqs[0].name, "Zeta");
        assert_eq!(freqs[1].name, "Alpha");
    }

    #[test]
    fn test_clause_frequencies_top_seven() {
        let titles: Vec<String> = (0..10).map(|i| format!("Clause {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let docs = vec![doc_with_clauses("1", &refs)];
        assert_eq!(clause_frequencies(&docs).len(), CLAUSE_HISTOGRAM_LIMIT);
    }

    #[test]
    fn test_counterparty_frequencies_skip_blank_names() {
        let mut doc = doc_with_risks("1", &[]);
        doc.analysis.counterparties = vec![
            " Innovate Corp. ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "Innovate Corp.".to_string(),
        ];
        let freqs = counterparty_frequencies(&[doc]);
        assert_eq!(freqs.len(), 1);
        assert_eq!(freqs[0].name, "Innovate Corp.");
        assert_eq!(freqs[0].count, 2);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        use RiskSeverity::*;
        let docs = vec![
            doc_with_risks("1", &[High]),
            doc_with_clauses("2", &["Payment Terms"]),
        ];
        assert_eq!(risk_counts(&docs), risk_counts(&docs));
        assert_eq!(status_counts(&docs), status_counts(&docs));
        assert_eq!(clause_frequencies(&docs), clause_frequencies(&docs));
        assert_eq!(counterparty_frequencies(&docs), counterparty_frequencies(&docs));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::{AnalysisResult, PotentialRisk};

    fn severity_strategy() -> impl Strategy<Value = RiskSeverity> {
        prop_oneof![
            Just(RiskSeverity::High),
            Just(RiskSeverity::Medium),
            Just(RiskSeverity::Low),
        ]
    }

    fn doc_strategy() -> impl Strategy<Value = StoredDocument> {
        prop::collection::vec(severity_strategy(), 0..6).prop_map(|severities| StoredDocument {
            id: "doc".to_string(),
            name: "Document".to_string(),
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
            original_text: String::new(),
            analysis: AnalysisResult {
                potential_risks: severities
                    .into_iter()
                    .map(|severity| PotentialRisk {
                        risk_title: "Risk".to_string(),
                        risk_description: String::new(),
                        severity,
                    })
                    .collect(),
                ..Default::default()
            },
            status: DocumentStatus::Draft,
            modified_by: None,
        })
    }

    proptest! {
        /// Property: `overall_risk` is High iff any risk is High, else
        /// Medium iff any risk is Medium, else Low.
        #[test]
        fn rollup_matches_definition(doc in doc_strategy()) {
            let rollup = overall_risk(&doc);
            let has = |s: RiskSeverity| doc.analysis.potential_risks.iter().any(|r| r.severity == s);
            let expected = if has(RiskSeverity::High) {
                RiskSeverity::High
            } else if has(RiskSeverity::Medium) {
                RiskSeverity::Medium
            } else {
                RiskSeverity::Low
            };
            prop_assert_eq!(rollup, expected);
        }

        /// Property: risk buckets partition the collection.
        #[test]
        fn risk_buckets_partition(docs in prop::collection::vec(doc_strategy(), 0..20)) {
            let counts = risk_counts(&docs);
            prop_assert_eq!(counts.high + counts.medium + counts.low, counts.total);
            prop_assert_eq!(counts.total, docs.len());
        }
    }
}
