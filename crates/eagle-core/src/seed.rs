//! First-run seed data
//!
//! Populates the dashboard when no stored state exists, with deadline
//! dates generated relative to today so the calendar always has
//! something upcoming to show.

use chrono::{Duration, Local, Utc};
use shared_types::{
    ActivityDetails, ActivityEvent, ActivityEventType, ActivityFeed, AnalysisResult,
    DocumentStatus, KeyClause, KeyDate, ManualDeadline, PotentialRisk, RiskSeverity,
    StoredDocument,
};

/// A calendar date `days` from today, "YYYY-MM-DD".
fn future_date(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// An RFC 3339 timestamp `days` in the past.
fn past_timestamp(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

fn clause(title: &str, explanation: &str, snippet: &str) -> KeyClause {
    KeyClause {
        clause_title: title.to_string(),
        explanation: explanation.to_string(),
        original_text_snippet: snippet.to_string(),
    }
}

fn risk(title: &str, description: &str, severity: RiskSeverity) -> PotentialRisk {
    PotentialRisk {
        risk_title: title.to_string(),
        risk_description: description.to_string(),
        severity,
    }
}

fn key_date(event: &str, date: String, snippet: &str) -> KeyDate {
    KeyDate {
        event_name: event.to_string(),
        date,
        original_text_snippet: snippet.to_string(),
    }
}

pub fn seed_documents() -> Vec<StoredDocument> {
    vec![
        StoredDocument {
            id: "doc-1".to_string(),
            name: "Innovate Corp Services Agreement".to_string(),
            created_at: past_timestamp(5),
            original_text: "Services agreement...".to_string(),
            analysis: AnalysisResult {
                summary: "A standard services agreement where your company provides \
                          marketing services to Innovate Corp. Key terms include a \
                          12-month duration, net-30 payment, and a strict \
                          confidentiality clause."
                    .to_string(),
                key_clauses: vec![
                    clause(
                        "Term of Agreement",
                        "The agreement is valid for one year and renews automatically \
                         unless a 60-day notice is given.",
                        "...shall continue for a period of twelve (12) months...",
                    ),
                    clause(
                        "Payment Terms",
                        "Invoices are due within 30 days of receipt. Late payments \
                         incur a 5% penalty.",
                        "...payment due within thirty (30) days of the invoice date...",
                    ),
                ],
                potential_risks: vec![
                    risk(
                        "Automatic Renewal",
                        "The contract renews automatically, which could lock you into \
                         another year if termination notice is missed.",
                        RiskSeverity::High,
                    ),
                    risk(
                        "Unlimited Liability",
                        "The agreement does not cap liability, exposing your company \
                         to potentially high financial risk.",
                        RiskSeverity::High,
                    ),
                ],
                key_dates: vec![
                    key_date(
                        "Contract End Date",
                        future_date(360),
                        "...ending on the one-year anniversary of the Effective Date.",
                    ),
                    key_date(
                        "Renewal Notice Deadline",
                        future_date(300),
                        "...notice of termination no less than sixty (60) days prior...",
                    ),
                ],
                counterparties: vec!["Innovate Corp.".to_string(), "Your Company Inc.".to_string()],
            },
            status: DocumentStatus::Active,
            modified_by: Some("Alex Johnson".to_string()),
        },
        StoredDocument {
            id: "doc-2".to_string(),
            name: "Project Phoenix NDA".to_string(),
            created_at: past_timestamp(12),
            original_text: "Non-Disclosure Agreement...".to_string(),
            analysis: AnalysisResult {
                summary: "A mutual non-disclosure agreement for discussions about \
                          \"Project Phoenix\", covering confidential information shared \
                          between both parties for a period of 3 years."
                    .to_string(),
                key_clauses: vec![clause(
                    "Definition of Confidential Information",
                    "Defines what is considered confidential, including technical and \
                     business information.",
                    "...\"Confidential Information\" shall include all data, materials...",
                )],
                potential_risks: vec![risk(
                    "Vague Definition",
                    "The definition of confidential information is broad, which could \
                     lead to disputes over what is covered.",
                    RiskSeverity::Medium,
                )],
                key_dates: vec![key_date(
                    "NDA Expiration",
                    future_date(1083),
                    "...obligations of confidentiality shall expire three (3) years \
                     from the Effective Date...",
                )],
                counterparties: vec!["Phoenix Systems".to_string(), "Your Company Inc.".to_string()],
            },
            status: DocumentStatus::AwaitingSignature,
            modified_by: Some("Maria Garcia".to_string()),
        },
        StoredDocument {
            id: "doc-3".to_string(),
            name: "Downtown Office Lease".to_string(),
            created_at: past_timestamp(25),
            original_text: "Commercial Lease Agreement...".to_string(),
            analysis: AnalysisResult {
                summary: "A 5-year commercial lease for an office space at 123 \
                          Business Rd, with terms on rent, security deposit, and \
                          maintenance responsibilities."
                    .to_string(),
                key_clauses: vec![
                    clause(
                        "Lease Term",
                        "The lease is for a fixed 5-year period.",
                        "...a term of five (5) years, commencing on...",
                    ),
                    clause(
                        "Security Deposit",
                        "A security deposit equal to two months' rent is required.",
                        "...security deposit in the amount of two (2) months' rent...",
                    ),
                ],
                potential_risks: vec![risk(
                    "Rent Escalation Clause",
                    "Rent increases by 4% annually, which is higher than the market \
                     average.",
                    RiskSeverity::Medium,
                )],
                key_dates: vec![key_date(
                    "Lease Start Date",
                    future_date(5),
                    "...commencing on the first day of next month...",
                )],
                counterparties: vec![
                    "Metropolis Properties LLC".to_string(),
                    "Your Company Inc.".to_string(),
                ],
            },
            status: DocumentStatus::InReview,
            modified_by: Some("Chen Wei".to_string()),
        },
        StoredDocument {
            id: "doc-4".to_string(),
            name: "Freelance Designer Contract".to_string(),
            created_at: past_timestamp(2),
            original_text: "Independent Contractor Agreement...".to_string(),
            analysis: AnalysisResult {
                summary: "A straightforward contract for hiring a freelance designer \
                          for a website redesign project, with payment structured in \
                          two milestones."
                    .to_string(),
                key_clauses: vec![clause(
                    "Intellectual Property",
                    "Upon final payment, all IP for the created work transfers to \
                     your company.",
                    "...all rights, title, and interest in the Work Product shall be \
                     assigned to the Client...",
                )],
                potential_risks: vec![risk(
                    "No Rush Fee Clause",
                    "The contract does not specify fees for expedited work, which \
                     could lead to scope creep.",
                    RiskSeverity::Low,
                )],
                key_dates: vec![key_date(
                    "Project Delivery Deadline",
                    future_date(45),
                    "...final delivery of all assets no later than 45 days...",
                )],
                counterparties: vec!["Jane Artist".to_string(), "Your Company Inc.".to_string()],
            },
            status: DocumentStatus::Draft,
            modified_by: Some("David Smith".to_string()),
        },
        StoredDocument {
            id: "doc-5".to_string(),
            name: "Old Partnership Agreement".to_string(),
            created_at: past_timestamp(1200),
            original_text: "Partnership agreement from a previous venture...".to_string(),
            analysis: AnalysisResult {
                summary: "An expired partnership agreement from 2021. No active \
                          obligations remain."
                    .to_string(),
                key_clauses: vec![],
                potential_risks: vec![],
                key_dates: vec![],
                counterparties: vec!["Legacy Partners".to_string()],
            },
            status: DocumentStatus::Expired,
            modified_by: Some("Fatima Al-Sayed".to_string()),
        },
    ]
}

pub fn seed_deadlines() -> Vec<ManualDeadline> {
    vec![
        ManualDeadline {
            id: "md-1".to_string(),
            event_name: "Quarterly Tax Filing".to_string(),
            date: future_date(15),
            doc_id: None,
        },
        ManualDeadline {
            id: "md-2".to_string(),
            event_name: "Submit Final Project Deliverables".to_string(),
            date: future_date(45),
            doc_id: Some("doc-4".to_string()),
        },
        ManualDeadline {
            id: "md-3".to_string(),
            event_name: "Annual Insurance Renewal".to_string(),
            date: future_date(75),
            doc_id: None,
        },
    ]
}

pub fn seed_activity() -> ActivityFeed {
    let event = |days: i64,
                 event_type: ActivityEventType,
                 user: &str,
                 details: ActivityDetails| ActivityEvent {
        id: format!("act-{days}"),
        event_type,
        timestamp: past_timestamp(days),
        user: user.to_string(),
        details,
    };

    ActivityFeed::from_events(vec![
        event(
            2,
            ActivityEventType::DocumentCreated,
            "David Smith",
            ActivityDetails {
                document_name: "Freelance Designer Contract".to_string(),
                doc_id: Some("doc-4".to_string()),
                ..Default::default()
            },
        ),
        event(
            4,
            ActivityEventType::StatusUpdated,
            "Alex Johnson",
            ActivityDetails {
                document_name: "Innovate Corp Services Agreement".to_string(),
                doc_id: Some("doc-1".to_string()),
                old_status: Some(DocumentStatus::InReview),
                new_status: Some(DocumentStatus::Active),
            },
        ),
        event(
            5,
            ActivityEventType::DocumentCreated,
            "Alex Johnson",
            ActivityDetails {
                document_name: "Innovate Corp Services Agreement".to_string(),
                doc_id: Some("doc-1".to_string()),
                ..Default::default()
            },
        ),
        event(
            10,
            ActivityEventType::StatusUpdated,
            "Maria Garcia",
            ActivityDetails {
                document_name: "Project Phoenix NDA".to_string(),
                doc_id: Some("doc-2".to_string()),
                old_status: Some(DocumentStatus::Draft),
                new_status: Some(DocumentStatus::AwaitingSignature),
            },
        ),
        event(
            11,
            ActivityEventType::DocumentDeleted,
            "Chen Wei",
            ActivityDetails {
                document_name: "Obsolete Marketing Proposal".to_string(),
                ..Default::default()
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_engine::{overall_risk, risk_counts};
    use std::collections::HashSet;

    #[test]
    fn test_seed_document_ids_are_unique() {
        let docs = seed_documents();
        let ids: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn test_seed_rollups() {
        let docs = seed_documents();
        let counts = risk_counts(&docs);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.high, 1);
        assert_eq!(counts.medium, 2);
        assert_eq!(counts.low, 2);
        assert_eq!(overall_risk(&docs[0]), shared_types::RiskSeverity::High);
    }

    #[test]
    fn test_seed_deadline_links_existing_document() {
        let docs = seed_documents();
        let deadlines = seed_deadlines();
        let linked = deadlines.iter().find(|d| d.doc_id.is_some()).unwrap();
        assert!(docs.iter().any(|d| Some(&d.id) == linked.doc_id.as_ref()));
    }

    #[test]
    fn test_seed_activity_fits_the_feed_bound() {
        let feed = seed_activity();
        assert_eq!(feed.len(), 5);
    }
}
