pub mod activity;
pub mod types;

pub use activity::{
    ActivityDetails, ActivityEvent, ActivityEventType, ActivityFeed, ActorSelector, FixedSelector,
    RosterSelector, MAX_FEED_LEN, SIMULATED_USERS,
};
pub use types::{
    AnalysisResult, ClauseComparison, ComparisonResult, DocumentStatus, KeyClause, KeyDate,
    ManualDeadline, PotentialRisk, RiskComparison, RiskSeverity, StoredDocument,
};
