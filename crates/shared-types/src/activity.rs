//! Append-only activity feed for document lifecycle events

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DocumentStatus;

/// Maximum number of events retained in the feed. Older entries are
/// permanently discarded on append.
pub const MAX_FEED_LEN: usize = 50;

/// Roster of simulated teammates shown in the activity feed.
pub const SIMULATED_USERS: [&str; 5] = [
    "Alex Johnson",
    "Maria Garcia",
    "Chen Wei",
    "Fatima Al-Sayed",
    "David Smith",
];

/// Types of activity recorded in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityEventType {
    DocumentCreated,
    StatusUpdated,
    DocumentDeleted,
}

/// Event payload. Status fields are only set for `StatusUpdated`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetails {
    pub document_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<DocumentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<DocumentStatus>,
}

/// A single activity feed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: ActivityEventType,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub user: String,
    pub details: ActivityDetails,
}

impl ActivityEvent {
    /// Create a new event with a fresh id and the current timestamp
    pub fn new(event_type: ActivityEventType, user: &str, details: ActivityDetails) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_type,
            timestamp: Utc::now().to_rfc3339(),
            user: user.to_string(),
            details,
        }
    }
}

/// Strategy for attributing an activity event to a user.
///
/// Injectable so tests can supply a deterministic selector.
pub trait ActorSelector {
    fn select(&mut self, is_current_user: bool) -> String;
}

/// Attributes current-user actions to the configured user and everything
/// else to a pseudo-random teammate from the simulated roster.
#[derive(Debug, Clone)]
pub struct RosterSelector {
    current_user: String,
}

impl RosterSelector {
    pub fn new(current_user: impl Into<String>) -> Self {
        Self {
            current_user: current_user.into(),
        }
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }
}

impl ActorSelector for RosterSelector {
    fn select(&mut self, is_current_user: bool) -> String {
        if is_current_user {
            return self.current_user.clone();
        }
        let others: Vec<&str> = SIMULATED_USERS
            .iter()
            .copied()
            .filter(|u| *u != self.current_user)
            .collect();
        let mut rng = rand::thread_rng();
        others[rng.gen_range(0..others.len())].to_string()
    }
}

/// Deterministic selector for tests: every event attributes to one name.
#[derive(Debug, Clone)]
pub struct FixedSelector(pub String);

impl ActorSelector for FixedSelector {
    fn select(&mut self, _is_current_user: bool) -> String {
        self.0.clone()
    }
}

/// Size-bounded, newest-first activity feed.
///
/// Persisted as a bare JSON array of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityFeed {
    events: Vec<ActivityEvent>,
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a feed from persisted events, re-applying the size bound.
    pub fn from_events(mut events: Vec<ActivityEvent>) -> Self {
        events.truncate(MAX_FEED_LEN);
        Self { events }
    }

    /// Events, most recent first.
    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Prepend a new event attributed via `selector`, then drop everything
    /// beyond the most recent [`MAX_FEED_LEN`] entries.
    pub fn record(
        &mut self,
        event_type: ActivityEventType,
        details: ActivityDetails,
        is_current_user: bool,
        selector: &mut dyn ActorSelector,
    ) -> &ActivityEvent {
        let user = selector.select(is_current_user);
        let event = ActivityEvent::new(event_type, &user, details);
        self.events.insert(0, event);
        self.events.truncate(MAX_FEED_LEN);
        &self.events[0]
    }
}
