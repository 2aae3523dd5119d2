//! Application state and command layer
//!
//! `AppState` is the single owner of the canonical collections. Views
//! read them through accessors; every mutation goes through a command
//! that updates the collection in memory first and then persists it.
//! Persistence failures are logged, never fatal.

use ai_gateway::AnalysisGateway;
use chrono::{NaiveDate, Utc};
use dashboard_engine::RowSelection;
use shared_types::{
    ActivityDetails, ActivityEventType, ActivityFeed, ActorSelector, AnalysisResult,
    DocumentStatus, ManualDeadline, RosterSelector, StoredDocument,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::CommandError;
use crate::layout::DashboardLayout;
use crate::seed;
use crate::storage::{Storage, ACTIVITY_KEY, DEADLINES_KEY, DOCUMENTS_KEY, LAYOUT_KEY};

/// Login name used when none is configured.
pub const DEFAULT_CURRENT_USER: &str = "demo";

pub struct AppState<S: Storage> {
    storage: S,
    current_user: String,
    selector: Box<dyn ActorSelector>,
    documents: Vec<StoredDocument>,
    manual_deadlines: Vec<ManualDeadline>,
    activity: ActivityFeed,
    layout: DashboardLayout,
}

impl<S: Storage> AppState<S> {
    /// Load all four collections from storage. A first run (no stored
    /// documents) or a malformed payload falls back to seed data.
    pub fn load(storage: S, current_user: impl Into<String>) -> Self {
        let current_user: String = current_user.into();
        let selector = Box::new(RosterSelector::new(current_user.clone()));
        Self::with_selector(storage, current_user, selector)
    }

    /// Like [`AppState::load`] with an injected actor-selection
    /// strategy, so tests can attribute events deterministically.
    pub fn with_selector(
        storage: S,
        current_user: impl Into<String>,
        selector: Box<dyn ActorSelector>,
    ) -> Self {
        let (documents, manual_deadlines, activity) =
            match storage.load::<Vec<StoredDocument>>(DOCUMENTS_KEY) {
                Some(documents) => (
                    documents,
                    storage.load(DEADLINES_KEY).unwrap_or_default(),
                    storage.load(ACTIVITY_KEY).unwrap_or_default(),
                ),
                None => (
                    seed::seed_documents(),
                    seed::seed_deadlines(),
                    seed::seed_activity(),
                ),
            };
        let layout = storage
            .load::<Vec<String>>(LAYOUT_KEY)
            .map(DashboardLayout::from_widgets)
            .unwrap_or_default();

        info!(
            documents = documents.len(),
            deadlines = manual_deadlines.len(),
            activity = activity.len(),
            "dashboard state loaded"
        );

        Self {
            storage,
            current_user: current_user.into(),
            selector,
            documents,
            manual_deadlines,
            activity,
            layout,
        }
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn documents(&self) -> &[StoredDocument] {
        &self.documents
    }

    pub fn manual_deadlines(&self) -> &[ManualDeadline] {
        &self.manual_deadlines
    }

    pub fn activity(&self) -> &ActivityFeed {
        &self.activity
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ------------------------------------------------------------
    // Document commands
    // ------------------------------------------------------------

    /// Validate inputs, run the analysis through the gateway, and save
    /// the resulting document.
    pub async fn analyze_and_save(
        &mut self,
        gateway: &dyn AnalysisGateway,
        name: &str,
        original_text: &str,
    ) -> Result<&StoredDocument, CommandError> {
        if original_text.trim().is_empty() {
            return Err(CommandError::Validation(
                "enter some legal text to analyze".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(CommandError::Validation(
                "provide a name for the document".to_string(),
            ));
        }
        let analysis = gateway.analyze(original_text).await?;
        self.save_document(name, original_text, analysis)
    }

    /// Persist a newly analyzed document. An empty name falls back to a
    /// generated one; empty text is rejected.
    pub fn save_document(
        &mut self,
        name: &str,
        original_text: &str,
        analysis: AnalysisResult,
    ) -> Result<&StoredDocument, CommandError> {
        if original_text.trim().is_empty() {
            return Err(CommandError::Validation(
                "cannot save a document without text".to_string(),
            ));
        }
        let id = Uuid::new_v4().to_string();
        let name = if name.trim().is_empty() {
            format!("Document-{id}")
        } else {
            name.trim().to_string()
        };

        let doc = StoredDocument {
            id: id.clone(),
            name: name.clone(),
            created_at: Utc::now().to_rfc3339(),
            original_text: original_text.to_string(),
            analysis,
            status: DocumentStatus::Draft,
            modified_by: Some(self.current_user.clone()),
        };
        self.documents.insert(0, doc);
        self.record_activity(
            ActivityEventType::DocumentCreated,
            ActivityDetails {
                document_name: name,
                doc_id: Some(id),
                ..Default::default()
            },
            true,
        );
        self.persist(DOCUMENTS_KEY, &self.documents);
        Ok(&self.documents[0])
    }

    /// Set a document's status. A changed value appends a
    /// `STATUS_UPDATED` event attributed to the current user; setting
    /// the same value again records nothing.
    pub fn update_status(
        &mut self,
        doc_id: &str,
        status: DocumentStatus,
    ) -> Result<(), CommandError> {
        let current_user = self.current_user.clone();
        let doc = self
            .documents
            .iter_mut()
            .find(|d| d.id == doc_id)
            .ok_or_else(|| CommandError::Validation(format!("no document with id {doc_id}")))?;

        let old_status = doc.status;
        doc.status = status;
        doc.modified_by = Some(current_user);
        let details = ActivityDetails {
            document_name: doc.name.clone(),
            doc_id: Some(doc.id.clone()),
            old_status: Some(old_status),
            new_status: Some(status),
        };

        if old_status != status {
            self.record_activity(ActivityEventType::StatusUpdated, details, true);
        }
        self.persist(DOCUMENTS_KEY, &self.documents);
        Ok(())
    }

    /// Remove a document. Manual deadlines referencing it keep their
    /// `doc_id`; the weak reference simply resolves to nothing from now
    /// on.
    pub fn delete_document(&mut self, doc_id: &str) -> Result<(), CommandError> {
        let doc = self
            .documents
            .iter()
            .find(|d| d.id == doc_id)
            .ok_or_else(|| CommandError::Validation(format!("no document with id {doc_id}")))?;
        let document_name = doc.name.clone();

        self.record_activity(
            ActivityEventType::DocumentDeleted,
            ActivityDetails {
                document_name,
                ..Default::default()
            },
            true,
        );
        self.documents.retain(|d| d.id != doc_id);
        self.persist(DOCUMENTS_KEY, &self.documents);
        Ok(())
    }

    /// Resolve a two-row comparison selection against the collection as
    /// it exists right now.
    pub fn comparison_pair(
        &self,
        selection: &mut RowSelection,
    ) -> Result<(StoredDocument, StoredDocument), CommandError> {
        Ok(selection.comparison_pair(&self.documents)?)
    }

    // ------------------------------------------------------------
    // Manual deadline commands
    // ------------------------------------------------------------

    pub fn add_manual_deadline(
        &mut self,
        event_name: &str,
        date: &str,
        doc_id: Option<String>,
    ) -> Result<&ManualDeadline, CommandError> {
        validate_deadline(event_name, date)?;
        let deadline = ManualDeadline {
            id: Uuid::new_v4().to_string(),
            event_name: event_name.trim().to_string(),
            date: date.to_string(),
            doc_id,
        };
        self.manual_deadlines.push(deadline);
        self.persist(DEADLINES_KEY, &self.manual_deadlines);
        Ok(self.manual_deadlines.last().expect("just pushed"))
    }

    /// Full replace of an existing deadline; the id must exist.
    pub fn update_manual_deadline(&mut self, updated: ManualDeadline) -> Result<(), CommandError> {
        validate_deadline(&updated.event_name, &updated.date)?;
        let slot = self
            .manual_deadlines
            .iter_mut()
            .find(|d| d.id == updated.id)
            .ok_or_else(|| {
                CommandError::Validation(format!("no deadline with id {}", updated.id))
            })?;
        *slot = updated;
        self.persist(DEADLINES_KEY, &self.manual_deadlines);
        Ok(())
    }

    /// Delete a manual deadline; the id must exist. Document-derived
    /// events are not deletable here, only through document deletion.
    pub fn delete_manual_deadline(&mut self, id: &str) -> Result<(), CommandError> {
        if !self.manual_deadlines.iter().any(|d| d.id == id) {
            return Err(CommandError::Validation(format!("no deadline with id {id}")));
        }
        self.manual_deadlines.retain(|d| d.id != id);
        self.persist(DEADLINES_KEY, &self.manual_deadlines);
        Ok(())
    }

    // ------------------------------------------------------------
    // Layout commands
    // ------------------------------------------------------------

    pub fn add_widget(&mut self, widget_id: &str) {
        if self.layout.add(widget_id) {
            self.persist(LAYOUT_KEY, &self.layout);
        }
    }

    pub fn remove_widget(&mut self, widget_id: &str) {
        if self.layout.remove(widget_id) {
            self.persist(LAYOUT_KEY, &self.layout);
        }
    }

    // ------------------------------------------------------------
    // Activity
    // ------------------------------------------------------------

    /// Append an activity event attributed through the configured
    /// selector, then persist the feed.
    pub fn record_activity(
        &mut self,
        event_type: ActivityEventType,
        details: ActivityDetails,
        is_current_user: bool,
    ) {
        self.activity
            .record(event_type, details, is_current_user, self.selector.as_mut());
        self.persist(ACTIVITY_KEY, &self.activity);
    }

    fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.storage.save(key, value) {
            error!(key, "failed to persist collection: {e}");
        }
    }
}

fn validate_deadline(event_name: &str, date: &str) -> Result<(), CommandError> {
    if event_name.trim().is_empty() {
        return Err(CommandError::Validation(
            "deadline needs an event name".to_string(),
        ));
    }
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(CommandError::Validation(format!(
            "deadline date must be YYYY-MM-DD, got {date:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use shared_types::FixedSelector;

    fn fresh_state() -> AppState<MemoryStorage> {
        // Seed an empty store so tests start from empty collections.
        let storage = MemoryStorage::new();
        storage
            .save(DOCUMENTS_KEY, &Vec::<StoredDocument>::new())
            .unwrap();
        AppState::with_selector(
            storage,
            "indu",
            Box::new(FixedSelector("indu".to_string())),
        )
    }

    #[test]
    fn test_first_run_loads_seed_data() {
        let state = AppState::load(MemoryStorage::new(), DEFAULT_CURRENT_USER);
        assert_eq!(state.documents().len(), 5);
        assert_eq!(state.manual_deadlines().len(), 3);
        assert_eq!(state.activity().len(), 5);
        assert_eq!(state.layout().widgets().len(), 6);
    }

    #[test]
    fn test_save_document_prepends_and_logs() {
        let mut state = fresh_state();
        let doc = state
            .save_document("My NDA", "NDA text...", AnalysisResult::default())
            .unwrap();
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.modified_by.as_deref(), Some("indu"));

        assert_eq!(state.documents().len(), 1);
        let event = &state.activity().events()[0];
        assert_eq!(event.event_type, ActivityEventType::DocumentCreated);
        assert_eq!(event.details.document_name, "My NDA");
        assert_eq!(event.user, "indu");
    }

    #[test]
    fn test_save_document_requires_text() {
        let mut state = fresh_state();
        let err = state
            .save_document("Named", "   ", AnalysisResult::default())
            .unwrap_err();
        assert!(matches!(err, CommandError::Validation(_)));
        assert!(state.documents().is_empty());
    }

    #[test]
    fn test_save_document_generates_fallback_name() {
        let mut state = fresh_state();
        let doc = state
            .save_document("", "text", AnalysisResult::default())
            .unwrap();
        assert!(doc.name.starts_with("Document-"));
    }

    #[test]
    fn test_update_status_logs_only_on_change() {
        let mut state = fresh_state();
        let id = state
            .save_document("Lease", "text", AnalysisResult::default())
            .unwrap()
            .id
            .clone();
        let before = state.activity().len();

        state.update_status(&id, DocumentStatus::Active).unwrap();
        assert_eq!(state.activity().len(), before + 1);
        let event = &state.activity().events()[0];
        assert_eq!(event.event_type, ActivityEventType::StatusUpdated);
        assert_eq!(event.details.old_status, Some(DocumentStatus::Draft));
        assert_eq!(event.details.new_status, Some(DocumentStatus::Active));

        // Same value again: mutation is a no-op for the feed.
        state.update_status(&id, DocumentStatus::Active).unwrap();
        assert_eq!(state.activity().len(), before + 1);
    }

    #[test]
    fn test_update_status_unknown_id_fails() {
        let mut state = fresh_state();
        assert!(matches!(
            state.update_status("ghost", DocumentStatus::Active),
            Err(CommandError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_document_leaves_deadlines_dangling() {
        let mut state = fresh_state();
        let id = state
            .save_document("Lease", "text", AnalysisResult::default())
            .unwrap()
            .id
            .clone();
        state
            .add_manual_deadline("Renewal", "2030-01-01", Some(id.clone()))
            .unwrap();

        state.delete_document(&id).unwrap();
        assert!(state.documents().is_empty());
        // The deadline survives, reference intact but dangling.
        assert_eq!(state.manual_deadlines().len(), 1);
        assert_eq!(state.manual_deadlines()[0].doc_id.as_deref(), Some(id.as_str()));
        assert_eq!(
            state.activity().events()[0].event_type,
            ActivityEventType::DocumentDeleted
        );
    }

    #[test]
    fn test_manual_deadline_lifecycle() {
        let mut state = fresh_state();
        let id = state
            .add_manual_deadline("Tax Filing", "2030-04-15", None)
            .unwrap()
            .id
            .clone();

        let mut updated = state.manual_deadlines()[0].clone();
        updated.event_name = "Federal Tax Filing".to_string();
        state.update_manual_deadline(updated).unwrap();
        assert_eq!(state.manual_deadlines()[0].event_name, "Federal Tax Filing");

        state.delete_manual_deadline(&id).unwrap();
        assert!(state.manual_deadlines().is_empty());
        assert!(matches!(
            state.delete_manual_deadline(&id),
            Err(CommandError::Validation(_))
        ));
    }

    #[test]
    fn test_manual_deadline_rejects_bad_date() {
        let mut state = fresh_state();
        assert!(matches!(
            state.add_manual_deadline("Event", "04/15/2030", None),
            Err(CommandError::Validation(_))
        ));
    }

    #[test]
    fn test_widget_commands_persist_only_on_change() {
        let mut state = fresh_state();
        state.add_widget("clause-frequency");
        assert!(state.layout().contains("clause-frequency"));
        state.remove_widget("clause-frequency");
        assert!(!state.layout().contains("clause-frequency"));
        // Unknown removals and duplicate adds are quiet no-ops.
        state.remove_widget("clause-frequency");
        state.add_widget("risk-overview");
        assert_eq!(state.layout().widgets()[0], "risk-overview");
    }

    #[test]
    fn test_mutations_persist_after_memory_update() {
        let mut state = fresh_state();
        state
            .save_document("Lease", "text", AnalysisResult::default())
            .unwrap();
        let stored: Vec<StoredDocument> = state.storage.load(DOCUMENTS_KEY).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Lease");
    }
}
