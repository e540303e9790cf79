use std::sync::Arc;

use prep_core::model::{CompletionLedger, ItemKey, NamedSection, SummarySection, Syllabus};
use prep_core::progress::{self, Progress};
use storage::KeyValueStore;
use storage::keys;

use crate::error::{ImportError, TrackerError};
use crate::persist;

/// Syllabus checklist with its persisted completion ledger.
///
/// Owns the only in-memory copy of the ledger; every mutation is written to
/// the store before the call returns.
pub struct ChecklistTracker {
    store: Arc<dyn KeyValueStore>,
    syllabus: Syllabus,
    ledger: CompletionLedger,
}

impl ChecklistTracker {
    /// Load the ledger (and any previously imported syllabus) from the store.
    ///
    /// Falls back to `default_syllabus` and an empty ledger when stored values
    /// are missing, unreadable, or corrupt.
    pub async fn load(store: Arc<dyn KeyValueStore>, default_syllabus: Syllabus) -> Self {
        let syllabus = match persist::read(store.as_ref(), keys::CHECKLIST_SYLLABUS).await {
            Some(raw) => Syllabus::from_json_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "stored syllabus is unreadable; using bundled syllabus");
                default_syllabus
            }),
            None => default_syllabus,
        };

        let ledger = match persist::read(store.as_ref(), keys::CHECKLIST_LEDGER).await {
            Some(raw) => CompletionLedger::from_json(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "discarding checklist progress");
                CompletionLedger::new()
            }),
            None => CompletionLedger::new(),
        };
        tracing::debug!(completed = ledger.len(), "loaded checklist progress");

        Self {
            store,
            syllabus,
            ledger,
        }
    }

    #[must_use]
    pub fn syllabus(&self) -> &Syllabus {
        &self.syllabus
    }

    #[must_use]
    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    #[must_use]
    pub fn is_completed(&self, key: &str) -> bool {
        self.ledger.is_completed(key)
    }

    /// Mark an item done or not done.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownItem` if `key` names no item of the current syllabus.
    pub async fn set_completed(&mut self, key: &str, completed: bool) -> Result<(), TrackerError> {
        self.ensure_known(key)?;
        self.ledger.set(ItemKey::from(key), completed);
        self.persist_ledger().await;
        Ok(())
    }

    /// Flip an item and return its new state.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownItem` if `key` names no item of the current syllabus.
    pub async fn toggle(&mut self, key: &str) -> Result<bool, TrackerError> {
        self.ensure_known(key)?;
        let completed = self.ledger.toggle(ItemKey::from(key));
        self.persist_ledger().await;
        Ok(completed)
    }

    /// Clear all checklist progress, in memory and in the store.
    pub async fn reset(&mut self) {
        self.ledger.clear();
        persist::remove(self.store.as_ref(), keys::CHECKLIST_LEDGER).await;
        tracing::debug!("checklist progress reset");
    }

    /// Replace the syllabus with an imported document and clear progress.
    ///
    /// On failure nothing changes, neither in memory nor in the store.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Invalid` if `text` is not a JSON object.
    pub async fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let syllabus = Syllabus::from_json_str(text)?;
        self.syllabus = syllabus;
        self.ledger.clear();
        persist::write(self.store.as_ref(), keys::CHECKLIST_SYLLABUS, text).await;
        self.persist_ledger().await;
        tracing::debug!(
            sections = self.syllabus.sections().len(),
            "imported checklist syllabus"
        );
        Ok(())
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        progress::syllabus_progress(&self.syllabus, &self.ledger)
    }

    #[must_use]
    pub fn section_progress(&self, section_key: &str) -> Option<Progress> {
        self.syllabus
            .section(section_key)
            .filter(|s| !s.section.is_summary())
            .map(|s| progress::section_progress(s, &self.ledger))
    }

    /// Names usable as a section filter; the summary is never one of them.
    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        self.syllabus
            .checkable_sections()
            .map(|s| s.key.as_str())
            .collect()
    }

    /// Checkable sections to show under `filter` (all when `None`).
    pub fn sections<'a>(&'a self, filter: Option<&'a str>) -> impl Iterator<Item = &'a NamedSection> {
        self.syllabus
            .checkable_sections()
            .filter(move |s| filter.is_none_or(|f| f == s.key))
    }

    /// The summary is shown only when no section filter is active.
    #[must_use]
    pub fn summary(&self, filter: Option<&str>) -> Option<&SummarySection> {
        if filter.is_some() {
            return None;
        }
        self.syllabus.summary()
    }

    fn ensure_known(&self, key: &str) -> Result<(), TrackerError> {
        if self.syllabus.contains_item(key) {
            Ok(())
        } else {
            Err(TrackerError::UnknownItem(key.to_owned()))
        }
    }

    async fn persist_ledger(&self) {
        match self.ledger.to_json() {
            Ok(raw) => persist::write(self.store.as_ref(), keys::CHECKLIST_LEDGER, &raw).await,
            Err(err) => tracing::warn!(error = %err, "could not encode checklist progress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryStore;

    const SYLLABUS: &str = r#"{
        "1_Basics": { "Topics": ["Variables", "Loops"] },
        "3_DSA": {
            "DataStructures": { "Stack": ["Push", "Pop"] },
            "Algorithms": ["Sorting"]
        },
        "SummaryChecklist": { "Basics": "Know them" }
    }"#;

    async fn tracker() -> (ChecklistTracker, Arc<dyn KeyValueStore>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let syllabus = Syllabus::from_json_str(SYLLABUS).unwrap();
        (ChecklistTracker::load(Arc::clone(&store), syllabus).await, store)
    }

    #[tokio::test]
    async fn toggles_persist_immediately() {
        let (mut tracker, store) = tracker().await;
        assert!(tracker.toggle("1_Basics-Loops").await.unwrap());
        assert_eq!(
            store.get(keys::CHECKLIST_LEDGER).await.unwrap().as_deref(),
            Some(r#"{"1_Basics-Loops":true}"#)
        );
        assert_eq!(tracker.progress(), Progress::new(1, 5));
    }

    #[tokio::test]
    async fn unknown_items_are_rejected() {
        let (mut tracker, store) = tracker().await;
        let err = tracker.toggle("1_Basics-Recursion").await.unwrap_err();
        assert!(matches!(err, TrackerError::UnknownItem(key) if key == "1_Basics-Recursion"));
        assert_eq!(store.get(keys::CHECKLIST_LEDGER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reload_restores_ledger() {
        let (mut tracker, store) = tracker().await;
        tracker
            .set_completed("3_DSA-DataStructures-Stack-Push", true)
            .await
            .unwrap();
        let syllabus = Syllabus::from_json_str(SYLLABUS).unwrap();
        let reloaded = ChecklistTracker::load(store, syllabus).await;
        assert!(reloaded.is_completed("3_DSA-DataStructures-Stack-Push"));
        assert_eq!(reloaded.section_progress("3_DSA"), Some(Progress::new(1, 3)));
    }

    #[tokio::test]
    async fn mixed_section_lists_are_all_checkable() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let syllabus = Syllabus::from_json_str(
            r#"{"2_OOP": { "Topics": ["Classes"], "KeyConcepts": ["Inheritance"] }}"#,
        )
        .unwrap();
        let mut tracker = ChecklistTracker::load(store, syllabus).await;
        assert!(tracker.toggle("2_OOP-KeyConcepts-Inheritance").await.unwrap());
        assert_eq!(tracker.section_progress("2_OOP"), Some(Progress::new(1, 2)));
    }

    #[tokio::test]
    async fn corrupt_ledger_loads_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        store.set(keys::CHECKLIST_LEDGER, "{oops").await.unwrap();
        let syllabus = Syllabus::from_json_str(SYLLABUS).unwrap();
        let tracker = ChecklistTracker::load(store, syllabus).await;
        assert!(tracker.ledger().is_empty());
    }

    #[tokio::test]
    async fn filter_hides_summary_and_other_sections() {
        let (tracker, _) = tracker().await;
        assert_eq!(tracker.section_names(), ["1_Basics", "3_DSA"]);
        let shown: Vec<_> = tracker.sections(Some("3_DSA")).map(|s| s.key.as_str()).collect();
        assert_eq!(shown, ["3_DSA"]);
        assert!(tracker.summary(Some("3_DSA")).is_none());
        assert!(tracker.summary(None).is_some());
        assert_eq!(tracker.sections(None).count(), 2);
        assert_eq!(tracker.section_progress("SummaryChecklist"), None);
    }

    #[tokio::test]
    async fn import_replaces_syllabus_and_clears_progress() {
        let (mut tracker, store) = tracker().await;
        tracker.toggle("1_Basics-Variables").await.unwrap();

        tracker
            .import_json(
                r#"{"SoftwareEngineeringInterviewPreparationSyllabus": {
                    "1_Basics": { "Topics": ["Variables", "Functions"] }
                }}"#,
            )
            .await
            .unwrap();

        assert_eq!(tracker.progress(), Progress::new(0, 2));
        assert!(!tracker.is_completed("1_Basics-Variables"));
        assert_eq!(
            store.get(keys::CHECKLIST_LEDGER).await.unwrap().as_deref(),
            Some("{}")
        );
        assert!(store.get(keys::CHECKLIST_SYLLABUS).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn malformed_import_changes_nothing() {
        let (mut tracker, store) = tracker().await;
        tracker.toggle("1_Basics-Variables").await.unwrap();
        let before_syllabus = tracker.syllabus().clone();
        let before_ledger = tracker.ledger().clone();

        assert!(tracker.import_json("{ not json").await.is_err());
        assert!(tracker.import_json("[\"a\"]").await.is_err());

        assert_eq!(tracker.syllabus(), &before_syllabus);
        assert_eq!(tracker.ledger(), &before_ledger);
        assert_eq!(store.get(keys::CHECKLIST_SYLLABUS).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reset_clears_memory_and_store() {
        let (mut tracker, store) = tracker().await;
        tracker.toggle("3_DSA-Algorithms-Sorting").await.unwrap();
        tracker.reset().await;
        assert!(tracker.ledger().is_empty());
        assert_eq!(store.get(keys::CHECKLIST_LEDGER).await.unwrap(), None);
    }
}
