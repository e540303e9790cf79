use std::sync::Arc;

use prep_core::Clock;
use prep_core::expiry::{ExpiryStamp, ExpiryWindow};
use prep_core::model::{CompletionLedger, ItemKey, ProblemCategory, ProblemSet};
use prep_core::progress::{self, Progress};
use storage::KeyValueStore;
use storage::keys;

use crate::error::TrackerError;
use crate::persist;

/// Top 100 problem checklist whose stored progress expires after inactivity.
///
/// The deadline slides: every write moves it to `now + ttl`. Loading after the
/// deadline discards the stored ledger and opens a fresh window.
pub struct Top100Tracker {
    store: Arc<dyn KeyValueStore>,
    clock: Clock,
    window: ExpiryWindow,
    problems: ProblemSet,
    ledger: CompletionLedger,
}

impl Top100Tracker {
    pub async fn load(store: Arc<dyn KeyValueStore>, clock: Clock, problems: ProblemSet) -> Self {
        Self::load_with_window(store, clock, ExpiryWindow::nine_months(), problems).await
    }

    pub async fn load_with_window(
        store: Arc<dyn KeyValueStore>,
        clock: Clock,
        window: ExpiryWindow,
        problems: ProblemSet,
    ) -> Self {
        let now = clock.now();
        let stored_ledger = persist::read(store.as_ref(), keys::TOP100_LEDGER).await;
        let stored_expiry = persist::read(store.as_ref(), keys::TOP100_EXPIRY).await;

        let ledger = match window.admit(stored_ledger.as_deref(), stored_expiry.as_deref(), now) {
            Some(ledger) => {
                tracing::debug!(completed = ledger.len(), "loaded top 100 progress");
                ledger
            }
            None => {
                tracing::debug!(
                    had_ledger = stored_ledger.is_some(),
                    "top 100 progress missing or expired; starting a fresh window"
                );
                persist::remove(store.as_ref(), keys::TOP100_LEDGER).await;
                let deadline = window.deadline_from(now);
                persist::write(store.as_ref(), keys::TOP100_EXPIRY, &deadline.to_string()).await;
                CompletionLedger::new()
            }
        };

        Self {
            store,
            clock,
            window,
            problems,
            ledger,
        }
    }

    #[must_use]
    pub fn problems(&self) -> &ProblemSet {
        &self.problems
    }

    #[must_use]
    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    #[must_use]
    pub fn is_completed(&self, key: &str) -> bool {
        self.ledger.is_completed(key)
    }

    /// Replace the clock used for subsequent writes.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// Mark a problem done or not done and refresh the expiry window.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownItem` if `key` names no problem of the set.
    pub async fn set_completed(&mut self, key: &str, completed: bool) -> Result<(), TrackerError> {
        self.ensure_known(key)?;
        self.ledger.set(ItemKey::from(key), completed);
        self.persist().await;
        Ok(())
    }

    /// Flip a problem, refresh the expiry window, and return the new state.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownItem` if `key` names no problem of the set.
    pub async fn toggle(&mut self, key: &str) -> Result<bool, TrackerError> {
        self.ensure_known(key)?;
        let completed = self.ledger.toggle(ItemKey::from(key));
        self.persist().await;
        Ok(completed)
    }

    /// Clear Top 100 progress. The expiry deadline is left as it is.
    pub async fn reset(&mut self) {
        self.ledger.clear();
        persist::remove(self.store.as_ref(), keys::TOP100_LEDGER).await;
        tracing::debug!("top 100 progress reset");
    }

    /// Deadline currently held in the store, if readable.
    pub async fn stored_expiry(&self) -> Option<ExpiryStamp> {
        persist::read(self.store.as_ref(), keys::TOP100_EXPIRY)
            .await
            .and_then(|raw| raw.parse().ok())
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        progress::problem_set_progress(&self.problems, &self.ledger)
    }

    #[must_use]
    pub fn category_progress(&self, name: &str) -> Option<Progress> {
        self.problems
            .category(name)
            .map(|c| progress::category_progress(c, &self.ledger))
    }

    /// Categories to show under `filter` (all when `None`).
    pub fn categories<'a>(&'a self, filter: Option<&'a str>) -> impl Iterator<Item = &'a ProblemCategory> {
        self.problems
            .categories()
            .iter()
            .filter(move |c| filter.is_none_or(|f| f == c.name()))
    }

    fn ensure_known(&self, key: &str) -> Result<(), TrackerError> {
        if self.problems.contains_item(key) {
            Ok(())
        } else {
            Err(TrackerError::UnknownItem(key.to_owned()))
        }
    }

    async fn persist(&self) {
        let store = self.store.as_ref();
        match self.ledger.to_json() {
            Ok(raw) => persist::write(store, keys::TOP100_LEDGER, &raw).await,
            Err(err) => tracing::warn!(error = %err, "could not encode top 100 progress"),
        }
        let deadline = self.window.deadline_from(self.clock.now());
        persist::write(store, keys::TOP100_EXPIRY, &deadline.to_string()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use prep_core::expiry::NINE_MONTHS_MS;
    use prep_core::time::{fixed_clock, fixed_now};
    use storage::InMemoryStore;

    fn problems() -> ProblemSet {
        ProblemSet::new([
            (
                "Arrays",
                vec!["Two Sum".to_owned(), "Two Sum".to_owned(), "Reverse List".to_owned()],
            ),
            ("Graphs", vec!["BFS".to_owned()]),
        ])
    }

    fn store() -> Arc<dyn KeyValueStore> {
        Arc::new(InMemoryStore::new())
    }

    async fn stored_expiry(store: &Arc<dyn KeyValueStore>) -> i64 {
        store
            .get(keys::TOP100_EXPIRY)
            .await
            .unwrap()
            .unwrap()
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn first_load_opens_a_window() {
        let store = store();
        let tracker = Top100Tracker::load(Arc::clone(&store), fixed_clock(), problems()).await;
        assert!(tracker.ledger().is_empty());
        assert_eq!(
            stored_expiry(&store).await,
            fixed_now().timestamp_millis() + NINE_MONTHS_MS
        );
        assert_eq!(
            tracker.stored_expiry().await.map(|s| s.millis()),
            Some(fixed_now().timestamp_millis() + NINE_MONTHS_MS)
        );
    }

    #[tokio::test]
    async fn duplicates_count_once() {
        let mut tracker = Top100Tracker::load(store(), fixed_clock(), problems()).await;
        assert_eq!(tracker.progress(), Progress::new(0, 3));
        tracker.toggle("Arrays-Two Sum").await.unwrap();
        assert_eq!(tracker.category_progress("Arrays"), Some(Progress::new(1, 2)));
        assert_eq!(tracker.progress(), Progress::new(1, 3));
    }

    #[tokio::test]
    async fn expired_ledger_is_purged_on_load() {
        let store = store();
        let past = (fixed_now() - Duration::days(1)).timestamp_millis();
        store
            .set(keys::TOP100_LEDGER, r#"{"Arrays-Two Sum":true}"#)
            .await
            .unwrap();
        store
            .set(keys::TOP100_EXPIRY, &past.to_string())
            .await
            .unwrap();

        let tracker = Top100Tracker::load(Arc::clone(&store), fixed_clock(), problems()).await;

        assert!(tracker.ledger().is_empty());
        assert_eq!(store.get(keys::TOP100_LEDGER).await.unwrap(), None);
        assert_eq!(
            stored_expiry(&store).await,
            fixed_now().timestamp_millis() + NINE_MONTHS_MS
        );
    }

    #[tokio::test]
    async fn live_ledger_is_adopted() {
        let store = store();
        let future = (fixed_now() + Duration::days(10)).timestamp_millis();
        store
            .set(keys::TOP100_LEDGER, r#"{"Graphs-BFS":true}"#)
            .await
            .unwrap();
        store
            .set(keys::TOP100_EXPIRY, &future.to_string())
            .await
            .unwrap();

        let tracker = Top100Tracker::load(Arc::clone(&store), fixed_clock(), problems()).await;
        assert!(tracker.is_completed("Graphs-BFS"));
        assert_eq!(stored_expiry(&store).await, future);
    }

    #[tokio::test]
    async fn every_write_slides_the_deadline() {
        let store = store();
        let mut clock = fixed_clock();
        let mut tracker = Top100Tracker::load(Arc::clone(&store), clock, problems()).await;

        clock.advance(Duration::days(30));
        tracker.set_clock(clock);
        tracker.toggle("Graphs-BFS").await.unwrap();
        let t1 = clock.now_millis();
        assert_eq!(stored_expiry(&store).await, t1 + NINE_MONTHS_MS);

        clock.advance(Duration::days(100));
        tracker.set_clock(clock);
        tracker.set_completed("Arrays-Reverse List", true).await.unwrap();
        let t2 = clock.now_millis();
        assert_eq!(stored_expiry(&store).await, t2 + NINE_MONTHS_MS);
        assert!(t2 > t1);
    }

    #[tokio::test]
    async fn reset_keeps_the_deadline() {
        let store = store();
        let mut tracker = Top100Tracker::load(Arc::clone(&store), fixed_clock(), problems()).await;
        tracker.toggle("Graphs-BFS").await.unwrap();
        let before = stored_expiry(&store).await;

        tracker.reset().await;

        assert!(tracker.ledger().is_empty());
        assert_eq!(store.get(keys::TOP100_LEDGER).await.unwrap(), None);
        assert_eq!(stored_expiry(&store).await, before);
    }

    #[tokio::test]
    async fn short_window_expires_between_sessions() {
        let store = store();
        let window = ExpiryWindow::new(Duration::hours(1));
        let mut clock = fixed_clock();
        let mut tracker =
            Top100Tracker::load_with_window(Arc::clone(&store), clock, window, problems()).await;
        tracker.toggle("Graphs-BFS").await.unwrap();

        clock.advance(Duration::minutes(59));
        let tracker =
            Top100Tracker::load_with_window(Arc::clone(&store), clock, window, problems()).await;
        assert!(tracker.is_completed("Graphs-BFS"));

        clock.advance(Duration::minutes(1));
        let tracker =
            Top100Tracker::load_with_window(Arc::clone(&store), clock, window, problems()).await;
        assert!(tracker.ledger().is_empty());
    }
}
