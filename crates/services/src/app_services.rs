use std::sync::Arc;

use prep_core::model::{ProblemSet, Syllabus};
use storage::repository::{KeyValueStore, Storage};

use crate::Clock;
use crate::checklist::ChecklistTracker;
use crate::error::AppServicesError;
use crate::preferences::PreferenceService;
use crate::top100::Top100Tracker;

/// Assembles the trackers over one shared store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    storage: Storage,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self { clock, storage })
    }

    /// Build services over a process-local store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self {
            clock,
            storage: Storage::in_memory(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.storage.kv)
    }

    pub async fn checklist(&self, default_syllabus: Syllabus) -> ChecklistTracker {
        ChecklistTracker::load(self.store(), default_syllabus).await
    }

    /// Load the Top 100 tracker, applying the expiry policy.
    pub async fn top100(&self, problems: ProblemSet) -> Top100Tracker {
        Top100Tracker::load(self.store(), self.clock, problems).await
    }

    pub async fn preferences(&self) -> PreferenceService {
        PreferenceService::load(self.store()).await
    }
}
