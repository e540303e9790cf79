use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::model::ids::ItemKey;

/// Which items the user has marked done.
///
/// Only completed keys are held; a missing key means "not completed", so
/// marking an item incomplete removes it. Serialized as a JSON object of
/// key → `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<ItemKey, bool>",
    into = "BTreeMap<ItemKey, bool>"
)]
pub struct CompletionLedger {
    completed: BTreeSet<ItemKey>,
}

impl CompletionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a persisted ledger. `false` entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if `raw` is not a JSON object of booleans.
    pub fn from_json(raw: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode for persistence.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if serialization fails.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn is_completed(&self, key: &str) -> bool {
        self.completed.contains(key)
    }

    pub fn set(&mut self, key: ItemKey, completed: bool) {
        if completed {
            self.completed.insert(key);
        } else {
            self.completed.remove(key.as_str());
        }
    }

    /// Flip an item and return its new state.
    pub fn toggle(&mut self, key: ItemKey) -> bool {
        let now_completed = !self.is_completed(key.as_str());
        self.set(key, now_completed);
        now_completed
    }

    pub fn clear(&mut self) {
        self.completed.clear();
    }

    /// Number of completed keys, including keys not present in any syllabus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

impl From<BTreeMap<ItemKey, bool>> for CompletionLedger {
    fn from(entries: BTreeMap<ItemKey, bool>) -> Self {
        Self {
            completed: entries
                .into_iter()
                .filter_map(|(key, done)| done.then_some(key))
                .collect(),
        }
    }
}

impl From<CompletionLedger> for BTreeMap<ItemKey, bool> {
    fn from(ledger: CompletionLedger) -> Self {
        ledger.completed.into_iter().map(|key| (key, true)).collect()
    }
}
