//! Store access that degrades instead of failing.

use storage::KeyValueStore;

/// Read `key`, treating any storage failure as an absent value.
pub(crate) async fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "storage read failed; using default");
            None
        }
    }
}

pub(crate) async fn write(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value).await {
        tracing::warn!(key, error = %err, "storage write failed; change kept in memory only");
    }
}

pub(crate) async fn remove(store: &dyn KeyValueStore, key: &str) {
    if let Err(err) = store.remove(key).await {
        tracing::warn!(key, error = %err, "storage remove failed");
    }
}
