use std::sync::Arc;

use prep_core::model::{PreferenceScope, Site, SitePreference};
use prep_core::search::{self, SearchMode};
use storage::KeyValueStore;
use storage::keys;

use crate::persist;

/// Per-scope search-site preferences, loaded once and written on every change.
///
/// The two scopes never affect each other.
pub struct PreferenceService {
    store: Arc<dyn KeyValueStore>,
    checklist: SitePreference,
    top100: SitePreference,
}

impl PreferenceService {
    /// Load both scopes; missing or invalid values keep their defaults.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let checklist = load_scope(store.as_ref(), PreferenceScope::Checklist).await;
        let top100 = load_scope(store.as_ref(), PreferenceScope::Top100).await;
        Self {
            store,
            checklist,
            top100,
        }
    }

    #[must_use]
    pub fn get(&self, scope: PreferenceScope) -> &SitePreference {
        match scope {
            PreferenceScope::Checklist => &self.checklist,
            PreferenceScope::Top100 => &self.top100,
        }
    }

    pub async fn set_site(&mut self, scope: PreferenceScope, site: Site) {
        self.slot_mut(scope).set_site(site);
        self.persist(scope).await;
    }

    pub async fn set_custom(&mut self, scope: PreferenceScope, custom: impl Into<String>) {
        self.slot_mut(scope).set_custom(custom);
        self.persist(scope).await;
    }

    /// Search link for an item shown on the page owning `scope`.
    #[must_use]
    pub fn search_link(&self, scope: PreferenceScope, text: &str) -> String {
        search::search_link(text, SearchMode::from(scope), self.get(scope))
    }

    fn slot_mut(&mut self, scope: PreferenceScope) -> &mut SitePreference {
        match scope {
            PreferenceScope::Checklist => &mut self.checklist,
            PreferenceScope::Top100 => &mut self.top100,
        }
    }

    async fn persist(&self, scope: PreferenceScope) {
        let pref = self.get(scope);
        let store = self.store.as_ref();
        persist::write(store, keys::preference_site(scope), pref.site().as_str()).await;
        persist::write(store, keys::preference_custom(scope), pref.custom()).await;
    }
}

async fn load_scope(store: &dyn KeyValueStore, scope: PreferenceScope) -> SitePreference {
    let site = persist::read(store, keys::preference_site(scope)).await;
    let custom = persist::read(store, keys::preference_custom(scope)).await;
    if let Some(raw) = site.as_deref().filter(|raw| raw.parse::<Site>().is_err()) {
        tracing::debug!(%scope, raw, "ignoring unknown stored site");
    }
    SitePreference::from_persisted(site.as_deref(), custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryStore;

    fn store() -> Arc<dyn KeyValueStore> {
        Arc::new(InMemoryStore::new())
    }

    #[tokio::test]
    async fn defaults_when_nothing_is_stored() {
        let prefs = PreferenceService::load(store()).await;
        for scope in PreferenceScope::ALL {
            assert_eq!(prefs.get(scope), &SitePreference::default());
        }
    }

    #[tokio::test]
    async fn invalid_stored_site_is_ignored() {
        let store = store();
        store
            .set(keys::preference_site(PreferenceScope::Checklist), "bing")
            .await
            .unwrap();
        store
            .set(keys::preference_custom(PreferenceScope::Checklist), "docs")
            .await
            .unwrap();
        let prefs = PreferenceService::load(store).await;
        let pref = prefs.get(PreferenceScope::Checklist);
        assert_eq!(pref.site(), Site::LeetCode);
        assert_eq!(pref.custom(), "docs");
    }

    #[tokio::test]
    async fn each_change_persists_both_fields_of_its_scope_only() {
        let store = store();
        let mut prefs = PreferenceService::load(Arc::clone(&store)).await;
        prefs.set_site(PreferenceScope::Top100, Site::Other).await;

        assert_eq!(
            store
                .get(keys::preference_site(PreferenceScope::Top100))
                .await
                .unwrap()
                .as_deref(),
            Some("other")
        );
        assert_eq!(
            store
                .get(keys::preference_custom(PreferenceScope::Top100))
                .await
                .unwrap()
                .as_deref(),
            Some("")
        );
        assert_eq!(
            store
                .get(keys::preference_site(PreferenceScope::Checklist))
                .await
                .unwrap(),
            None
        );

        prefs.set_custom(PreferenceScope::Top100, "neetcode").await;
        let reloaded = PreferenceService::load(store).await;
        assert_eq!(
            reloaded.get(PreferenceScope::Top100),
            &SitePreference::new(Site::Other, "neetcode")
        );
        assert_eq!(
            reloaded.get(PreferenceScope::Checklist),
            &SitePreference::default()
        );
    }

    #[tokio::test]
    async fn links_follow_scope_mode_and_site() {
        let mut prefs = PreferenceService::load(store()).await;
        prefs.set_site(PreferenceScope::Checklist, Site::HackerRank).await;
        assert_eq!(
            prefs.search_link(PreferenceScope::Checklist, "Graphs"),
            "https://www.google.com/search?q=Explain%20the%20concept%20of%20Graphs%20HackerRank"
        );
        assert_eq!(
            prefs.search_link(PreferenceScope::Top100, "Two Sum"),
            "https://www.google.com/search?q=Problem%20Two%20Sum%20LeetCode"
        );
    }
}
