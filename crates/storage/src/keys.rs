//! Store keys shared by every backend.

use prep_core::model::PreferenceScope;

/// Checklist completion ledger (JSON object of key → bool).
pub const CHECKLIST_LEDGER: &str = "completedItems";

/// Most recently imported checklist syllabus (JSON).
pub const CHECKLIST_SYLLABUS: &str = "checklist_syllabus_v1";

/// Top 100 completion ledger (JSON object of key → bool).
pub const TOP100_LEDGER: &str = "top100_completed_items_v1";

/// Top 100 expiry deadline (epoch milliseconds, decimal).
pub const TOP100_EXPIRY: &str = "top100_completed_items_expiry_v1";

#[must_use]
pub fn preference_site(scope: PreferenceScope) -> &'static str {
    match scope {
        PreferenceScope::Checklist => "site_preference_selected_checklist_v1",
        PreferenceScope::Top100 => "site_preference_selected_top100_v1",
    }
}

#[must_use]
pub fn preference_custom(scope: PreferenceScope) -> &'static str {
    match scope {
        PreferenceScope::Checklist => "site_preference_custom_checklist_v1",
        PreferenceScope::Top100 => "site_preference_custom_top100_v1",
    }
}
