#![forbid(unsafe_code)]

pub mod app_services;
pub mod checklist;
pub mod error;
mod persist;
pub mod preferences;
pub mod top100;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use checklist::ChecklistTracker;
pub use error::{AppServicesError, ImportError, TrackerError};
pub use preferences::PreferenceService;
pub use top100::Top100Tracker;
