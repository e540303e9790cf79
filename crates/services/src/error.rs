//! Shared error types for the services crate.
//!
//! Storage failures never appear here: trackers log them and fall back to
//! empty or default state.

use thiserror::Error;

use prep_core::error::SyllabusError;
use storage::sqlite::SqliteInitError;

/// Errors emitted when importing a replacement syllabus.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("invalid syllabus file: {0}")]
    Invalid(#[from] SyllabusError),
}

/// Errors emitted by the checklist and Top 100 trackers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("no checkable item with key `{0}`")]
    UnknownItem(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
