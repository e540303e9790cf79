use thiserror::Error;

/// Errors raised while reading a syllabus or problem-set document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyllabusError {
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("document must be a JSON object keyed by section name")]
    NotAnObject,
}

/// A persisted ledger value that could not be decoded.
#[derive(Debug, Error)]
#[error("stored completion ledger is corrupt: {0}")]
pub struct LedgerError(#[from] serde_json::Error);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown search site `{raw}`")]
pub struct ParseSiteError {
    pub raw: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown preference scope `{raw}` (expected `checklist` or `top100`)")]
pub struct ParseScopeError {
    pub raw: String,
}
