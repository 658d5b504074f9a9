use thiserror::Error;

/// Errors raised while turning presentation-layer text into typed values.
///
/// Store operations never produce these; they only come from parsing
/// sort keys, field names, enum text and JSON drafts.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid status: {0} (expected active, inactive or graduated)")]
    InvalidStatus(String),
    #[error("Invalid gender: {0} (expected male, female or other)")]
    InvalidGender(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
