use thiserror::Error;

/// Import failures in three families: the file itself, the operator's
/// mapping, and the backing store. Each carries the message shown to the
/// operator verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("failed to parse CSV file: {0}")]
    Parse(String),
    #[error("invalid import request: {0}")]
    Validation(String),
    #[error("store rejected batch: {0}")]
    Store(String),
}
