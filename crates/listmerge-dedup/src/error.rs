use thiserror::Error;

/// Errors raised by the duplicate engine.
///
/// A cancelled search is not an error; see [`crate::SearchOutcome::complete`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DedupError {
    /// Invalid search criteria, reported before any scan begins.
    #[error("invalid search criteria: {0}")]
    Configuration(String),

    /// An operation was called on a group in the wrong state.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

pub type Result<T> = std::result::Result<T, DedupError>;
