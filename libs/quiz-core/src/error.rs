//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using ConsolidateError.
pub type Result<T> = std::result::Result<T, ConsolidateError>;

/// Errors that can occur while consolidating a directory group.
///
/// Parsing never fails (malformed markdown degrades to warnings), so the
/// library surface only errors on impossible consolidation inputs.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    #[error("no documents to consolidate")]
    EmptyGroup,
}
