//! Submission service errors.

use thiserror::Error;

/// Submission service error variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The listing was refused, e.g. by moderation.
    #[error("listing rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("submission service unavailable")]
    Unavailable,
}
