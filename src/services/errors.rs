use thiserror::Error;

use crate::store::StoreError;

/// Failure taxonomy of the orchestrator operations. Every failure is
/// terminal for the call; nothing retries internally.
#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("You have already submitted this assignment.")]
    DuplicateSubmission,
    #[error("You have already reviewed this course.")]
    DuplicateReview,
    /// `missing` carries the unmet prerequisite course ids; `titles` is the
    /// human-readable enumeration used in the message.
    #[error("Prerequisites not met. Please complete: {titles}")]
    PrerequisiteNotMet { missing: Vec<String>, titles: String },
    #[error("{0}")]
    Validation(String),
    #[error("Email is already in use by another account.")]
    EmailInUse,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
