use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures of the record stores and input checks.
///
/// Every variant has a fixed HTTP meaning in the API layer: `Validation` and
/// `InvalidId` are client mistakes, `NotFound` a missing record and
/// `Conflict` a uniqueness clash such as a reused email.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
