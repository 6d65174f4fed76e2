use thiserror::Error;

use storefront_core::DomainError;

/// Why a presented token was refused.
///
/// Kept distinct for logging; every kind maps to the same 401 on the wire.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token claims are missing or invalid")]
    InvalidClaims,
}

/// Authentication and authorization failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no account for the given identity")]
    CredentialNotFound,

    #[error("password does not match")]
    PasswordMismatch,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("role does not permit this operation")]
    InsufficientRole,

    /// The password hash primitive failed. Fatal for the operation in progress.
    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("invalid signing secret: {0}")]
    InvalidSecret(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AuthError {
    /// Credential failures the client must not be able to tell apart.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, AuthError::CredentialNotFound | AuthError::PasswordMismatch)
    }
}
