//! # Auth Error Types
//!
//! ## Design Principle
//! Sign-in failure is a single, detail-free error. Whether the email was
//! unknown or the password wrong, the caller sees `AccessDenied`; the
//! distinction would only help someone probing for valid accounts.

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials were rejected. Deliberately carries no detail about
    /// which credential was wrong.
    #[error("Access denied")]
    AccessDenied,

    /// An infrastructure failure (database, hashing) unrelated to the
    /// credentials themselves.
    #[error("Authentication unavailable: {0}")]
    Internal(String),
}

impl From<mercato_db::DbError> for AuthError {
    fn from(err: mercato_db::DbError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
