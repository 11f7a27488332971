//! Authentication error types.

use thiserror::Error;

use crate::store::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field is empty.
    #[error("please complete all fields")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] cocktail_haven_core::EmailError),

    /// A name field contains something other than letters.
    #[error("{0} must contain only letters")]
    InvalidName(&'static str),

    /// Password and confirmation do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Invalid credentials (wrong password or user not found).
    ///
    /// Deliberately does not distinguish the two, to avoid confirming which
    /// emails have accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// No session identity is active.
    #[error("not logged in")]
    NotLoggedIn,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
