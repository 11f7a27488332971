//! Unified error handling.
//!
//! Provides a unified `AppError` that every front-end flow can surface as a
//! human-readable alert. Internal detail (storage, catalog transport) is
//! logged here and never shown; user-correctable validation messages pass
//! through verbatim.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::{CheckoutError, PaymentError};
use crate::store::{RepositoryError, StorageError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Raw storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart or checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// No session is active for a flow that requires one.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The human-readable alert for this error.
    ///
    /// Internal failures are logged with their detail and reported
    /// generically; user-correctable errors keep their own message.
    #[must_use]
    pub fn alert_message(&self) -> String {
        // Log internal detail the alert will not carry
        if matches!(
            self,
            Self::Config(_) | Self::Storage(_) | Self::Repository(_) | Self::Internal(_)
        ) {
            tracing::error!(error = %self, "Internal error");
        }

        match self {
            Self::Config(_) | Self::Storage(_) | Self::Repository(_) | Self::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            Self::Catalog(e) => {
                tracing::error!(error = %e, "Catalog request failed");
                "Could not reach the cocktail catalog. Please try again.".to_string()
            }
            Self::Auth(e) => auth_alert(e),
            Self::Checkout(e) => checkout_alert(e),
            Self::Unauthorized(_) => "Please log in first.".to_string(),
            Self::NotFound(what) => format!("Not found: {what}."),
        }
    }
}

fn auth_alert(error: &AuthError) -> String {
    match error {
        AuthError::MissingFields => "Please complete all fields.".to_string(),
        AuthError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
        AuthError::InvalidName(field) => {
            let mut message = String::new();
            let mut chars = field.chars();
            if let Some(first) = chars.next() {
                message.extend(first.to_uppercase());
                message.push_str(chars.as_str());
            }
            format!("{message} must contain only letters.")
        }
        AuthError::PasswordMismatch => "Passwords do not match.".to_string(),
        // One message for unknown email and wrong password alike
        AuthError::InvalidCredentials => "Incorrect credentials.".to_string(),
        AuthError::UserAlreadyExists => "This email is already registered.".to_string(),
        AuthError::NotLoggedIn => "You are not logged in.".to_string(),
        AuthError::Repository(_) | AuthError::PasswordHash => {
            tracing::error!(error = %error, "Auth internal error");
            "Something went wrong. Please try again.".to_string()
        }
    }
}

fn checkout_alert(error: &CheckoutError) -> String {
    match error {
        CheckoutError::EmptyCart => "Your cart is empty.".to_string(),
        CheckoutError::UnknownLine(_) => "That item is no longer in your cart.".to_string(),
        CheckoutError::InvalidState => {
            "That action is not available right now.".to_string()
        }
        CheckoutError::Payment(violation) => payment_alert(violation),
        CheckoutError::Repository(e) => {
            tracing::error!(error = %e, "Cart persistence failed");
            "Something went wrong. Please try again.".to_string()
        }
    }
}

/// Payment violations are user-correctable; surface the rule itself.
fn payment_alert(violation: &PaymentError) -> String {
    let message = violation.to_string();
    let mut chars = message.chars();
    chars.next().map_or(message.clone(), |first| {
        format!("{}{}.", first.to_uppercase(), chars.as_str())
    })
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_alert_capitalizes_rule_message() {
        let err = AppError::Checkout(CheckoutError::Payment(PaymentError::InvalidCvv));
        assert_eq!(err.alert_message(), "Please enter a valid CVV (3 digits).");
    }

    #[test]
    fn test_invalid_credentials_alert_is_vague() {
        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.alert_message(), "Incorrect credentials.");
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let err = AppError::Internal("store blew up at /tmp/x".to_string());
        assert_eq!(err.alert_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_invalid_name_alert() {
        let err = AppError::Auth(AuthError::InvalidName("first name"));
        assert_eq!(err.alert_message(), "First name must contain only letters.");
    }

    #[test]
    fn test_empty_cart_alert() {
        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.alert_message(), "Your cart is empty.");
    }
}
