//! Checkout error types.

use thiserror::Error;

use cocktail_haven_core::LineId;

use crate::store::RepositoryError;

/// Errors raised by the cart & checkout engine.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was requested for an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// No cart line has the given identity.
    #[error("no cart line with id {0}")]
    UnknownLine(LineId),

    /// The operation is not valid in the current checkout state.
    #[error("operation not valid in the current checkout state")]
    InvalidState,

    /// A payment field failed validation.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Persisting the cart failed; the in-memory cart was left unchanged.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Payment validation failures, one per rule.
///
/// Validation short-circuits: the first failing rule is reported alone, in
/// the order the form presents the fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("please enter a valid card number (16 digits)")]
    InvalidCardNumber,

    #[error("please select an expiration date")]
    MissingExpirationDate,

    #[error("expiration date must be MM/YYYY")]
    MalformedExpirationDate,

    #[error("expiration date cannot be in the past")]
    ExpiredCard,

    #[error("please enter a valid CVV (3 digits)")]
    InvalidCvv,

    #[error("please enter a valid PayPal email")]
    InvalidPaypalEmail,

    #[error("please enter a valid bank account number (at least 10 digits)")]
    InvalidBankAccount,

    #[error("bank account number must be at most 20 digits")]
    BankAccountTooLong,
}
