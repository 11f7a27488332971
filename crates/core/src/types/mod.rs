//! Core types for Cocktail Haven.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod payment;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use payment::PaymentMethodKind;
pub use price::{CurrencyCode, Money};
