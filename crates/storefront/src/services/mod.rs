//! Application services.
//!
//! - [`auth`] - registration, login, and the active session identity
//! - [`checkout`] - the cart & checkout engine
//! - [`invoice`] - invoice document rendering

pub mod auth;
pub mod checkout;
pub mod invoice;
