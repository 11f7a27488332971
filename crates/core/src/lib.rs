//! Cocktail Haven Core - Shared types library.
//!
//! This crate provides common types used across all Cocktail Haven components:
//! - `storefront` - The client application library (catalog, cart, checkout)
//! - `cli` - The `haven` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   payment methods

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
