//! TheCocktailDB catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON endpoints under `/{version}/{key}/`: `list.php` for
//!   categories, `filter.php` for drink listings, `lookup.php` for detail
//! - The catalog is source of truth - no local sync, direct API calls
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//! - Every request carries an explicit timeout; a hung call fails instead of
//!   leaving the caller in a loading state forever
//!
//! # Example
//!
//! ```rust,ignore
//! use cocktail_haven_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! // Browse
//! let categories = client.categories().await?;
//! let drinks = client.drinks_by_category(None).await?; // the "All" listing
//!
//! // Inspect one drink
//! let drink = client.drink(&drinks[0].id).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{Drink, DrinkSummary, Ingredient};

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, non-success status).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog endpoint URL is malformed.
    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build catalog HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The requested entity does not exist in the catalog.
    #[error("not found: {0}")]
    NotFound(String),
}
