//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults point at the public TheCocktailDB
//! test instance and a `.haven` data directory under the working directory.
//!
//! - `HAVEN_DATA_DIR` - Directory for persisted key-value blobs (default: `.haven`)
//! - `HAVEN_INVOICE_DIR` - Directory for generated invoices (default: `<data dir>/invoices`)
//! - `HAVEN_LOCALE` - Preferred locale for drink instructions (default: `es`)
//! - `COCKTAILDB_BASE_URL` - Catalog API base (default: `https://www.thecocktaildb.com/api/json`)
//! - `COCKTAILDB_API_VERSION` - Catalog API version segment (default: `v1`)
//! - `COCKTAILDB_API_KEY` - Catalog API key path segment (default: `1`, the public test key)
//! - `COCKTAILDB_TIMEOUT_SECS` - Catalog request timeout in seconds (default: `10`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct HavenConfig {
    /// Directory holding the persisted key-value store.
    pub data_dir: PathBuf,
    /// Directory where generated invoices are written.
    pub invoice_dir: PathBuf,
    /// Preferred locale for drink instructions (`es` falls back to the
    /// default text when no translation exists).
    pub locale: String,
    /// Catalog API configuration.
    pub catalog: CatalogConfig,
}

/// TheCocktailDB catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL, without version or key segments.
    pub base_url: String,
    /// API version path segment (e.g., `v1`).
    pub api_version: String,
    /// API key path segment (`1` is the public test key).
    pub api_key: String,
    /// Per-request timeout. A hung catalog call fails instead of leaving the
    /// caller waiting indefinitely.
    pub timeout: Duration,
}

impl HavenConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("HAVEN_DATA_DIR", ".haven"));
        let invoice_dir = get_optional_env("HAVEN_INVOICE_DIR")
            .map_or_else(|| data_dir.join("invoices"), PathBuf::from);
        let locale = get_env_or_default("HAVEN_LOCALE", "es");

        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            data_dir,
            invoice_dir,
            locale,
            catalog,
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = get_env_or_default("COCKTAILDB_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("COCKTAILDB_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url: get_env_or_default(
                "COCKTAILDB_BASE_URL",
                "https://www.thecocktaildb.com/api/json",
            ),
            api_version: get_env_or_default("COCKTAILDB_API_VERSION", "v1"),
            api_key: get_env_or_default("COCKTAILDB_API_KEY", "1"),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The fully-qualified endpoint prefix, e.g.
    /// `https://www.thecocktaildb.com/api/json/v1/1`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.api_key
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let catalog = CatalogConfig {
            base_url: "https://www.thecocktaildb.com/api/json/".to_string(),
            api_version: "v1".to_string(),
            api_key: "1".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(
            catalog.endpoint(),
            "https://www.thecocktaildb.com/api/json/v1/1"
        );
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let catalog = CatalogConfig {
            base_url: "http://localhost:8080/api/json".to_string(),
            api_version: "v2".to_string(),
            api_key: "9973533".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(catalog.endpoint(), "http://localhost:8080/api/json/v2/9973533");
    }
}
