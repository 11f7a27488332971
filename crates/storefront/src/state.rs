//! Application state shared across flows.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::HavenConfig;
use crate::error::AppError;
use crate::store::Store;

/// Application state shared across all flows.
///
/// This is the explicit session context: everything a flow needs - config,
/// the persistent store, the catalog client - travels through it, never
/// through globals. Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: HavenConfig,
    store: Store,
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Opens (creating if needed) the persistent store under the configured
    /// data directory and builds the catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created or the
    /// catalog endpoint configuration is invalid.
    pub async fn new(config: HavenConfig) -> Result<Self, AppError> {
        let store = Store::open(&config.data_dir).await?;
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &HavenConfig {
        &self.inner.config
    }

    /// Get a reference to the persistent store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
