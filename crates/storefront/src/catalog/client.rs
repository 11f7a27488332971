//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP with an explicit per-request timeout. Category
//! lists, drink listings, and drink detail are cached using `moka`
//! (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use cocktail_haven_core::{CategoryName, DrinkId};

use super::CatalogError;
use super::cache::CacheValue;
use super::types::{Drink, DrinkSummary, DrinksEnvelope, RawCategory, RawDrink};
use crate::config::CatalogConfig;

/// The "All" listing has no category filter; the catalog's free tier cannot
/// list every drink at once, so it lists by this ingredient instead.
const ALL_LISTING_INGREDIENT: &str = "Vodka";

/// Client for TheCocktailDB catalog API.
///
/// Provides typed access to categories, drink listings, and drink detail.
/// Responses are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint is not a valid URL or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        // Trailing slash so Url::join keeps the full path
        let endpoint = Url::parse(&format!("{}/", config.endpoint()))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                endpoint,
                cache,
            }),
        })
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = self.inner.endpoint.join(path)?;

        let response = self
            .inner
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        // Decode from text so a malformed body can be logged for diagnosis
        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    /// List the catalog's category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<CategoryName>, CatalogError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories.as_ref().clone());
        }

        let envelope: DrinksEnvelope<RawCategory> =
            self.get_json("list.php", &[("c", "list")]).await?;

        let categories: Vec<CategoryName> = envelope
            .drinks
            .unwrap_or_default()
            .into_iter()
            .map(CategoryName::from)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(Arc::new(categories.clone())))
            .await;

        Ok(categories)
    }

    /// List drinks, optionally filtered by category.
    ///
    /// `None` is the "All" listing, which lists by the Vodka ingredient.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(category = category.map_or("All", CategoryName::as_str)))]
    pub async fn drinks_by_category(
        &self,
        category: Option<&CategoryName>,
    ) -> Result<Vec<DrinkSummary>, CatalogError> {
        let cache_key = format!(
            "drinks:{}",
            category.map_or("all", CategoryName::as_str)
        );

        if let Some(CacheValue::Drinks(drinks)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for drink listing");
            return Ok(drinks.as_ref().clone());
        }

        let query = match category {
            Some(category) => ("c", category.as_str()),
            None => ("i", ALL_LISTING_INGREDIENT),
        };
        let envelope: DrinksEnvelope<DrinkSummary> =
            self.get_json("filter.php", &[query]).await?;

        let drinks = envelope.drinks.unwrap_or_default();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Drinks(Arc::new(drinks.clone())))
            .await;

        Ok(drinks)
    }

    /// Fetch full detail for one drink.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no drink with this
    /// identifier, or an error if the API request fails.
    #[instrument(skip(self), fields(drink_id = %drink_id))]
    pub async fn drink(&self, drink_id: &DrinkId) -> Result<Drink, CatalogError> {
        let cache_key = format!("drink:{drink_id}");

        if let Some(CacheValue::Drink(drink)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for drink");
            return Ok(*drink);
        }

        let envelope: DrinksEnvelope<RawDrink> =
            self.get_json("lookup.php", &[("i", drink_id.as_str())]).await?;

        let raw = envelope
            .drinks
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(format!("Drink not found: {drink_id}")))?;

        let drink = Drink::from(raw);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Drink(Box::new(drink.clone())))
            .await;

        Ok(drink)
    }
}
