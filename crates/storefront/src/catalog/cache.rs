//! Cache types for catalog API responses.

use std::sync::Arc;

use cocktail_haven_core::CategoryName;

use super::types::{Drink, DrinkSummary};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Arc<Vec<CategoryName>>),
    Drinks(Arc<Vec<DrinkSummary>>),
    Drink(Box<Drink>),
}
