//! Catalog API payload types and their domain conversions.
//!
//! The API numbers its ingredient fields (`strIngredient1` .. `strIngredient15`,
//! with matching `strMeasure` fields) instead of using an array; the raw
//! payload types capture those through a flattened map and the conversion
//! collapses them into [`Ingredient`] records.

use std::collections::HashMap;

use serde::Deserialize;

use cocktail_haven_core::{CategoryName, DrinkId};

/// The API nests every listing under a nullable `drinks` array.
#[derive(Debug, Deserialize)]
pub(crate) struct DrinksEnvelope<T> {
    pub drinks: Option<Vec<T>>,
}

/// Raw category record from `list.php?c=list`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCategory {
    #[serde(rename = "strCategory")]
    pub name: String,
}

impl From<RawCategory> for CategoryName {
    fn from(raw: RawCategory) -> Self {
        Self::new(raw.name)
    }
}

/// A drink as returned by the `filter.php` listing endpoints.
///
/// Listings carry only the identifier, name, and thumbnail; fetch the full
/// [`Drink`] via a detail lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct DrinkSummary {
    #[serde(rename = "idDrink")]
    pub id: DrinkId,
    #[serde(rename = "strDrink")]
    pub name: String,
    #[serde(rename = "strDrinkThumb")]
    pub thumb: Option<String>,
}

/// Maximum number of numbered ingredient fields the API exposes.
pub const MAX_INGREDIENTS: usize = 15;

/// One ingredient of a drink, with its measure when the API provides one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: Option<String>,
}

/// Full drink detail from `lookup.php?i=`.
#[derive(Debug, Clone)]
pub struct Drink {
    pub id: DrinkId,
    pub name: String,
    pub category: Option<String>,
    pub thumb: Option<String>,
    pub ingredients: Vec<Ingredient>,
    instructions: Option<String>,
    instructions_es: Option<String>,
}

impl Drink {
    /// Instruction text for the given locale.
    ///
    /// `es` prefers the Spanish text and falls back to the default; any other
    /// locale gets the default text with the Spanish one as a last resort.
    #[must_use]
    pub fn instructions(&self, locale: &str) -> Option<&str> {
        let (preferred, fallback) = if locale.eq_ignore_ascii_case("es") {
            (&self.instructions_es, &self.instructions)
        } else {
            (&self.instructions, &self.instructions_es)
        };
        preferred.as_deref().or(fallback.as_deref())
    }

    /// The listing-shaped view of this drink, as the cart engine consumes it.
    #[must_use]
    pub fn summary(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumb: self.thumb.clone(),
        }
    }
}

/// Raw drink detail payload. The numbered ingredient and measure fields land
/// in `numbered`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDrink {
    #[serde(rename = "idDrink")]
    pub id: DrinkId,
    #[serde(rename = "strDrink")]
    pub name: String,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strDrinkThumb")]
    pub thumb: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strInstructionsES")]
    pub instructions_es: Option<String>,
    #[serde(flatten)]
    pub numbered: HashMap<String, serde_json::Value>,
}

impl From<RawDrink> for Drink {
    fn from(raw: RawDrink) -> Self {
        let text_field = |key: &str| -> Option<String> {
            raw.numbered
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
        };

        let mut ingredients = Vec::new();
        for i in 1..=MAX_INGREDIENTS {
            let Some(name) = text_field(&format!("strIngredient{i}")) else {
                continue;
            };
            ingredients.push(Ingredient {
                name,
                measure: text_field(&format!("strMeasure{i}")),
            });
        }

        Self {
            id: raw.id,
            name: raw.name,
            category: raw.category,
            thumb: raw.thumb,
            ingredients,
            instructions: raw.instructions,
            instructions_es: raw.instructions_es,
        }
    }
}
