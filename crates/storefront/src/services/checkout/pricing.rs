//! Static price table.
//!
//! The catalog API carries no prices, so the storefront owns them. Prices are
//! resolved once, at the moment a drink is added to the cart; the resolved
//! value is locked into the line from then on.

use cocktail_haven_core::{CurrencyCode, DrinkId, Money};

/// Price for any drink the table does not list, in cents.
pub const DEFAULT_PRICE_CENTS: i64 = 599;

/// Priced drinks, `(drink id, price in cents)`.
const PRICE_TABLE: &[(&str, i64)] = &[
    ("11007", 899), // Margarita
    ("15346", 799), // Sangria
    ("17105", 699), // Singapore Sling
];

/// The unit price for a drink; unrecognized identifiers get the default.
#[must_use]
pub fn price_for(drink_id: &DrinkId) -> Money {
    let cents = PRICE_TABLE
        .iter()
        .find(|(id, _)| *id == drink_id.as_str())
        .map_or(DEFAULT_PRICE_CENTS, |(_, cents)| *cents);
    Money::from_cents(cents, CurrencyCode::USD)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_listed_prices() {
        assert_eq!(price_for(&DrinkId::new("11007")).amount, Decimal::new(899, 2));
        assert_eq!(price_for(&DrinkId::new("15346")).amount, Decimal::new(799, 2));
        assert_eq!(price_for(&DrinkId::new("17105")).amount, Decimal::new(699, 2));
    }

    #[test]
    fn test_unknown_drink_gets_default_price() {
        assert_eq!(
            price_for(&DrinkId::new("99999")).amount,
            Decimal::new(DEFAULT_PRICE_CENTS, 2)
        );
    }
}
