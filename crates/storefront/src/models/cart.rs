//! Cart and cart line models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cocktail_haven_core::{DrinkId, LineId};

/// One catalog item instance in the cart.
///
/// Stored under the `cart` key as an element of a JSON array. Field names
/// match the stored blob (`idDrink`, `strDrink`, `strDrinkThumb`, `price`,
/// `quantity`); `lineId` is generated on insertion and defaulted when loading
/// blobs that predate it.
///
/// The unit price is fixed at insertion time from the price table and never
/// re-resolved, so a later price-table change cannot reprice lines already in
/// the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable identity for this line, independent of its position.
    #[serde(rename = "lineId", default)]
    pub line_id: LineId,
    /// Catalog identifier of the drink.
    #[serde(rename = "idDrink")]
    pub drink_id: DrinkId,
    /// Display name, passed through from the catalog.
    #[serde(rename = "strDrink")]
    pub name: String,
    /// Thumbnail image reference, passed through from the catalog.
    #[serde(rename = "strDrinkThumb", default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    /// Unit price, locked in at insertion. Serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Always >= 1 while the line is in the cart; blobs without the field
    /// load as quantity 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CartLine {
    /// The line total, `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The cart: an ordered sequence of lines, insertion order = display order.
///
/// Serialized transparently as the JSON array the `cart` blob holds. All
/// mutation goes through the checkout engine; this type only exposes reads
/// and the primitive edits the engine composes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines, in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Find a line by its stable identity.
    #[must_use]
    pub fn line(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.line_id == line_id)
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub(crate) fn line_mut(&mut self, line_id: LineId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.line_id == line_id)
    }

    /// Remove and return the line with the given identity.
    pub(crate) fn remove(&mut self, line_id: LineId) -> Option<CartLine> {
        let position = self.lines.iter().position(|line| line.line_id == line_id)?;
        Some(self.lines.remove(position))
    }
}
