//! Cart repository over the key-value store.

use super::{RepositoryError, Store, keys};
use crate::models::cart::Cart;

/// Repository for the single persisted cart.
pub struct CartRepository<'a> {
    store: &'a Store,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Load the persisted cart, or an empty cart when none is stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the blob cannot be read.
    pub async fn load(&self) -> Result<Cart, RepositoryError> {
        Ok(self
            .store
            .get::<Cart>(keys::CART)
            .await?
            .unwrap_or_default())
    }

    /// Replace the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` on write failure.
    pub async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        self.store.set(keys::CART, cart).await?;
        Ok(())
    }

    /// Delete the cart key entirely (checkout's terminal clear).
    ///
    /// This removes the key rather than writing an empty array, matching the
    /// stored-blob contract: after a confirmed payment the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` on deletion failure.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::CART).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use cocktail_haven_core::{DrinkId, LineId};

    use super::*;
    use crate::models::cart::CartLine;

    #[tokio::test]
    async fn test_load_missing_cart_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let repo = CartRepository::new(&store);

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let repo = CartRepository::new(&store);

        let mut cart = Cart::new();
        cart.push(CartLine {
            line_id: LineId::generate(),
            drink_id: DrinkId::new("17105"),
            name: "Singapore Sling".to_string(),
            thumb: None,
            price: Decimal::new(699, 2),
            quantity: 2,
        });
        repo.save(&cart).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        let first = loaded.lines().first().unwrap();
        assert_eq!(first.name, "Singapore Sling");
        assert_eq!(first.quantity, 2);
    }

    #[tokio::test]
    async fn test_clear_removes_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let repo = CartRepository::new(&store);

        repo.save(&Cart::new()).await.unwrap();
        assert!(store.contains(keys::CART).await.unwrap());

        repo.clear().await.unwrap();
        assert!(!store.contains(keys::CART).await.unwrap());
    }
}
