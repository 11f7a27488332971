//! Cart commands.

use cocktail_haven_core::{DrinkId, LineId, Money};
use cocktail_haven_storefront::error::AppError;
use cocktail_haven_storefront::models::cart::Cart;
use cocktail_haven_storefront::services::checkout::{CheckoutEngine, QuantityChange};
use cocktail_haven_storefront::state::AppState;

use super::{confirm, require_session};

/// Resolve a 1-based line number from `cart show` to the line's stable
/// identity.
fn resolve_line(cart: &Cart, number: usize) -> Result<LineId, AppError> {
    number
        .checked_sub(1)
        .and_then(|index| cart.lines().get(index))
        .map(|line| line.line_id)
        .ok_or_else(|| AppError::NotFound(format!("cart line {number}")))
}

/// Print the cart with line numbers and the totals block.
pub async fn show(state: &AppState) -> Result<(), AppError> {
    require_session(state).await?;

    let engine = CheckoutEngine::load(state.store()).await?;
    print_cart(&engine);
    Ok(())
}

pub(crate) fn print_cart(engine: &CheckoutEngine<'_>) {
    let cart = engine.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for (index, line) in cart.lines().iter().enumerate() {
        println!(
            "{:>2}. {:<30} {} x {}",
            index + 1,
            line.name,
            Money::usd(line.price),
            line.quantity
        );
    }

    let totals = engine.totals();
    println!();
    println!("Subtotal: {}", Money::usd(totals.subtotal));
    println!("Tax (12%): {}", Money::usd(totals.tax));
    println!("Total: {}", Money::usd(totals.total));
}

/// Add a drink to the cart as a new line at quantity 1.
pub async fn add(state: &AppState, drink_id: &str) -> Result<(), AppError> {
    require_session(state).await?;

    // Resolve the drink through the catalog so the line carries its real
    // name and thumbnail.
    let drink = state.catalog().drink(&DrinkId::new(drink_id)).await?;

    let mut engine = CheckoutEngine::load(state.store()).await?;
    engine.add_item(&drink.summary()).await?;

    println!("Added {} to your cart.", drink.name);
    Ok(())
}

/// Apply a +1/-1 quantity change. A decrement at quantity 1 asks for removal
/// confirmation instead of dropping to zero.
pub async fn change(state: &AppState, line: usize, delta: i64) -> Result<(), AppError> {
    require_session(state).await?;

    let mut engine = CheckoutEngine::load(state.store()).await?;
    let line_id = resolve_line(engine.cart(), line)?;

    match engine.change_quantity(line_id, delta).await? {
        QuantityChange::Updated(quantity) => {
            println!("Quantity updated to {quantity}.");
        }
        QuantityChange::RemovalRequested => {
            if confirm("Remove this cocktail from the cart?")? {
                let removed = engine.remove_line(line_id).await?;
                println!("Removed {}.", removed.name);
            } else {
                println!("Kept in the cart.");
            }
        }
    }
    Ok(())
}

/// Remove a line, after an explicit confirmation.
pub async fn remove(state: &AppState, line: usize) -> Result<(), AppError> {
    require_session(state).await?;

    let mut engine = CheckoutEngine::load(state.store()).await?;
    let line_id = resolve_line(engine.cart(), line)?;

    if confirm("Remove this cocktail from the cart?")? {
        let removed = engine.remove_line(line_id).await?;
        println!("Removed {}.", removed.name);
    } else {
        println!("Kept in the cart.");
    }
    Ok(())
}
