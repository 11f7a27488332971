//! Catalog browsing commands.

use cocktail_haven_core::{CategoryName, DrinkId};
use cocktail_haven_storefront::error::AppError;
use cocktail_haven_storefront::services::checkout::pricing;
use cocktail_haven_storefront::state::AppState;

use super::require_session;

/// List the catalog's categories.
pub async fn categories(state: &AppState) -> Result<(), AppError> {
    require_session(state).await?;

    let categories = state.catalog().categories().await?;
    if categories.is_empty() {
        println!("No categories available.");
        return Ok(());
    }

    println!("All");
    for category in categories {
        println!("{category}");
    }
    Ok(())
}

/// List drinks, optionally filtered by category.
pub async fn drinks(state: &AppState, category: Option<&str>) -> Result<(), AppError> {
    require_session(state).await?;

    let category = category.map(CategoryName::new);
    let drinks = state.catalog().drinks_by_category(category.as_ref()).await?;

    if drinks.is_empty() {
        println!("No drinks found.");
        return Ok(());
    }

    for drink in drinks {
        println!(
            "{:<8} {:<30} {}",
            drink.id,
            drink.name,
            pricing::price_for(&drink.id)
        );
    }
    Ok(())
}

/// Show one drink's detail: ingredients, instructions, and price.
pub async fn show(state: &AppState, drink_id: &str) -> Result<(), AppError> {
    require_session(state).await?;

    let drink = state.catalog().drink(&DrinkId::new(drink_id)).await?;

    println!("{}", drink.name);
    if let Some(category) = &drink.category {
        println!("Category: {category}");
    }
    println!("Price: {}", pricing::price_for(&drink.id));

    println!("\nIngredients:");
    for ingredient in &drink.ingredients {
        match &ingredient.measure {
            Some(measure) => println!("- {} ({measure})", ingredient.name),
            None => println!("- {}", ingredient.name),
        }
    }

    if let Some(instructions) = drink.instructions(&state.config().locale) {
        println!("\nInstructions:\n{instructions}");
    }
    Ok(())
}
