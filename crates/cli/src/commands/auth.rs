//! Account and session commands.

use cocktail_haven_storefront::error::AppError;
use cocktail_haven_storefront::services::auth::{AuthService, Registration};
use cocktail_haven_storefront::state::AppState;

use super::{prompt_password, require_session};

/// Register a new account. The password is prompted twice, like the sign-up
/// form's confirmation field.
pub async fn register(
    state: &AppState,
    first_name: String,
    last_name: String,
    email: String,
) -> Result<(), AppError> {
    let password = prompt_password("Password")?;
    let confirm_password = prompt_password("Confirm password")?;

    let auth = AuthService::new(state.store());
    let account = auth
        .register(&Registration {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        })
        .await?;

    println!("Registered {}. You can now log in.", account.email);
    Ok(())
}

/// Log in; on success the account email becomes the active session identity.
pub async fn login(state: &AppState, email: String) -> Result<(), AppError> {
    let password = prompt_password("Password")?;

    let auth = AuthService::new(state.store());
    let account = auth.login(&email, &password).await?;

    println!("Logged in as {}.", account.email);
    Ok(())
}

/// Forget the active session identity.
pub async fn logout(state: &AppState) -> Result<(), AppError> {
    require_session(state).await?;

    let auth = AuthService::new(state.store());
    let email = auth.logout().await?;

    println!("Logged out {email}.");
    Ok(())
}
