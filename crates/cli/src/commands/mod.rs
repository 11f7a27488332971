//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

use std::io::Write as _;

use secrecy::SecretString;

use cocktail_haven_core::Email;
use cocktail_haven_storefront::error::AppError;
use cocktail_haven_storefront::services::auth::AuthService;
use cocktail_haven_storefront::state::AppState;

/// Read one trimmed line from stdin after printing a prompt.
pub(crate) fn prompt(label: &str) -> Result<String, AppError> {
    print!("{label}: ");
    std::io::stdout()
        .flush()
        .map_err(|e| AppError::Internal(format!("stdout flush failed: {e}")))?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::Internal(format!("stdin read failed: {e}")))?;
    Ok(input.trim().to_string())
}

/// Prompt for a password. The input is wrapped immediately so it never
/// travels as a plain `String`.
pub(crate) fn prompt_password(label: &str) -> Result<SecretString, AppError> {
    Ok(SecretString::from(prompt(label)?))
}

/// Two-option confirmation; only an explicit `y`/`yes` confirms.
pub(crate) fn confirm(question: &str) -> Result<bool, AppError> {
    let answer = prompt(&format!("{question} [y/N]"))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// The active session identity, or an unauthorized error for flows behind
/// the login screen.
pub(crate) async fn require_session(state: &AppState) -> Result<Email, AppError> {
    let auth = AuthService::new(state.store());
    auth.current_session()
        .await?
        .ok_or_else(|| AppError::Unauthorized("no active session".to_string()))
}
