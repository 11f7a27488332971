//! Authentication service.
//!
//! Validates and records credentials against the locally persisted user list.
//! Registration performs field validation in a fixed order and short-circuits
//! on the first violation; login matches one stored account and yields its
//! email as the active session identity. Passwords are argon2-hashed before
//! they reach storage and verified against the stored hash at login.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use cocktail_haven_core::Email;

use crate::models::user::UserAccount;
use crate::store::{RepositoryError, Store, users::UserRepository};

/// A registration request, as entered in the sign-up form.
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Authentication service.
///
/// Handles registration, login, and the persisted session identity.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Register a new account.
    ///
    /// Validation order (first violation wins): required fields, email shape,
    /// alphabetic first/last name, password confirmation. On success the
    /// account is appended to the persisted user list and the customer
    /// display name (`"First Last"`) is stored for invoicing.
    ///
    /// # Errors
    ///
    /// Returns the first failing `AuthError` validation variant,
    /// `AuthError::UserAlreadyExists` when the email is taken, or
    /// `AuthError::Repository` on storage failure.
    pub async fn register(&self, registration: &Registration) -> Result<UserAccount, AuthError> {
        let Registration {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } = registration;

        if first_name.is_empty()
            || last_name.is_empty()
            || email.is_empty()
            || password.expose_secret().is_empty()
            || confirm_password.expose_secret().is_empty()
        {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;

        if !is_alphabetic(first_name) {
            return Err(AuthError::InvalidName("first name"));
        }
        if !is_alphabetic(last_name) {
            return Err(AuthError::InvalidName("last name"));
        }

        if password.expose_secret() != confirm_password.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = hash_password(password)?;

        let account = UserAccount {
            email,
            password: password_hash,
            first_name: first_name.clone(),
            last_name: last_name.clone(),
        };

        self.users
            .append(account.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        self.users
            .set_customer_name(&account.display_name())
            .await?;

        Ok(account)
    }

    /// Login with email and password.
    ///
    /// On success the account's email becomes the active session identity and
    /// is returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` when either field is empty and
    /// `AuthError::InvalidCredentials` when no stored account matches; the
    /// latter does not say whether the email or the password was wrong.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserAccount, AuthError> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingFields);
        }

        // A malformed email cannot match any stored account; report it the
        // same way as a wrong password.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password)?;

        self.users.set_active_session(&account.email).await?;

        Ok(account)
    }

    /// The active session identity, if logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` on storage failure.
    pub async fn current_session(&self) -> Result<Option<Email>, AuthError> {
        Ok(self.users.active_session().await?)
    }

    /// Forget the active session identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` when no session is active and
    /// `AuthError::Repository` on storage failure.
    pub async fn logout(&self) -> Result<Email, AuthError> {
        let email = self
            .users
            .active_session()
            .await?
            .ok_or(AuthError::NotLoggedIn)?;
        self.users.clear_active_session().await?;
        Ok(email)
    }
}

/// Letters only, no digits, spaces, or punctuation.
fn is_alphabetic(name: &str) -> bool {
    name.chars().all(char::is_alphabetic)
}

/// Hash a password with argon2 and a fresh salt.
fn hash_password(password: &SecretString) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
fn verify_password(password: &SecretString, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::keys;

    fn registration(email: &str) -> Registration {
        Registration {
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            email: email.to_string(),
            password: SecretString::from("hunter2!"),
            confirm_password: SecretString::from("hunter2!"),
        }
    }

    async fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_register_persists_account_and_customer_name() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        let account = auth.register(&registration("ana@example.com")).await.unwrap();
        assert_eq!(account.email.as_str(), "ana@example.com");

        let users = UserRepository::new(&store);
        assert_eq!(users.list().await.unwrap().len(), 1);
        assert_eq!(
            users.customer_name().await.unwrap().as_deref(),
            Some("Ana Lopez")
        );
    }

    #[tokio::test]
    async fn test_register_hashes_the_password() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        let account = auth.register(&registration("ana@example.com")).await.unwrap();
        assert_ne!(account.password, "hunter2!");
        assert!(account.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        let mut incomplete = registration("ana@example.com");
        incomplete.last_name = String::new();

        let err = auth.register(&incomplete).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        let err = auth.register(&registration("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_nonalphabetic_names() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        let mut bad = registration("ana@example.com");
        bad.first_name = "Ana3".to_string();

        let err = auth.register(&bad).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidName("first name")));
    }

    #[tokio::test]
    async fn test_register_password_mismatch_creates_nothing() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        let mut bad = registration("ana@example.com");
        bad.confirm_password = SecretString::from("different");

        let err = auth.register(&bad).await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));

        // The users blob was never written
        assert!(!store.contains(keys::USERS).await.unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        auth.register(&registration("ana@example.com")).await.unwrap();
        let err = auth
            .register(&registration("ana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_login_success_sets_session() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        auth.register(&registration("ana@example.com")).await.unwrap();
        let account = auth
            .login("ana@example.com", &SecretString::from("hunter2!"))
            .await
            .unwrap();
        assert_eq!(account.email.as_str(), "ana@example.com");

        let session = auth.current_session().await.unwrap();
        assert_eq!(session.unwrap().as_str(), "ana@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_vague() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        auth.register(&registration("ana@example.com")).await.unwrap();

        let wrong_password = auth
            .login("ana@example.com", &SecretString::from("wrong"))
            .await
            .unwrap_err();
        let unknown_email = auth
            .login("nobody@example.com", &SecretString::from("hunter2!"))
            .await
            .unwrap_err();

        // Same error either way: no account enumeration
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (_dir, store) = temp_store().await;
        let auth = AuthService::new(&store);

        auth.register(&registration("ana@example.com")).await.unwrap();
        auth.login("ana@example.com", &SecretString::from("hunter2!"))
            .await
            .unwrap();

        let email = auth.logout().await.unwrap();
        assert_eq!(email.as_str(), "ana@example.com");
        assert!(auth.current_session().await.unwrap().is_none());

        let err = auth.logout().await.unwrap_err();
        assert!(matches!(err, AuthError::NotLoggedIn));
    }
}
