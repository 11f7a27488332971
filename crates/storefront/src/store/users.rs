//! User repository over the key-value store.
//!
//! The whole user list lives in the single `users` blob; every write reads
//! the list, edits it, and replaces the blob.

use cocktail_haven_core::Email;

use super::{RepositoryError, Store, keys};
use crate::models::user::UserAccount;

/// Repository for user accounts and session identity.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All registered accounts, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the blob cannot be read.
    pub async fn list(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        Ok(self
            .store
            .get::<Vec<UserAccount>>(keys::USERS)
            .await?
            .unwrap_or_default())
    }

    /// Find an account by its email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the blob cannot be read.
    pub async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, RepositoryError> {
        let users = self.list().await?;
        Ok(users.into_iter().find(|account| &account.email == email))
    }

    /// Append a new account and persist the full list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an account with the same email
    /// already exists, and `RepositoryError::Storage` on read/write failure.
    pub async fn append(&self, account: UserAccount) -> Result<(), RepositoryError> {
        let mut users = self.list().await?;
        if users.iter().any(|existing| existing.email == account.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        users.push(account);
        self.store.set(keys::USERS, &users).await?;
        Ok(())
    }

    /// The registered customer display name, if one has been stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the blob cannot be read.
    pub async fn customer_name(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.store.get::<String>(keys::CUSTOMER_NAME).await?)
    }

    /// Store the customer display name (set at registration).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` on write failure.
    pub async fn set_customer_name(&self, name: &str) -> Result<(), RepositoryError> {
        self.store.set(keys::CUSTOMER_NAME, &name).await?;
        Ok(())
    }

    /// The active session identity (account email), if logged in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the blob cannot be read.
    pub async fn active_session(&self) -> Result<Option<Email>, RepositoryError> {
        let Some(raw) = self.store.get::<String>(keys::SESSION).await? else {
            return Ok(None);
        };
        let email = Email::parse(&raw).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid session identity in store: {e}"))
        })?;
        Ok(Some(email))
    }

    /// Record the active session identity after a successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` on write failure.
    pub async fn set_active_session(&self, email: &Email) -> Result<(), RepositoryError> {
        self.store.set(keys::SESSION, &email.as_str()).await?;
        Ok(())
    }

    /// Forget the active session identity (logout).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` on deletion failure.
    pub async fn clear_active_session(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::SESSION).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn account(email: &str) -> UserAccount {
        UserAccount {
            email: Email::parse(email).unwrap(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let users = UserRepository::new(&store);

        assert!(users.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let users = UserRepository::new(&store);

        users.append(account("ana@example.com")).await.unwrap();
        users.append(account("luis@example.com")).await.unwrap();

        let found = users
            .find_by_email(&Email::parse("luis@example.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(users.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_append_duplicate_email_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let users = UserRepository::new(&store);

        users.append(account("ana@example.com")).await.unwrap();
        let err = users.append(account("ana@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // The stored list is unchanged
        assert_eq!(users.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let users = UserRepository::new(&store);

        assert!(users.active_session().await.unwrap().is_none());

        let email = Email::parse("ana@example.com").unwrap();
        users.set_active_session(&email).await.unwrap();
        assert_eq!(users.active_session().await.unwrap(), Some(email));

        users.clear_active_session().await.unwrap();
        assert!(users.active_session().await.unwrap().is_none());
    }
}
