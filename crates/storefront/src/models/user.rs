//! User account model.

use serde::{Deserialize, Serialize};

use cocktail_haven_core::Email;

/// A registered account in the locally persisted user list.
///
/// Stored under the `users` key as a JSON array. Field names match the stored
/// blob (`email`, `password`, `firstName`, `lastName`); the `password` field
/// holds an argon2 PHC string, never the raw password.
///
/// Accounts are created at registration, read at login, and never updated or
/// deleted in-app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique key within the user list.
    pub email: Email,
    /// Argon2 PHC hash of the account password.
    pub password: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

impl UserAccount {
    /// The account's display name, `"First Last"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_field_names() {
        let account = UserAccount {
            email: Email::parse("ana@example.com").unwrap(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["lastName"], "Lopez");
        assert!(json["password"].as_str().unwrap().starts_with("$argon2id$"));
    }

    #[test]
    fn test_display_name() {
        let account = UserAccount {
            email: Email::parse("ana@example.com").unwrap(),
            password: String::new(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
        };
        assert_eq!(account.display_name(), "Ana Lopez");
    }
}
