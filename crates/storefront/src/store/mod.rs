//! On-device key-value storage.
//!
//! The durable copy of the cart and the user list lives here: one JSON blob
//! per key, each key a file under the data directory. All operations are
//! async and unbatched; callers await each write before issuing the next, so
//! rapid successive mutations reach the store in issuance order.
//!
//! ## Keys
//!
//! - `cart` - JSON array of cart-line records
//! - `users` - JSON array of user-account records
//! - `customerName` - plain string, `"First Last"`, set at registration
//! - `session` - plain string, the active session's account email

pub mod cart;
pub mod users;

pub use cart::CartRepository;
pub use users::UserRepository;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage key names. These are pinned: blobs written by earlier releases
/// (and the original app) are read back under the same names.
pub mod keys {
    /// The cart blob: a JSON array of cart-line records.
    pub const CART: &str = "cart";
    /// The user list blob: a JSON array of account records.
    pub const USERS: &str = "users";
    /// The registered customer's display name.
    pub const CUSTOMER_NAME: &str = "customerName";
    /// The active session identity (account email).
    pub const SESSION: &str = "session";
}

/// Errors raised by the raw key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored blob could not be decoded.
    #[error("corrupt blob for key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the repositories layered over the store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored record failed domain validation.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// The on-device key-value store.
///
/// Writes replace the whole blob atomically (write to a temp file, then
/// rename), so a crash mid-write never leaves a half-written blob behind.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (and create if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::Io {
                key: root.display().to_string(),
                source,
            })?;
        Ok(Self { root })
    }

    /// The directory this store persists into.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read and decode the blob stored under `key`.
    ///
    /// Returns `None` when the key has never been written (or was removed).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` on read failure and `StorageError::Corrupt`
    /// when the blob exists but cannot be decoded as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_owned(),
                    source,
                });
            }
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            key: key.to_owned(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Encode `value` and replace the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` on serialization failure and
    /// `StorageError::Io` on write failure.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;

        let path = self.path_for(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        let io_err = |source| StorageError::Io {
            key: key.to_owned(),
            source,
        };

        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_err)?;
        Ok(())
    }

    /// Delete the blob stored under `key`.
    ///
    /// Removing a key that was never written is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` on deletion failure.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    /// Whether a blob exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file metadata cannot be read.
    pub async fn contains(&self, key: &str) -> Result<bool, StorageError> {
        match tokio::fs::try_exists(self.path_for(key)).await {
            Ok(exists) => Ok(exists),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}
