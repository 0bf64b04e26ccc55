//! Persisted session state.
//!
//! The panel keeps three values between invocations: the bearer token,
//! the selected role, and the login email. They live together in one
//! store and are always cleared together; page code never touches the
//! keys directly, only the resolver does.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Keys of the persisted session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StorageKey {
    /// Opaque bearer token proving authentication to the backend.
    AuthToken,
    /// Persisted role string (`master` / `distributor`).
    UserRole,
    /// Email the session logged in with.
    UserEmail,
}

impl StorageKey {
    /// All keys, in the order they are persisted.
    pub const ALL: [Self; 3] = [Self::AuthToken, Self::UserRole, Self::UserEmail];

    /// Returns the persisted name of the key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthToken => "authToken",
            Self::UserRole => "userRole",
            Self::UserEmail => "userEmail",
        }
    }
}

/// Errors from a session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error reading or writing the backing file.
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a valid session document.
    #[error("session store serialization error: {0}")]
    Serialization(String),

    /// Internal lock poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Storage for the persisted session state.
///
/// Implementations must make `clear` remove every key: partial session
/// state (a role without a token, or vice versa) is never valid.
pub trait SessionStore {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Removes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: StorageKey) -> Result<(), StoreError>;

    /// Removes every session key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self) -> Result<(), StoreError> {
        for key in StorageKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// In-memory session store, used by tests and single-run embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<StorageKey, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::LockPoisoned)?;
        values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::LockPoisoned)?;
        values.remove(&key);
        Ok(())
    }
}

/// Session document as persisted on disk.
///
/// Field names match the storage keys so the file reads as the familiar
/// `authToken` / `userRole` / `userEmail` triple.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "authToken")]
    auth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "userRole")]
    user_role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "userEmail")]
    user_email: Option<String>,
}

impl SessionDocument {
    fn field(&self, key: StorageKey) -> &Option<String> {
        match key {
            StorageKey::AuthToken => &self.auth_token,
            StorageKey::UserRole => &self.user_role,
            StorageKey::UserEmail => &self.user_email,
        }
    }

    fn field_mut(&mut self, key: StorageKey) -> &mut Option<String> {
        match key {
            StorageKey::AuthToken => &mut self.auth_token,
            StorageKey::UserRole => &mut self.user_role,
            StorageKey::UserEmail => &mut self.user_email,
        }
    }
}

/// File-backed session store.
///
/// Reads through to the file on every access (the document is tiny) and
/// writes atomically: serialize to a sibling temp file, then rename over
/// the target. A missing file is an empty session, not an error.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`.
    ///
    /// The parent directory is created on first write, not here.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SessionDocument, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionDocument::default());
            },
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn persist(&self, document: &SessionDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.field(key).clone())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        let mut document = self.load()?;
        *document.field_mut(key) = Some(value.to_string());
        self.persist(&document)
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        let mut document = self.load()?;
        *document.field_mut(key) = None;
        self.persist(&document)
    }

    fn clear(&self) -> Result<(), StoreError> {
        // One write instead of three read-modify-write cycles.
        self.persist(&SessionDocument::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_names() {
        assert_eq!(StorageKey::AuthToken.as_str(), "authToken");
        assert_eq!(StorageKey::UserRole.as_str(), "userRole");
        assert_eq!(StorageKey::UserEmail.as_str(), "userEmail");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(StorageKey::AuthToken).unwrap(), None);

        store.set(StorageKey::AuthToken, "tok").unwrap();
        assert_eq!(
            store.get(StorageKey::AuthToken).unwrap().as_deref(),
            Some("tok")
        );

        store.remove(StorageKey::AuthToken).unwrap();
        assert_eq!(store.get(StorageKey::AuthToken).unwrap(), None);
    }

    #[test]
    fn test_memory_store_clear_removes_all_keys() {
        let store = MemoryStore::new();
        store.set(StorageKey::AuthToken, "tok").unwrap();
        store.set(StorageKey::UserRole, "master").unwrap();
        store.set(StorageKey::UserEmail, "a@b.com").unwrap();

        store.clear().unwrap();

        for key in StorageKey::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);

        // Missing file reads as empty.
        assert_eq!(store.get(StorageKey::UserRole).unwrap(), None);

        store.set(StorageKey::AuthToken, "tok").unwrap();
        store.set(StorageKey::UserRole, "distributor").unwrap();

        // A fresh store over the same path sees the persisted values.
        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get(StorageKey::AuthToken).unwrap().as_deref(),
            Some("tok")
        );
        assert_eq!(
            reopened.get(StorageKey::UserRole).unwrap().as_deref(),
            Some("distributor")
        );
    }

    #[test]
    fn test_file_store_clear_empties_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);

        store.set(StorageKey::AuthToken, "tok").unwrap();
        store.set(StorageKey::UserEmail, "a@b.com").unwrap();
        store.clear().unwrap();

        for key in StorageKey::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[test]
    fn test_file_store_persisted_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);

        store.set(StorageKey::AuthToken, "tok").unwrap();
        store.set(StorageKey::UserRole, "master").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("authToken"));
        assert!(raw.contains("userRole"));
    }

    #[test]
    fn test_file_store_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get(StorageKey::AuthToken),
            Err(StoreError::Serialization(_))
        ));
    }
}
