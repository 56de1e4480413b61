//! Durable storage backends for the credential store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use hubconsole_core::error::{ApiError, ErrorKind};
use hubconsole_core::result::ConsoleResult;
use hubconsole_core::traits::CredentialStorage;

/// In-memory storage backend. Used by tests and by shells that opt out
/// of persistence; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStorage {
    entries: DashMap<String, String>,
}

impl MemoryCredentialStorage {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryCredentialStorage {
    fn load(&self, key: &str) -> ConsoleResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn store(&self, key: &str, value: &str) -> ConsoleResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ConsoleResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed storage: one JSON document holding the persisted keys,
/// written atomically via a temp-file rename.
#[derive(Debug)]
pub struct FileCredentialStorage {
    path: PathBuf,
}

impl FileCredentialStorage {
    /// Open (or create) the storage directory.
    pub fn new(directory: impl AsRef<Path>) -> ConsoleResult<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;
        Ok(Self {
            path: directory.join("credentials.json"),
        })
    }

    fn read_document(&self) -> ConsoleResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ApiError::with_source(
                ErrorKind::Storage,
                format!("Corrupt credential document at {}: {e}", self.path.display()),
                e,
            )
        })
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> ConsoleResult<()> {
        let raw = serde_json::to_string_pretty(document).map_err(|e| {
            ApiError::with_source(
                ErrorKind::Storage,
                format!("Failed to encode credential document: {e}"),
                e,
            )
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStorage for FileCredentialStorage {
    fn load(&self, key: &str) -> ConsoleResult<Option<String>> {
        Ok(self.read_document()?.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> ConsoleResult<()> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document)
    }

    fn remove(&self, key: &str) -> ConsoleResult<()> {
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let storage = MemoryCredentialStorage::new();
        assert_eq!(storage.load("access_token").expect("load"), None);
        storage.store("access_token", "T1").expect("store");
        assert_eq!(
            storage.load("access_token").expect("load"),
            Some("T1".to_string())
        );
        storage.remove("access_token").expect("remove");
        assert_eq!(storage.load("access_token").expect("load"), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileCredentialStorage::new(dir.path()).expect("open");
        storage.store("access_token", "T1").expect("store");
        storage.store("refresh_token", "R1").expect("store");

        let reopened = FileCredentialStorage::new(dir.path()).expect("reopen");
        assert_eq!(
            reopened.load("access_token").expect("load"),
            Some("T1".to_string())
        );
        assert_eq!(
            reopened.load("refresh_token").expect("load"),
            Some("R1".to_string())
        );
    }

    #[test]
    fn test_file_storage_remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileCredentialStorage::new(dir.path()).expect("open");
        storage.remove("access_token").expect("remove absent");
        storage.store("access_token", "T1").expect("store");
        storage.remove("access_token").expect("remove");
        storage.remove("access_token").expect("remove again");
        assert_eq!(storage.load("access_token").expect("load"), None);
    }
}
