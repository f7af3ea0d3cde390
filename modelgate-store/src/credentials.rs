//! Credential stores.
//!
//! [`MemoryCredentialStore`] is the in-process map. [`FileCredentialStore`]
//! fills one from the gateway's auth directory, where each account lives in
//! its own JSON file:
//!
//! ```json
//! { "type": "kiro", "access_token": "...", "profile_arn": "arn:aws:..." }
//! ```
//!
//! The file name is the account id, `type` is the provider type, and every
//! other top-level field becomes metadata.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use modelgate_core::{CredentialRecord, CredentialStore};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// Key holding the provider type in an auth file.
const TYPE_KEY: &str = "type";

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    records: RwLock<BTreeMap<String, CredentialRecord>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `records`, keyed by their ids.
    pub fn from_records(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// Inserts a record, returning the one it replaced.
    pub fn insert(&self, record: CredentialRecord) -> Option<CredentialRecord> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.id.clone(), record)
    }

    /// Removes a record.
    pub fn remove(&self, id: &str) -> Option<CredentialRecord> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    /// Replaces every record at once.
    pub fn replace_all(&self, records: impl IntoIterator<Item = CredentialRecord>) {
        let map = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = map;
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_by_id(&self, id: &str) -> Option<CredentialRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn ids(&self) -> Vec<String> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Credential store loaded from an auth directory.
#[derive(Debug)]
pub struct FileCredentialStore {
    dir: PathBuf,
    records: MemoryCredentialStore,
}

impl FileCredentialStore {
    /// Loads every `*.json` file in `dir`.
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AuthDirNotFound`] if `dir` is not a directory,
    /// or an IO error if it cannot be listed.
    pub async fn load_dir(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            dir: dir.into(),
            records: MemoryCredentialStore::new(),
        };
        store.reload().await?;
        Ok(store)
    }

    /// Returns the auth directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record was loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-reads the auth directory, replacing all records.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing or cannot be listed.
    pub async fn reload(&self) -> Result<(), StoreError> {
        let is_dir = tokio::fs::metadata(&self.dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(StoreError::AuthDirNotFound(self.dir.clone()));
        }

        let mut records = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if !entry.file_type().await.is_ok_and(|t| t.is_file()) {
                continue;
            }
            match load_auth_file(&path).await {
                Ok(record) => {
                    debug!(id = %record.id, provider = %record.provider, "Loaded auth file");
                    records.push(record);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping auth file"),
            }
        }

        info!(dir = %self.dir.display(), count = records.len(), "Loaded credentials");
        self.records.replace_all(records);
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get_by_id(&self, id: &str) -> Option<CredentialRecord> {
        self.records.get_by_id(id)
    }

    fn ids(&self) -> Vec<String> {
        self.records.ids()
    }
}

async fn load_auth_file(path: &Path) -> Result<CredentialRecord, StoreError> {
    let id = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::InvalidAuthFile {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;
    let content = tokio::fs::read_to_string(path).await?;
    parse_auth_file(id, &content).map_err(|reason| StoreError::InvalidAuthFile {
        path: path.to_path_buf(),
        reason,
    })
}

/// Builds a record from the contents of one auth file.
///
/// # Errors
///
/// Returns a description of the problem if `content` is not a JSON object.
pub fn parse_auth_file(id: &str, content: &str) -> Result<CredentialRecord, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let Value::Object(mut metadata) = value else {
        return Err("expected a JSON object".to_string());
    };

    let provider = match metadata.remove(TYPE_KEY) {
        Some(Value::String(provider)) => provider,
        _ => String::new(),
    };

    Ok(CredentialRecord {
        id: id.to_string(),
        provider,
        metadata,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert!(store.is_empty());

        store.insert(CredentialRecord::new("b.json", "kiro"));
        store.insert(CredentialRecord::new("a.json", "github-copilot"));
        let replaced = store.insert(CredentialRecord::new("b.json", "amazonq"));

        assert_eq!(replaced.unwrap().provider, "kiro");
        assert_eq!(store.ids(), vec!["a.json", "b.json"]);
        assert_eq!(store.get_by_id("b.json").unwrap().provider, "amazonq");
        assert!(store.get_by_id("c.json").is_none());

        store.remove("a.json");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_concurrent_reads() {
        let store = Arc::new(MemoryCredentialStore::from_records(
            (0..16).map(|i| CredentialRecord::new(format!("kiro-{i}.json"), "kiro")),
        ));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.get_by_id(&format!("kiro-{}.json", i * 2)).is_some()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_parse_auth_file() {
        let record = parse_auth_file(
            "kiro-1.json",
            r#"{ "type": "kiro", "access_token": "abc", "profile_arn": "arn-1", "expires_at": 1700000000 }"#,
        )
        .unwrap();

        assert_eq!(record.id, "kiro-1.json");
        assert_eq!(record.provider, "kiro");
        assert!(!record.metadata.contains_key("type"));
        assert_eq!(record.string_field("access_token"), Some("abc"));
        assert_eq!(record.metadata["expires_at"], 1_700_000_000);
    }

    #[test]
    fn test_parse_auth_file_without_type() {
        let record = parse_auth_file("x.json", r#"{ "access_token": "abc" }"#).unwrap();
        assert!(record.provider.is_empty());
        assert!(record.provider_kind().is_none());
    }

    #[test]
    fn test_parse_auth_file_rejects_non_object() {
        assert!(parse_auth_file("x.json", "[1, 2]").is_err());
        assert!(parse_auth_file("x.json", "{ broken").is_err());
    }

    #[tokio::test]
    async fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        tokio::fs::write(
            dir.join("kiro-1.json"),
            r#"{ "type": "kiro", "access_token": "abc" }"#,
        )
        .await
        .unwrap();
        tokio::fs::write(
            dir.join("github-copilot-me.json"),
            r#"{ "type": "github-copilot", "access_token": "gho_x" }"#,
        )
        .await
        .unwrap();
        tokio::fs::write(dir.join("broken.json"), "not json").await.unwrap();
        tokio::fs::write(dir.join("notes.txt"), "ignored").await.unwrap();
        tokio::fs::create_dir(dir.join("nested.json")).await.unwrap();

        let store = FileCredentialStore::load_dir(dir).await.unwrap();
        assert_eq!(store.ids(), vec!["github-copilot-me.json", "kiro-1.json"]);
        assert_eq!(store.get_by_id("kiro-1.json").unwrap().provider, "kiro");
        assert_eq!(store.dir(), dir);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let store = FileCredentialStore::load_dir(dir).await.unwrap();
        assert!(store.is_empty());

        tokio::fs::write(dir.join("kiro-2.json"), r#"{ "type": "kiro" }"#)
            .await
            .unwrap();
        store.reload().await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileCredentialStore::load_dir(temp_dir.path().join("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AuthDirNotFound(_)));
    }
}
