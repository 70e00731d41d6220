use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::permission_store::{DocumentBackend, PermissionDocument};
use crate::types::{TagallError, TagallResult};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Permission store backed by a JSON file on local disk.
///
/// Features:
/// - Missing file reads as the empty document
/// - Parent directories created on first write
/// - Atomic writes (write to temp, then rename)
#[derive(Debug, Clone)]
pub struct JsonFilePermissionStore {
    path: PathBuf,
}

impl JsonFilePermissionStore {
    /// Create a store for the document at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unique sibling path so concurrent writers never share a temp file.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "permissions.json".to_string());
        let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        self.path.with_file_name(format!(
            ".{file_name}.{}.{sequence}.tmp",
            std::process::id()
        ))
    }

    async fn write_atomically(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.temp_path();
        if let Err(error) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(error);
        }

        if let Err(error) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(error);
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for JsonFilePermissionStore {
    async fn load(&self) -> TagallResult<PermissionDocument> {
        match fs::read(&self.path).await {
            Ok(bytes) => PermissionDocument::from_slice(&bytes),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "permission document not found, using empty document");
                Ok(PermissionDocument::default())
            }
            Err(error) => Err(TagallError::store_unreadable(format!(
                "failed to read {}: {error}",
                self.path.display()
            ))),
        }
    }

    async fn save(&self, document: &PermissionDocument) -> TagallResult<()> {
        let bytes = document.to_pretty_vec()?;

        self.write_atomically(&bytes).await.map_err(|error| {
            TagallError::store_write_failed(format!(
                "failed to write {}: {error}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "permission document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::PermissionStore;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn read_json(path: &Path) -> Value {
        let contents = std::fs::read_to_string(path).expect("document should exist");
        serde_json::from_str(&contents).expect("document should be valid JSON")
    }

    #[tokio::test]
    async fn missing_file_reads_defaults_without_creating_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data/userGroupData.json");
        let store = JsonFilePermissionStore::new(&path);

        assert!(!store.get_group_flag("group@g.us").await);
        assert!(!store.get_global_flag().await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn first_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/data/userGroupData.json");
        let store = JsonFilePermissionStore::new(&path);

        assert!(store.set_group_flag("group@g.us", true).await);

        assert_eq!(
            read_json(&path),
            json!({ "tagallPermissions": { "group@g.us": true } })
        );
        assert!(store.get_group_flag("group@g.us").await);
    }

    #[tokio::test]
    async fn corrupt_file_reads_defaults_and_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userGroupData.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFilePermissionStore::new(&path);

        assert!(!store.get_group_flag("group@g.us").await);
        assert!(!store.get_global_flag().await);

        assert!(!store.set_global_flag(true).await);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn failed_write_leaves_previous_document_intact() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = JsonFilePermissionStore::new(blocker.join("userGroupData.json"));
        assert!(!store.set_group_flag("group@g.us", true).await);
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[tokio::test]
    async fn writes_leave_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userGroupData.json");
        let store = JsonFilePermissionStore::new(&path);

        assert!(store.set_group_flag("a@g.us", true).await);
        assert!(store.set_global_flag(true).await);
        assert!(store.set_group_flag("a@g.us", false).await);

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("userGroupData.json")]);
    }

    #[tokio::test]
    async fn written_document_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userGroupData.json");
        let store = JsonFilePermissionStore::new(&path);

        assert!(store.set_global_flag(true).await);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\n  \"globalTagallAllowed\": true\n}");
    }
}
