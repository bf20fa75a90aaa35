//! File-based Order History Adapter
//!
//! Stores each user's history as a YAML list on disk:
//! `{base_path}/{user_id}.yaml`.
//!
//! Appends are serialised per directory across every store in the process.
//! Separate processes must not share a directory.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::most_recent;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::history::HistoricalOrderRecord;
use crate::ports::{OrderHistoryReader, OrderHistoryRepository};

static DIRECTORY_LOCKS: Lazy<std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    Lazy::new(Default::default);

/// The append lock shared by all stores rooted at `base_path`.
fn directory_lock(base_path: &Path) -> Arc<Mutex<()>> {
    let mut locks = DIRECTORY_LOCKS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    locks.entry(base_path.to_path_buf()).or_default().clone()
}

/// File-based storage for order history.
#[derive(Debug, Clone)]
pub struct FileOrderHistory {
    base_path: PathBuf,
    /// Serialises read-modify-write appends to this directory.
    write_lock: Arc<Mutex<()>>,
}

impl FileOrderHistory {
    /// Create a new file store rooted at `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileOrderHistory::new("./data/history");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base_path = base_path.as_ref().to_path_buf();
        Self {
            write_lock: directory_lock(&base_path),
            base_path,
        }
    }

    /// Path of the history file for a user.
    ///
    /// Characters outside `[A-Za-z0-9_-]` are hex-escaped so a user id can
    /// never leave the base directory.
    fn history_file_path(&self, user_id: &UserId) -> PathBuf {
        let mut name = String::with_capacity(user_id.as_str().len());
        for byte in user_id.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        self.base_path.join(format!("{}.yaml", name))
    }

    async fn load_all(&self, user_id: &UserId) -> Result<Vec<HistoricalOrderRecord>, DomainError> {
        let path = self.history_file_path(user_id);

        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read order history");
                return Err(storage_error("read", &path, e));
            }
        };

        if yaml.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_yaml::from_str(&yaml).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Corrupt order history file");
            DomainError::new(
                ErrorCode::SerializationError,
                format!("Failed to parse order history: {}", e),
            )
            .with_detail("path", path.display().to_string())
        })
    }

    async fn store_all(
        &self,
        user_id: &UserId,
        records: &[HistoricalOrderRecord],
    ) -> Result<(), DomainError> {
        let path = self.history_file_path(user_id);

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| storage_error("create directory for", &path, e))?;

        let yaml = serde_yaml::to_string(records).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationError,
                format!("Failed to serialize order history: {}", e),
            )
        })?;

        // Write to a uniquely named temporary file first so readers never see
        // a partial list.
        let temp_path = path.with_extension(format!("yaml.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&temp_path, yaml).await.map_err(|e| {
            tracing::warn!(path = %temp_path.display(), error = %e, "Failed to write order history");
            storage_error("write", &temp_path, e)
        })?;
        if let Err(e) = fs::rename(&temp_path, &path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to replace order history");
            let _ = fs::remove_file(&temp_path).await;
            return Err(storage_error("replace", &path, e));
        }
        Ok(())
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> DomainError {
    DomainError::new(
        ErrorCode::StorageError,
        format!("Failed to {} {}: {}", action, path.display(), err),
    )
}

#[async_trait]
impl OrderHistoryReader for FileOrderHistory {
    async fn recent_orders(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoricalOrderRecord>, DomainError> {
        let records = self.load_all(user_id).await?;
        Ok(most_recent(records, limit))
    }
}

#[async_trait]
impl OrderHistoryRepository for FileOrderHistory {
    async fn append(
        &self,
        user_id: &UserId,
        record: HistoricalOrderRecord,
    ) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_all(user_id).await?;
        records.push(record);
        self.store_all(user_id, &records).await?;

        tracing::debug!(user_id = %user_id, count = records.len(), "Appended order to history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_map_to_plain_file_names() {
        let store = FileOrderHistory::new("/data");
        let user = UserId::new("user_42-a").unwrap();
        assert_eq!(
            store.history_file_path(&user),
            PathBuf::from("/data/user_42-a.yaml")
        );
    }

    #[test]
    fn path_characters_are_escaped() {
        let store = FileOrderHistory::new("/data");
        let user = UserId::new("../etc/passwd").unwrap();
        let path = store.history_file_path(&user);

        assert_eq!(path.parent(), Some(Path::new("/data")));
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("%2E%2E%2Fetc%2Fpasswd.yaml")
        );
    }

    #[test]
    fn stores_over_one_directory_share_the_append_lock() {
        let first = FileOrderHistory::new("/data/shared");
        let second = FileOrderHistory::new("/data/shared");
        let other = FileOrderHistory::new("/data/other");

        assert!(Arc::ptr_eq(&first.write_lock, &second.write_lock));
        assert!(!Arc::ptr_eq(&first.write_lock, &other.write_lock));
    }
}
