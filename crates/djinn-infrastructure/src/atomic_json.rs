//! Atomic JSON file operations.
//!
//! A thin layer for safe writes to small JSON files: updates are
//! all-or-nothing via a temporary file, fsync, and atomic rename.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::Io(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::Io(e)
    }
}

impl From<serde_json::Error> for AtomicJsonError {
    fn from(e: serde_json::Error) -> Self {
        AtomicJsonError::Json(e)
    }
}

/// A handle to a JSON file written atomically.
///
/// A reader never observes a half-written file: data lands in a temporary
/// file in the same directory, is synced, and is renamed over the target.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: successfully loaded
    /// - `Ok(None)`: file doesn't exist or is empty
    /// - `Err`: failed to read or parse the file
    pub async fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` and writes it atomically, creating parent
    /// directories as needed.
    pub async fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(data)?;

        let tmp_path = self.temp_path();
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(&json).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    /// Removes the file if it exists.
    pub async fn remove(&self) -> Result<(), AtomicJsonError> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestData>::new(temp_dir.path().join("test.json"));

        let data = TestData {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&data).await.unwrap();

        let loaded = file.load().await.unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn load_nonexistent_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestData>::new(temp_dir.path().join("missing.json"));
        assert!(file.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file =
            AtomicJsonFile::<TestData>::new(temp_dir.path().join("nested/dir/test.json"));
        file.save(&TestData {
            name: "n".to_string(),
            count: 1,
        })
        .await
        .unwrap();
        assert!(file.path().exists());
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestData>::new(temp_dir.path().join("test.json"));
        file.save(&TestData {
            name: "n".to_string(),
            count: 1,
        })
        .await
        .unwrap();

        assert!(!temp_dir.path().join(".test.json.tmp").exists());
        assert!(file.path().exists());
    }

    #[tokio::test]
    async fn remove_deletes_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestData>::new(temp_dir.path().join("test.json"));
        file.save(&TestData {
            name: "n".to_string(),
            count: 1,
        })
        .await
        .unwrap();

        file.remove().await.unwrap();
        assert!(!file.path().exists());
        // removing again is a no-op
        file.remove().await.unwrap();
    }
}
