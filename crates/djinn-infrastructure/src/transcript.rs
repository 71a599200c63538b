//! JSON-file-backed transcript repository.

use std::path::Path;

use async_trait::async_trait;

use djinn_core::conversation::{Message, TranscriptRepository};
use djinn_core::error::{PersistError, RestoreError};

use crate::atomic_json::{AtomicJsonError, AtomicJsonFile};
use crate::paths::{self, PathError};

impl From<AtomicJsonError> for PersistError {
    fn from(e: AtomicJsonError) -> Self {
        match e {
            AtomicJsonError::Io(e) => PersistError::Io(e),
            AtomicJsonError::Json(e) => PersistError::Serialize(e),
        }
    }
}

impl From<AtomicJsonError> for RestoreError {
    fn from(e: AtomicJsonError) -> Self {
        match e {
            AtomicJsonError::Io(e) => RestoreError::Io(e),
            AtomicJsonError::Json(e) => RestoreError::Malformed(e),
        }
    }
}

/// Persists the transcript as a single JSON file (`transcript.json`) under a
/// base directory.
///
/// Writes are atomic; a missing file simply means nothing has been persisted
/// yet. All failures surface as the core's typed persistence errors and are
/// treated as non-fatal by the caller.
pub struct JsonTranscriptRepository {
    file: AtomicJsonFile<Vec<Message>>,
}

impl JsonTranscriptRepository {
    /// Creates a repository rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            file: AtomicJsonFile::new(base_dir.as_ref().join("transcript.json")),
        }
    }

    /// Creates a repository at the default location (`~/.djinn`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_location() -> Result<Self, PathError> {
        Ok(Self::new(paths::default_base_dir()?))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl TranscriptRepository for JsonTranscriptRepository {
    async fn load(&self) -> Result<Option<Vec<Message>>, RestoreError> {
        let loaded = self.file.load().await?;
        if let Some(messages) = &loaded {
            tracing::debug!(count = messages.len(), "transcript loaded");
        }
        Ok(loaded)
    }

    async fn save(&self, messages: &[Message]) -> Result<(), PersistError> {
        self.file.save(&messages.to_vec()).await?;
        tracing::debug!(count = messages.len(), "transcript saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistError> {
        self.file.remove().await?;
        Ok(())
    }
}
