//! Transcript repository trait.
//!
//! Defines the interface for transcript persistence operations.

use async_trait::async_trait;

use super::message::Message;
use crate::error::{PersistError, RestoreError};

/// An abstract store for the persisted conversation transcript.
///
/// This trait decouples the conversation core from the specific storage
/// mechanism (a JSON file, an in-memory map in tests, a browser key-value
/// store behind a bridge). Persistence is best-effort by contract: callers
/// treat every error from this trait as non-fatal.
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// Loads the previously persisted transcript.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(messages))`: a transcript was found
    /// - `Ok(None)`: nothing has been persisted yet (not an error)
    /// - `Err(_)`: the stored data is unreadable or malformed
    async fn load(&self) -> Result<Option<Vec<Message>>, RestoreError>;

    /// Replaces the persisted transcript with `messages`.
    async fn save(&self, messages: &[Message]) -> Result<(), PersistError>;

    /// Removes the persisted transcript, if any.
    async fn clear(&self) -> Result<(), PersistError>;
}
