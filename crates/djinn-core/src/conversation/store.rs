//! The ordered, bounded conversation log.

use std::collections::VecDeque;
use std::sync::Arc;

use super::message::Message;
use super::repository::TranscriptRepository;
use crate::error::{PersistError, RestoreError};

/// The ordered log of exchanged messages.
///
/// Messages are kept oldest-first and the log never grows past
/// `max_history`: appending to a full log evicts from the front.
/// Persistence goes through an injected [`TranscriptRepository`] and writes
/// at most `persist_cap` of the newest messages, which may be fewer than the
/// log retains in memory.
pub struct ConversationStore {
    messages: VecDeque<Message>,
    max_history: usize,
    persist_cap: usize,
    repository: Arc<dyn TranscriptRepository>,
}

impl ConversationStore {
    pub fn new(
        max_history: usize,
        persist_cap: usize,
        repository: Arc<dyn TranscriptRepository>,
    ) -> Self {
        Self {
            messages: VecDeque::new(),
            max_history,
            persist_cap,
            repository,
        }
    }

    /// Appends a message, evicting the oldest entries while the log is over
    /// its bound.
    pub fn append(&mut self, message: Message) {
        self.messages.push_back(message);
        while self.messages.len() > self.max_history {
            self.messages.pop_front();
        }
    }

    /// Returns an owned copy of the log for rendering.
    ///
    /// The internal sequence is never handed out mutably.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drops all in-memory messages. The persisted transcript is untouched;
    /// see [`clear_persisted`](Self::clear_persisted).
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Writes the newest `persist_cap` messages through the repository.
    ///
    /// # Errors
    ///
    /// Returns an error when storage is unavailable or the write fails. The
    /// in-memory log is unaffected either way.
    pub async fn persist(&self) -> Result<(), PersistError> {
        let skip = self.messages.len().saturating_sub(self.persist_cap);
        let tail: Vec<Message> = self.messages.iter().skip(skip).cloned().collect();
        self.repository.save(&tail).await
    }

    /// Replaces the in-memory log with the persisted transcript, truncated
    /// to `max_history` (newest kept).
    ///
    /// When nothing has been persisted yet the log is left empty.
    ///
    /// # Errors
    ///
    /// Returns an error on unreadable or malformed stored data; the log is
    /// empty afterwards and the session continues in-memory-only.
    pub async fn restore(&mut self) -> Result<(), RestoreError> {
        self.messages.clear();
        if let Some(mut restored) = self.repository.load().await? {
            let excess = restored.len().saturating_sub(self.max_history);
            if excess > 0 {
                restored.drain(..excess);
            }
            self.messages = restored.into();
        }
        Ok(())
    }

    /// Removes the persisted transcript.
    pub async fn clear_persisted(&self) -> Result<(), PersistError> {
        self.repository.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transcript repository backed by a mutex-guarded slot.
    struct MockRepository {
        stored: Mutex<Option<Vec<Message>>>,
    }

    impl MockRepository {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                stored: Mutex::new(None),
            })
        }

        fn with_messages(messages: Vec<Message>) -> Arc<Self> {
            Arc::new(Self {
                stored: Mutex::new(Some(messages)),
            })
        }

        fn stored_len(&self) -> Option<usize> {
            self.stored.lock().unwrap().as_ref().map(Vec::len)
        }
    }

    #[async_trait]
    impl TranscriptRepository for MockRepository {
        async fn load(&self) -> Result<Option<Vec<Message>>, RestoreError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, messages: &[Message]) -> Result<(), PersistError> {
            *self.stored.lock().unwrap() = Some(messages.to_vec());
            Ok(())
        }

        async fn clear(&self) -> Result<(), PersistError> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    fn numbered(n: usize) -> Vec<Message> {
        (0..n).map(|i| Message::user(format!("m{i}"))).collect()
    }

    #[test]
    fn append_keeps_only_the_newest_max_history() {
        let mut store = ConversationStore::new(3, 50, MockRepository::new());
        for message in numbered(5) {
            store.append(message);
        }
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 3);
        let texts: Vec<&str> = snapshot.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["m2", "m3", "m4"]);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let mut store = ConversationStore::new(10, 50, MockRepository::new());
        store.append(Message::user("first"));
        store.append(Message::genie("second"));
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].text, "first");
        assert_eq!(snapshot[1].text, "second");
    }

    #[tokio::test]
    async fn persist_writes_only_the_newest_persist_cap() {
        let repository = MockRepository::new();
        let mut store = ConversationStore::new(10, 2, repository.clone());
        for message in numbered(5) {
            store.append(message);
        }
        store.persist().await.unwrap();
        assert_eq!(repository.stored_len(), Some(2));

        let restored = repository.load().await.unwrap().unwrap();
        assert_eq!(restored[0].text, "m3");
        assert_eq!(restored[1].text, "m4");
    }

    #[tokio::test]
    async fn restore_round_trips_persisted_messages() {
        let repository = MockRepository::new();
        let mut store = ConversationStore::new(10, 50, repository.clone());
        store.append(Message::user("hello"));
        store.append(Message::genie("granted"));
        store.persist().await.unwrap();

        let mut fresh = ConversationStore::new(10, 50, repository);
        fresh.restore().await.unwrap();
        assert_eq!(fresh.snapshot(), store.snapshot());
    }

    #[tokio::test]
    async fn restore_truncates_to_max_history_keeping_newest() {
        let repository = MockRepository::with_messages(numbered(6));
        let mut store = ConversationStore::new(4, 50, repository);
        store.restore().await.unwrap();
        let texts: Vec<String> = store.snapshot().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, ["m2", "m3", "m4", "m5"]);
    }

    #[tokio::test]
    async fn restore_with_nothing_persisted_leaves_store_empty() {
        let mut store = ConversationStore::new(4, 50, MockRepository::new());
        store.restore().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn clear_persisted_removes_the_transcript() {
        let repository = MockRepository::with_messages(numbered(2));
        let store = ConversationStore::new(4, 50, repository.clone());
        store.clear_persisted().await.unwrap();
        assert_eq!(repository.load().await.unwrap(), None);
    }
}
