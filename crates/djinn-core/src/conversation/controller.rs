//! Per-submission conversation lifecycle.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::event::ConversationEvent;
use super::message::Message;
use super::repository::TranscriptRepository;
use super::selector::{ResponseSelector, SelectedReply};
use super::store::ConversationStore;
use super::validator;
use crate::config::ChatConfig;
use crate::error::{ConfigError, SubmitError};

/// Where the controller is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// Waiting for a submission.
    Idle,
    /// A user message was accepted and its reply is pending delivery.
    AwaitingReply,
}

struct ControllerInner {
    store: RwLock<ConversationStore>,
    selector: ResponseSelector,
    phase: RwLock<ControllerPhase>,
    max_message_length: usize,
    events: RwLock<Option<mpsc::UnboundedSender<ConversationEvent>>>,
    /// Cancelled when the controller is dropped; every reply token is a
    /// child of this one.
    shutdown: CancellationToken,
    /// Rotated by `clear()`; reply tasks hold a clone of the token that was
    /// current when they were scheduled.
    cancel: Mutex<CancellationToken>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ControllerInner {
    async fn emit(&self, event: ConversationEvent) {
        if let Some(tx) = self.events.read().await.as_ref() {
            // the subscriber may be gone during shutdown
            let _ = tx.send(event);
        }
    }
}

/// Orchestrates the per-submission lifecycle: validate, append the user
/// message, wait out the simulated latency, append the reply, enforce the
/// history bound, persist.
///
/// The controller exclusively owns and mutates the conversation state; the
/// view layer receives read-only snapshots and [`ConversationEvent`]s.
/// At most one submission is in flight: while a reply is pending, further
/// submissions are rejected rather than queued.
pub struct ConversationController {
    inner: Arc<ControllerInner>,
}

impl ConversationController {
    /// Builds a controller from validated startup configuration and a
    /// transcript repository.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty reply set or an inverted delay range.
    /// This is the sole fatal condition in the system.
    pub fn new(
        config: ChatConfig,
        repository: Arc<dyn TranscriptRepository>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let selector = ResponseSelector::new(config.replies.clone(), config.delay.clone())?;
        let store = ConversationStore::new(config.max_history, config.persist_cap, repository);
        let shutdown = CancellationToken::new();
        let cancel = shutdown.child_token();

        Ok(Self {
            inner: Arc::new(ControllerInner {
                store: RwLock::new(store),
                selector,
                phase: RwLock::new(ControllerPhase::Idle),
                max_message_length: config.max_message_length,
                events: RwLock::new(None),
                shutdown,
                cancel: Mutex::new(cancel),
                pending: Mutex::new(None),
            }),
        })
    }

    /// Opens the event feed for the view layer.
    ///
    /// A later call replaces the previous subscriber.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<ConversationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.inner.events.write().await = Some(tx);
        rx
    }

    /// Rehydrates the conversation from the persisted transcript.
    ///
    /// Restore failures are logged and swallowed; the session starts empty
    /// and continues in-memory-only.
    pub async fn restore(&self) {
        let mut store = self.inner.store.write().await;
        match store.restore().await {
            Ok(()) => {
                tracing::debug!(messages = store.len(), "transcript restored");
            }
            Err(e) => {
                tracing::warn!("could not restore transcript, starting empty: {e}");
            }
        }
    }

    /// Accepts a user submission and schedules its reply.
    ///
    /// On success the user message is already appended when this returns;
    /// the genie reply lands after the simulated latency (see
    /// [`await_reply`](Self::await_reply)).
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Busy`] while a reply is pending; the submission is
    ///   rejected, not queued, and no state changes.
    /// - [`SubmitError::Invalid`] when validation fails; the controller
    ///   stays idle and nothing is appended.
    pub async fn submit(&self, text: &str) -> Result<(), SubmitError> {
        let trimmed = {
            let mut phase = self.inner.phase.write().await;
            if *phase == ControllerPhase::AwaitingReply {
                return Err(SubmitError::Busy);
            }
            let trimmed = validator::validate(text, self.inner.max_message_length)?;
            *phase = ControllerPhase::AwaitingReply;
            trimmed
        };

        self.inner
            .emit(ConversationEvent::ProcessingChanged { processing: true })
            .await;
        self.inner.emit(ConversationEvent::InputClearRequested).await;

        let user_message = Message::user(trimmed);
        self.inner.store.write().await.append(user_message.clone());
        self.inner
            .emit(ConversationEvent::MessageAppended {
                message: user_message,
            })
            .await;

        let picked = self.inner.selector.select();
        tracing::debug!(delay_ms = picked.delay.as_millis() as u64, "reply scheduled");

        let cancel = self.inner.cancel.lock().await.clone();
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(deliver_reply(inner, picked, cancel));
        *self.inner.pending.lock().await = Some(handle);

        Ok(())
    }

    /// Waits for the in-flight reply, if any, to be delivered.
    ///
    /// Synchronization point for callers that need the full
    /// user-then-genie exchange (the REPL, tests). No-op while idle.
    pub async fn await_reply(&self) {
        let handle = self.inner.pending.lock().await.take();
        if let Some(handle) = handle {
            // JoinError only occurs for cancelled tasks
            let _ = handle.await;
        }
    }

    /// Discards the conversation: cancels any pending reply, empties the
    /// log, and removes the persisted transcript.
    pub async fn clear(&self) {
        let mut store = self.inner.store.write().await;

        // Rotating the token under the store lock keeps a reply task that
        // already woke up from appending into the discarded state.
        {
            let mut cancel = self.inner.cancel.lock().await;
            cancel.cancel();
            *cancel = self.inner.shutdown.child_token();
        }
        if let Some(handle) = self.inner.pending.lock().await.take() {
            handle.abort();
        }

        store.clear();
        if let Err(e) = store.clear_persisted().await {
            tracing::warn!("could not clear persisted transcript: {e}");
        }
        drop(store);

        *self.inner.phase.write().await = ControllerPhase::Idle;
        self.inner.emit(ConversationEvent::HistoryCleared).await;
        self.inner
            .emit(ConversationEvent::ProcessingChanged { processing: false })
            .await;
    }

    /// An owned copy of the conversation log, oldest first.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.inner.store.read().await.snapshot()
    }

    /// True between acceptance of a submission and delivery of its reply.
    pub async fn is_processing(&self) -> bool {
        *self.inner.phase.read().await == ControllerPhase::AwaitingReply
    }

    /// The current lifecycle phase.
    pub async fn phase(&self) -> ControllerPhase {
        *self.inner.phase.read().await
    }
}

impl Drop for ConversationController {
    /// Tearing the controller down cancels any pending reply so it cannot
    /// append into state nobody owns anymore.
    fn drop(&mut self) {
        self.inner.shutdown.cancel();
    }
}

/// The `AwaitingReply -> Idle` transition: sleep out the simulated latency,
/// then append the reply, persist best-effort, and go idle.
async fn deliver_reply(
    inner: Arc<ControllerInner>,
    picked: SelectedReply,
    cancel: CancellationToken,
) {
    tokio::select! {
        _ = cancel.cancelled() => return,
        _ = tokio::time::sleep(picked.delay) => {}
    }

    let mut store = inner.store.write().await;
    // clear() may have won the lock race while we slept
    if cancel.is_cancelled() {
        return;
    }
    let message = Message::genie(picked.reply);
    store.append(message.clone());
    if let Err(e) = store.persist().await {
        // non-fatal: the in-memory transcript stays authoritative
        tracing::warn!("transcript persistence failed, continuing in memory: {e}");
    }
    drop(store);

    *inner.phase.write().await = ControllerPhase::Idle;
    inner
        .emit(ConversationEvent::MessageAppended { message })
        .await;
    inner
        .emit(ConversationEvent::ProcessingChanged { processing: false })
        .await;
}
