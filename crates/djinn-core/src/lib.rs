//! Core conversation lifecycle for djinn.
//!
//! A submission flows validate -> append user message -> simulated latency ->
//! append canned reply -> trim -> persist. There is no reasoning backend:
//! replies come from a fixed set, chosen at random. Persistence is
//! best-effort; the in-memory conversation is always authoritative.

pub mod config;
pub mod conversation;
pub mod error;

pub use config::{ChatConfig, DelayRange};
pub use conversation::{
    ControllerPhase, ConversationController, ConversationEvent, ConversationStore, Message,
    ResponseSelector, Sender, TranscriptRepository,
};
pub use error::{ConfigError, PersistError, RestoreError, SubmitError, ValidationError};
