//! Events published to the view layer.

use serde::{Deserialize, Serialize};

use super::message::Message;

/// Notifications the controller emits for the view collaborator.
///
/// The view renders from these; the core never touches presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// A message (user or genie) was appended to the log.
    MessageAppended { message: Message },

    /// The at-most-one-in-flight submission state changed. The view uses
    /// this to enable or disable its input affordances.
    ProcessingChanged { processing: bool },

    /// The pending input buffer (owned by the view) should be cleared now.
    InputClearRequested,

    /// The conversation was cleared.
    HistoryCleared,
}
