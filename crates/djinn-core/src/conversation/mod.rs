//! Conversation domain module.
//!
//! Everything that governs the message lifecycle lives here:
//!
//! - `message`: the log entry types (`Sender`, `Message`)
//! - `validator`: outbound message validation
//! - `selector`: canned reply and latency selection (`ResponseSelector`)
//! - `store`: the ordered, bounded log (`ConversationStore`)
//! - `repository`: the persistence seam (`TranscriptRepository`)
//! - `event`: view-layer notifications (`ConversationEvent`)
//! - `controller`: the submission lifecycle (`ConversationController`)

mod controller;
mod event;
mod message;
mod repository;
mod selector;
mod store;
mod validator;

pub use controller::{ControllerPhase, ConversationController};
pub use event::ConversationEvent;
pub use message::{Message, Sender};
pub use repository::TranscriptRepository;
pub use selector::{ResponseSelector, SelectedReply};
pub use store::ConversationStore;
pub use validator::validate;
