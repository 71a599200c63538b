//! Startup configuration for the conversation core.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Closed interval of simulated reply latencies, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    #[serde(default = "default_delay_min_ms")]
    pub min_ms: u64,
    #[serde(default = "default_delay_max_ms")]
    pub max_ms: u64,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: default_delay_min_ms(),
            max_ms: default_delay_max_ms(),
        }
    }
}

/// Immutable startup parameters for a conversation.
///
/// Loaded once (typically from a TOML file) and validated before the
/// controller is constructed. The two view-layer toggles are carried through
/// untouched; the core never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum accepted message length, in characters, after trimming.
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    /// Maximum number of messages retained in memory.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Maximum number of messages written to durable storage.
    /// May differ from `max_history`.
    #[serde(default = "default_persist_cap")]
    pub persist_cap: usize,

    /// Simulated reply latency range.
    #[serde(default)]
    pub delay: DelayRange,

    /// The canned reply set. Must not be empty.
    #[serde(default = "default_replies")]
    pub replies: Vec<String>,

    /// View-layer toggle: show a "thinking" indicator while a reply is
    /// pending. Not consumed by the core.
    #[serde(default = "default_true")]
    pub show_thinking_indicator: bool,

    /// View-layer toggle: announce replies for assistive output. Not
    /// consumed by the core.
    #[serde(default = "default_true")]
    pub announce_replies: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_message_length(),
            max_history: default_max_history(),
            persist_cap: default_persist_cap(),
            delay: DelayRange::default(),
            replies: default_replies(),
            show_thinking_indicator: true,
            announce_replies: true,
        }
    }
}

impl ChatConfig {
    /// Checks the fatal startup conditions.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply set is empty or the delay range is
    /// inverted. Either prevents the controller from initializing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.replies.is_empty() {
            return Err(ConfigError::EmptyReplySet);
        }
        if self.delay.min_ms > self.delay.max_ms {
            return Err(ConfigError::InvalidDelayRange {
                min_ms: self.delay.min_ms,
                max_ms: self.delay.max_ms,
            });
        }
        Ok(())
    }
}

fn default_max_message_length() -> usize {
    500
}

fn default_max_history() -> usize {
    100
}

fn default_persist_cap() -> usize {
    50
}

fn default_delay_min_ms() -> u64 {
    600
}

fn default_delay_max_ms() -> u64 {
    1800
}

fn default_true() -> bool {
    true
}

fn default_replies() -> Vec<String> {
    [
        "The lamp has heard you. Whether it listened is another matter.",
        "Your wish has been noted in the great ledger of wishes.",
        "Ah, a classic. The ancients asked for the very same thing.",
        "I foresee great things ahead. Or possibly lunch.",
        "Granted! In spirit, at least.",
        "The sands of time reveal nothing on that subject today.",
        "Even a genie must ponder that one for a few centuries.",
        "Rub the lamp twice and ask again.",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
