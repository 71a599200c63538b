//! Error types for the djinn conversation core.

use thiserror::Error;

/// Rejections produced when a candidate message fails validation.
///
/// These are user-correctable: the caller surfaces them and the conversation
/// continues unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message was empty after trimming surrounding whitespace.
    #[error("message is empty")]
    Empty,

    /// The trimmed message exceeds the configured length limit.
    #[error("message is too long ({length} characters, limit is {max})")]
    TooLong { length: usize, max: usize },
}

/// Why a submission was not accepted by the controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A reply is already pending; submissions are rejected, not queued.
    #[error("a reply is already pending")]
    Busy,

    /// The submitted text failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Failure to write the transcript to durable storage.
///
/// Always non-fatal: the in-memory conversation stays authoritative and the
/// error is logged and swallowed at the controller boundary.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("transcript write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("transcript serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store refused the write (quota exceeded, disabled, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure to read a previously persisted transcript.
///
/// Non-fatal: on any restore failure the store starts empty.
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("transcript read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted transcript is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Startup misconfiguration.
///
/// The sole fatal error class: an invalid configuration prevents the
/// controller from being constructed at all.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reply set must not be empty")]
    EmptyReplySet,

    #[error("invalid delay range: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
