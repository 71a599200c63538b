//! Storage adapters for djinn.
//!
//! Implements the core's persistence seam over the local filesystem and
//! loads startup configuration from TOML.

pub mod atomic_json;
pub mod config_storage;
pub mod paths;
pub mod transcript;

pub use crate::config_storage::load_config;
pub use crate::transcript::JsonTranscriptRepository;
