//! Default filesystem locations for djinn data.
//!
//! Everything lives under one dot-directory in the user's home:
//!
//! ```text
//! ~/.djinn/
//! ├── config.toml        # startup configuration
//! └── transcript.json    # persisted conversation transcript
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Returns the djinn base directory (`~/.djinn`).
pub fn default_base_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir()
        .map(|home| home.join(".djinn"))
        .ok_or(PathError::HomeDirNotFound)
}

/// Returns the path to the persisted transcript.
pub fn transcript_file() -> Result<PathBuf, PathError> {
    Ok(default_base_dir()?.join("transcript.json"))
}

/// Returns the path to the configuration file.
pub fn config_file() -> Result<PathBuf, PathError> {
    Ok(default_base_dir()?.join("config.toml"))
}
