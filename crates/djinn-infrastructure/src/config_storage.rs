//! TOML configuration loading.

use std::path::Path;

use djinn_core::config::ChatConfig;
use djinn_core::error::ConfigError;
use tokio::fs;

/// Loads the startup configuration from a TOML file.
///
/// A missing file is not an error: defaults apply. An unreadable or
/// unparseable file is fatal, as is a configuration that fails validation —
/// startup misconfiguration must prevent the controller from initializing.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read, parsed, or
/// validated.
pub async fn load_config(path: impl AsRef<Path>) -> Result<ChatConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ChatConfig::default());
    }

    let content = fs::read_to_string(path).await?;
    let config: ChatConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(temp_dir.path().join("config.toml")).await.unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[tokio::test]
    async fn values_override_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
max_message_length = 140
replies = ["yes", "no"]

[delay]
min_ms = 5
max_ms = 10
"#,
        )
        .unwrap();

        let config = load_config(&path).await.unwrap();
        assert_eq!(config.max_message_length, 140);
        assert_eq!(config.replies, vec!["yes".to_string(), "no".to_string()]);
        assert_eq!(config.delay.min_ms, 5);
        assert_eq!(config.delay.max_ms, 10);
        // untouched fields keep their defaults
        assert_eq!(config.persist_cap, ChatConfig::default().persist_cap);
    }

    #[tokio::test]
    async fn unparseable_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "max_message_length = \"not a number\"").unwrap();

        assert!(matches!(
            load_config(&path).await,
            Err(ConfigError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn invalid_configuration_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "replies = []").unwrap();

        assert!(matches!(
            load_config(&path).await,
            Err(ConfigError::EmptyReplySet)
        ));
    }
}
