use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_SETTINGS_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy_path: PathBuf,
    pub confirm_timeout_secs: u64,
    /// Register commands in this guild only instead of globally.
    pub dev_guild_id: Option<u64>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy_path: PathBuf::from("policy.toml"),
            confirm_timeout_secs: 60,
            dev_guild_id: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    /// A missing file means defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("{} is not a valid settings file", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

pub async fn get() -> Result<Settings> {
    let path =
        env::var("GUILD_UTILITIES_CONFIG").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    Settings::load(Path::new(&path)).await
}

pub fn token() -> Result<String> {
    env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(settings.policy_path, PathBuf::from("policy.toml"));
        assert_eq!(settings.confirm_timeout(), Duration::from_secs(60));
        assert_eq!(settings.dev_guild_id, None);
    }

    #[tokio::test]
    async fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "confirm_timeout_secs = 15\ndev_guild_id = 1234\n")
            .await
            .unwrap();

        let settings = Settings::load(&path).await.unwrap();
        assert_eq!(settings.confirm_timeout_secs, 15);
        assert_eq!(settings.dev_guild_id, Some(1234));
        assert_eq!(settings.log_filter, "info");
    }

    #[tokio::test]
    async fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "confirm_timeout_secs = \"soon\"").await.unwrap();
        assert!(Settings::load(&path).await.is_err());
    }
}
