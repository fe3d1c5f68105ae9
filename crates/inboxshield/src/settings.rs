//! Persistent application settings.

use std::path::{Path, PathBuf};

use anyhow::Context;
use inboxshield_core::{ConnectionCredentials, Latency, Provider};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Settings file name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Directory holding settings and session files.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inboxshield")
}

/// Application settings that persist across sessions. The secret is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    /// Mailbox provider.
    pub provider: Provider,
    /// Email address.
    pub address: String,
    /// IMAP server for the custom provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// JSON inbox file; the demo inbox is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbox: Option<PathBuf>,
    /// Simulated delays.
    pub latency: Latency,
}

impl AppSettings {
    /// Load settings, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save settings, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))
    }

    /// Apply command line overrides.
    pub fn apply(&mut self, cli: &Cli) {
        if let Some(provider) = cli.provider {
            self.provider = provider;
        }
        if let Some(address) = &cli.address {
            self.address.clone_from(address);
        }
        if cli.server.is_some() {
            self.server.clone_from(&cli.server);
        }
        if cli.inbox.is_some() {
            self.inbox.clone_from(&cli.inbox);
        }
    }

    /// Connection credentials for these settings.
    #[must_use]
    pub fn credentials(&self, secret: String) -> ConnectionCredentials {
        ConnectionCredentials {
            provider: self.provider,
            address: self.address.clone(),
            secret,
            server: self.server.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load(&dir.path().join(SETTINGS_FILE))
            .await
            .unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.latency, Latency::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = AppSettings {
            provider: Provider::Custom,
            address: "me@example.com".into(),
            server: Some("imap.example.com".into()),
            inbox: None,
            latency: Latency::none(),
        };

        settings.save(&path).await.unwrap();
        let loaded = AppSettings::load(&path).await.unwrap();

        assert_eq!(loaded, settings);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"provider\": \"custom\""));
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "provider = gmail").unwrap();
        assert!(AppSettings::load(&path).await.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = AppSettings {
            address: "old@gmail.com".into(),
            ..AppSettings::default()
        };
        let cli = Cli::try_parse_from([
            "inboxshield",
            "--provider",
            "outlook",
            "--address",
            "new@outlook.com",
        ])
        .unwrap();

        settings.apply(&cli);

        assert_eq!(settings.provider, Provider::Outlook);
        assert_eq!(settings.address, "new@outlook.com");
        assert!(settings.server.is_none());

        let creds = settings.credentials("pw".into());
        assert_eq!(creds.provider, Provider::Outlook);
        assert_eq!(creds.secret, "pw");
    }
}
