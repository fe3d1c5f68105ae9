//! Signed-in user.
//!
//! The session is loaded once at startup and handed to whatever needs it;
//! nothing reads it from global state.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Session file name inside the config directory.
pub const SESSION_FILE: &str = "user.json";

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account email address.
    pub email: String,
    /// Display name, if known.
    #[serde(default)]
    pub name: Option<String>,
}

/// Current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Signed-in user, if any.
    pub user: Option<UserProfile>,
}

impl Session {
    /// Load the session stored in `dir`. A missing file means nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(SESSION_FILE);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let user = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;

        Ok(Self { user: Some(user) })
    }

    /// Forget the signed-in user stored in `dir`. Returns whether anyone was signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be removed.
    pub async fn logout(dir: &Path) -> anyhow::Result<bool> {
        let path = dir.join(SESSION_FILE);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }

    /// Header line naming the signed-in user.
    #[must_use]
    pub fn header(&self) -> String {
        match &self.user {
            Some(UserProfile {
                name: Some(name),
                email,
            }) => format!("Signed in as {name} <{email}>"),
            Some(user) => format!("Signed in as {}", user.email),
            None => "Not signed in".to_string(),
        }
    }
}
