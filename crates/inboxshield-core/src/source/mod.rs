//! Mail sources.
//!
//! The orchestrator pulls the inbox from a [`MailSource`]. Two are provided:
//! [`FixtureSource`] serves an in-memory list (the demo inbox by default) and
//! [`JsonFileSource`] reads a JSON array of records from disk.

mod fixture;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::Result;
use crate::config::pause;
use crate::model::EmailRecord;

pub use fixture::demo_inbox;

/// Where the inbox comes from.
pub trait MailSource {
    /// Fetch every message, in arrival order.
    ///
    /// A failure must be returned as an error, never as an empty list.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<EmailRecord>>>;
}

/// In-memory mail source.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    records: Vec<EmailRecord>,
    latency: Duration,
}

impl FixtureSource {
    /// Source serving `records`.
    #[must_use]
    pub const fn new(records: Vec<EmailRecord>) -> Self {
        Self {
            records,
            latency: Duration::ZERO,
        }
    }

    /// Source serving the five-message demo inbox.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(demo_inbox())
    }

    /// Wait `latency` before every fetch.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl MailSource for FixtureSource {
    async fn fetch_all(&self) -> Result<Vec<EmailRecord>> {
        pause(self.latency).await;
        debug!(count = self.records.len(), "Served fixture inbox");
        Ok(self.records.clone())
    }
}

/// Mail source backed by a JSON file holding an array of records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    latency: Duration,
}

impl JsonFileSource {
    /// Source reading `path` on every fetch.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latency: Duration::ZERO,
        }
    }

    /// Wait `latency` before every fetch.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// File this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MailSource for JsonFileSource {
    async fn fetch_all(&self) -> Result<Vec<EmailRecord>> {
        pause(self.latency).await;
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<EmailRecord> = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), count = records.len(), "Loaded inbox file");
        Ok(records)
    }
}
