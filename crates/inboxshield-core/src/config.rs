//! Simulated latency configuration.
//!
//! Every suspension point in the core sleeps for a configurable duration so
//! the front end can show progress states. Tests use [`Latency::none`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::connector::Provider;

/// Simulated round-trip delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Latency {
    /// Delay for fetching the inbox from the mail source.
    pub fetch_ms: u64,
    /// Delay for connecting to Gmail or Outlook.
    pub connect_ms: u64,
    /// Delay for connecting to a custom IMAP server.
    pub custom_connect_ms: u64,
    /// Delay for analyzing a single email.
    pub analysis_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            fetch_ms: 1000,
            connect_ms: 2000,
            custom_connect_ms: 3500,
            analysis_ms: 1500,
        }
    }
}

impl Latency {
    /// No simulated delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            fetch_ms: 0,
            connect_ms: 0,
            custom_connect_ms: 0,
            analysis_ms: 0,
        }
    }

    /// Delay for a mail source fetch.
    #[must_use]
    pub const fn fetch(&self) -> Duration {
        Duration::from_millis(self.fetch_ms)
    }

    /// Delay for a connection attempt against the given provider.
    ///
    /// Custom servers negotiate more than the well-known providers, so they
    /// use their own (longer by default) delay.
    #[must_use]
    pub const fn connect(&self, provider: Provider) -> Duration {
        match provider {
            Provider::Gmail | Provider::Outlook => Duration::from_millis(self.connect_ms),
            Provider::Custom => Duration::from_millis(self.custom_connect_ms),
        }
    }

    /// Delay for a single classification.
    #[must_use]
    pub const fn analysis(&self) -> Duration {
        Duration::from_millis(self.analysis_ms)
    }
}

/// Sleep for `duration`, skipping the timer entirely when it is zero.
pub(crate) async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
