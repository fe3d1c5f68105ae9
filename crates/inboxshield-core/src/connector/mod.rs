//! Mailbox connector.
//!
//! Checks connection credentials and reports the outcome as a
//! [`ConnectionResult`] rather than an error, so callers branch on a flag.
//! The network round-trip sits behind the [`Handshake`] trait; the default
//! [`SimulatedHandshake`] only waits for the provider's configured latency.

mod credentials;
mod validation;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{Latency, pause};

pub use credentials::{ConnectionCredentials, DEFAULT_IMAP_PORT, Endpoint, Provider};
pub use validation::{ValidationError, ValidationResult, validate_credentials};

/// Outcome of a connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionResult {
    /// Whether the mailbox is now connected.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl ConnectionResult {
    /// Successful connection.
    #[must_use]
    pub fn connected(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Failed connection.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Errors a handshake can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandshakeError {
    /// Server could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Server rejected the credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

/// The network step of a connection attempt.
pub trait Handshake {
    /// Talk to `endpoint` with `credentials`.
    fn handshake(
        &self,
        endpoint: &Endpoint,
        credentials: &ConnectionCredentials,
    ) -> impl Future<Output = Result<(), HandshakeError>>;
}

/// Handshake that always succeeds after the provider's simulated latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedHandshake {
    latency: Latency,
}

impl SimulatedHandshake {
    /// Create a simulated handshake with the given delays.
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

impl Handshake for SimulatedHandshake {
    async fn handshake(
        &self,
        _endpoint: &Endpoint,
        credentials: &ConnectionCredentials,
    ) -> Result<(), HandshakeError> {
        pause(self.latency.connect(credentials.provider)).await;
        Ok(())
    }
}

/// Connects mailboxes.
#[derive(Debug, Clone, Default)]
pub struct Connector<H = SimulatedHandshake> {
    handshake: H,
}

impl Connector<SimulatedHandshake> {
    /// Connector using [`SimulatedHandshake`] with the given delays.
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self::with_handshake(SimulatedHandshake::new(latency))
    }
}

impl<H: Handshake> Connector<H> {
    /// Connector using a custom handshake.
    #[must_use]
    pub const fn with_handshake(handshake: H) -> Self {
        Self { handshake }
    }

    /// Connect a mailbox.
    ///
    /// A custom provider without a usable server address fails immediately,
    /// before any network attempt. Handshake failures are reported as
    /// `success == false` with the error in the message.
    pub async fn connect(&self, credentials: &ConnectionCredentials) -> ConnectionResult {
        let endpoint = match credentials.endpoint() {
            Ok(endpoint) => endpoint,
            Err(error) => {
                warn!(provider = %credentials.provider, %error, "Rejected connection request");
                return ConnectionResult::failed(error.message());
            }
        };

        info!(
            provider = %credentials.provider,
            address = %credentials.address,
            %endpoint,
            "Connecting mailbox"
        );

        match self.handshake.handshake(&endpoint, credentials).await {
            Ok(()) => {
                info!(provider = %credentials.provider, "Mailbox connected");
                ConnectionResult::connected(format!(
                    "Successfully connected to {} account",
                    credentials.provider.display_name()
                ))
            }
            Err(error) => {
                warn!(provider = %credentials.provider, %error, "Mailbox connection failed");
                ConnectionResult::failed(error.to_string())
            }
        }
    }

    /// Connect a Gmail mailbox. Same as [`connect`](Self::connect) with
    /// [`Provider::Gmail`] and no server.
    pub async fn connect_gmail(
        &self,
        address: impl Into<String>,
        secret: impl Into<String>,
    ) -> ConnectionResult {
        self.connect(&ConnectionCredentials::gmail(address, secret))
            .await
    }
}
