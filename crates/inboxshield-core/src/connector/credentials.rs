//! Connection credentials and provider endpoints.

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Default IMAP port (implicit TLS).
pub const DEFAULT_IMAP_PORT: u16 = 993;

/// Mailbox provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gmail.
    #[default]
    Gmail,
    /// Microsoft Outlook / Office 365.
    Outlook,
    /// Any other IMAP server; needs an explicit server address.
    Custom,
}

impl Provider {
    /// Parse from the lowercase tag.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gmail" => Some(Self::Gmail),
            "outlook" => Some(Self::Outlook),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Lowercase tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gmail => "gmail",
            Self::Outlook => "outlook",
            Self::Custom => "custom",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Gmail => "Gmail",
            Self::Outlook => "Outlook",
            Self::Custom => "Custom Email",
        }
    }

    /// Label for the secret field. Gmail wants an app password, not the account password.
    #[must_use]
    pub const fn secret_label(&self) -> &'static str {
        match self {
            Self::Gmail => "App Password",
            Self::Outlook | Self::Custom => "Password",
        }
    }

    /// Well-known IMAP endpoint, if the provider has one.
    #[must_use]
    pub fn default_endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Gmail => Some(Endpoint::new("imap.gmail.com", DEFAULT_IMAP_PORT)),
            Self::Outlook => Some(Endpoint::new("outlook.office365.com", DEFAULT_IMAP_PORT)),
            Self::Custom => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IMAP server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Endpoint {
    /// Create an endpoint.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host` or `host:port`. The port defaults to 993.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingCustomServer`] for blank input and
    /// [`ValidationError::InvalidCustomServer`] for an empty host or a bad port.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MissingCustomServer);
        }

        let (host, port) = match s.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p != 0)
                    .ok_or(ValidationError::InvalidCustomServer)?;
                (host, port)
            }
            None => (s, DEFAULT_IMAP_PORT),
        };

        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidCustomServer);
        }

        Ok(Self::new(host, port))
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// What the user typed into the connect form.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionCredentials {
    /// Mailbox provider.
    pub provider: Provider,
    /// Email address.
    pub address: String,
    /// Password or app password.
    pub secret: String,
    /// IMAP server, only meaningful for [`Provider::Custom`].
    pub server: Option<String>,
}

impl ConnectionCredentials {
    /// Credentials for a provider with a well-known server.
    #[must_use]
    pub fn new(provider: Provider, address: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            provider,
            address: address.into(),
            secret: secret.into(),
            server: None,
        }
    }

    /// Gmail credentials.
    #[must_use]
    pub fn gmail(address: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(Provider::Gmail, address, secret)
    }

    /// Custom IMAP server credentials.
    #[must_use]
    pub fn custom(
        address: impl Into<String>,
        secret: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            server: Some(server.into()),
            ..Self::new(Provider::Custom, address, secret)
        }
    }

    /// Resolve the server to talk to.
    ///
    /// Gmail and Outlook use their well-known endpoints and ignore `server`.
    ///
    /// # Errors
    ///
    /// For [`Provider::Custom`], returns [`ValidationError::MissingCustomServer`]
    /// when no (or a blank) server was given, and
    /// [`ValidationError::InvalidCustomServer`] when it cannot be parsed.
    pub fn endpoint(&self) -> Result<Endpoint, ValidationError> {
        if let Some(endpoint) = self.provider.default_endpoint() {
            return Ok(endpoint);
        }
        let server = self
            .server
            .as_deref()
            .ok_or(ValidationError::MissingCustomServer)?;
        Endpoint::parse(server)
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for ConnectionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionCredentials")
            .field("provider", &self.provider)
            .field("address", &self.address)
            .field("secret", &"<redacted>")
            .field("server", &self.server)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in [Provider::Gmail, Provider::Outlook, Provider::Custom] {
            assert_eq!(Provider::parse(provider.as_str()), Some(provider));
        }
        assert_eq!(Provider::parse(" Outlook "), Some(Provider::Outlook));
        assert_eq!(Provider::parse("yahoo"), None);
    }

    #[test]
    fn test_well_known_endpoints() {
        let gmail = ConnectionCredentials::gmail("me@gmail.com", "pw");
        assert_eq!(gmail.endpoint().unwrap().to_string(), "imap.gmail.com:993");

        let outlook = ConnectionCredentials::new(Provider::Outlook, "me@outlook.com", "pw");
        assert_eq!(
            outlook.endpoint().unwrap(),
            Endpoint::new("outlook.office365.com", 993)
        );
    }

    #[test]
    fn test_custom_endpoint_parsing() {
        assert_eq!(
            Endpoint::parse("imap.example.com:143").unwrap(),
            Endpoint::new("imap.example.com", 143)
        );
        assert_eq!(
            Endpoint::parse("  imap.example.com ").unwrap(),
            Endpoint::new("imap.example.com", DEFAULT_IMAP_PORT)
        );
        assert_eq!(Endpoint::parse(""), Err(ValidationError::MissingCustomServer));
        assert_eq!(Endpoint::parse("   "), Err(ValidationError::MissingCustomServer));
        assert_eq!(
            Endpoint::parse("imap.example.com:http"),
            Err(ValidationError::InvalidCustomServer)
        );
        assert_eq!(Endpoint::parse(":993"), Err(ValidationError::InvalidCustomServer));
        assert_eq!(
            Endpoint::parse("imap.example.com:0"),
            Err(ValidationError::InvalidCustomServer)
        );
    }

    #[test]
    fn test_custom_without_server() {
        let mut creds = ConnectionCredentials::custom("me@example.com", "pw", "");
        assert_eq!(creds.endpoint(), Err(ValidationError::MissingCustomServer));
        creds.server = None;
        assert_eq!(creds.endpoint(), Err(ValidationError::MissingCustomServer));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = ConnectionCredentials::gmail("me@gmail.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("me@gmail.com"));
    }
}
