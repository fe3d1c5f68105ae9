//! Connect form validation.

use super::credentials::{ConnectionCredentials, Provider};

/// Validation error for connection credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Email address is empty.
    EmptyAddress,
    /// Email address format is invalid.
    InvalidAddress,
    /// Password is empty.
    EmptySecret,
    /// Custom provider selected without a server address.
    MissingCustomServer,
    /// Custom server address could not be parsed.
    InvalidCustomServer,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "Email address is required",
            Self::InvalidAddress => "Invalid email address format",
            Self::EmptySecret => "Password is required",
            Self::MissingCustomServer => "Custom IMAP server address is required",
            Self::InvalidCustomServer => "Custom IMAP server must look like host or host:port",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyAddress | Self::InvalidAddress => "address",
            Self::EmptySecret => "secret",
            Self::MissingCustomServer | Self::InvalidCustomServer => "server",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating credentials.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate everything the connect form collects.
///
/// [`Connector::connect`](super::Connector::connect) only enforces the custom
/// server rule; front ends call this first to report every problem at once.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_credentials(credentials: &ConnectionCredentials) -> ValidationResult {
    let mut errors = Vec::new();

    if credentials.address.trim().is_empty() {
        errors.push(ValidationError::EmptyAddress);
    } else if !is_valid_email(&credentials.address) {
        errors.push(ValidationError::InvalidAddress);
    }

    if credentials.secret.is_empty() {
        errors.push(ValidationError::EmptySecret);
    }

    if credentials.provider == Provider::Custom
        && let Err(error) = credentials.endpoint()
    {
        errors.push(error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}
