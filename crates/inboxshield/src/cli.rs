//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use inboxshield_core::Provider;

/// Connect a mailbox, analyze the inbox and print suggested replies.
#[derive(Debug, Parser)]
#[command(name = "inboxshield", version, about)]
pub struct Cli {
    /// Mailbox provider: gmail, outlook or custom.
    #[arg(long, value_parser = parse_provider)]
    pub provider: Option<Provider>,

    /// Email address to connect.
    #[arg(long)]
    pub address: Option<String>,

    /// Password or app password.
    #[arg(long, env = "INBOXSHIELD_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// IMAP server (host or host:port), required for the custom provider.
    #[arg(long)]
    pub server: Option<String>,

    /// Read the inbox from a JSON file instead of the demo inbox.
    #[arg(long)]
    pub inbox: Option<PathBuf>,

    /// Only show messages whose subject or sender contains this text.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Only show messages in this category ("all" for everything).
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Skip the simulated network and analysis delays.
    #[arg(long)]
    pub no_delay: bool,

    /// Remember provider, address, server and inbox path in the settings file.
    #[arg(long)]
    pub save: bool,

    /// Forget the signed-in user and exit.
    #[arg(long)]
    pub logout: bool,
}

fn parse_provider(s: &str) -> Result<Provider, String> {
    Provider::parse(s).ok_or_else(|| format!("unknown provider '{s}' (expected gmail, outlook or custom)"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["inboxshield"]).unwrap();
        assert_eq!(cli.category, "all");
        assert!(cli.search.is_empty());
        assert!(cli.provider.is_none());
        assert!(!cli.no_delay);
    }

    #[test]
    fn test_custom_provider_flags() {
        let cli = Cli::try_parse_from([
            "inboxshield",
            "--provider",
            "custom",
            "--server",
            "imap.example.com:993",
            "--category",
            "newsletter",
        ])
        .unwrap();
        assert_eq!(cli.provider, Some(Provider::Custom));
        assert_eq!(cli.server.as_deref(), Some("imap.example.com:993"));
        assert_eq!(cli.category, "newsletter");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(Cli::try_parse_from(["inboxshield", "--provider", "yahoo"]).is_err());
    }
}
