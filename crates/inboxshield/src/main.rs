//! `Inbox Shield` - command line email assistant
//!
//! Connects a mailbox, classifies every visible email and prints a summary
//! and a suggested reply for each one.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod inbox;
mod render;
mod session;
mod settings;

use anyhow::bail;
use clap::Parser;
use inboxshield_core::{
    Connector, FixtureSource, JsonFileSource, Latency, MailSource, Orchestrator,
    validate_credentials,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use inbox::{AnalyzeOutcome, Inbox};
use session::Session;
use settings::{AppSettings, SETTINGS_FILE, config_dir};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the rendered inbox on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inboxshield=debug,inboxshield_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Inbox Shield");

    let cli = Cli::parse();
    let dir = config_dir();

    if cli.logout {
        if Session::logout(&dir).await? {
            println!("Signed out");
        } else {
            println!("Nobody was signed in");
        }
        return Ok(());
    }

    let session = Session::load(&dir).await?;
    let settings_path = dir.join(SETTINGS_FILE);
    let mut settings = AppSettings::load(&settings_path).await?;
    settings.apply(&cli);
    if cli.save {
        settings.save(&settings_path).await?;
        info!(path = %settings_path.display(), "Saved settings");
    }

    let latency = if cli.no_delay {
        Latency::none()
    } else {
        settings.latency
    };

    let credentials = settings.credentials(cli.secret.clone().unwrap_or_default());
    if let Err(errors) = validate_credentials(&credentials) {
        for error in &errors {
            eprintln!("{}: {error}", error.field());
        }
        bail!("Invalid connection details");
    }

    let result = Connector::new(latency).connect(&credentials).await;
    if !result.success {
        bail!(result.message);
    }
    println!("{}", result.message);

    let header = session.header();
    match &settings.inbox {
        Some(path) => {
            let source = JsonFileSource::new(path).with_latency(latency.fetch());
            run(source, latency, &header, &cli).await
        }
        None => {
            let source = FixtureSource::demo().with_latency(latency.fetch());
            run(source, latency, &header, &cli).await
        }
    }
}

/// Load the inbox, analyze what the filters leave visible and print it.
async fn run<S: MailSource>(
    source: S,
    latency: Latency,
    header: &str,
    cli: &Cli,
) -> anyhow::Result<()> {
    let inbox = Inbox::new(Orchestrator::new(source).with_latency(latency));
    inbox.set_connected(true);

    let count = inbox.refresh().await?;
    info!(count, "Inbox loaded");

    for (id, outcome) in inbox.analyze_visible(&cli.search, &cli.category).await {
        match outcome {
            Ok(AnalyzeOutcome::Analyzed(category)) => {
                info!(%id, %category, "Analyzed email");
            }
            Ok(other) => warn!(%id, ?other, "Analysis not applied"),
            Err(e) => warn!(%id, error = %e, "Analysis failed"),
        }
    }

    print!(
        "{}",
        render::inbox(header, &inbox.snapshot(), &cli.search, &cli.category)
    );
    Ok(())
}
