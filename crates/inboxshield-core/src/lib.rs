//! # inboxshield-core
//!
//! Core logic for the Inbox Shield email assistant.
//!
//! This crate provides:
//! - **Domain models** - email records, analysis results and immutable inbox snapshots
//! - **Classifier** - an ordered, first-match-wins rule set that assigns a
//!   category, summary bullets and a suggested reply
//! - **Mailbox connector** - provider-aware connection checks with simulated latency
//! - **Orchestrator** - refresh and per-email analysis over copy-on-write snapshots
//! - **Filter** - search and category filtering for display
//!
//! ## Example
//!
//! ```ignore
//! use inboxshield_core::{FixtureSource, Orchestrator, filter};
//!
//! let orchestrator = Orchestrator::new(FixtureSource::demo());
//! let snapshot = orchestrator.refresh().await?;
//! let snapshot = orchestrator.analyze_one(&"1".into(), &snapshot).await?;
//! let visible = filter(&snapshot, "", "job-offer");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod config;
pub mod connector;
mod error;
mod filter;
pub mod model;
mod orchestrator;
pub mod source;

pub use classifier::{Classifier, Rule, classify};
pub use config::Latency;
pub use connector::{
    ConnectionCredentials, ConnectionResult, Connector, Endpoint, Handshake, HandshakeError,
    Provider, SimulatedHandshake, ValidationError, validate_credentials,
};
pub use error::{Error, Result};
pub use filter::{CategoryFilter, filter};
pub use model::{AnalysisResult, Category, EmailId, EmailRecord, Sender, Snapshot};
pub use orchestrator::Orchestrator;
pub use source::{FixtureSource, JsonFileSource, MailSource};
