//! Refresh and per-email analysis over inbox snapshots.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::config::{Latency, pause};
use crate::model::{EmailId, EmailRecord, Snapshot};
use crate::source::MailSource;
use crate::{Error, Result};

/// Coordinates the mail source and the classifier.
///
/// Every operation returns a new [`Snapshot`]; none of them touch the
/// snapshot they were given. Callers that run several analyses at once are
/// responsible for applying each result to the latest snapshot (last write
/// wins) and for not analyzing the same email twice concurrently.
#[derive(Debug, Clone)]
pub struct Orchestrator<S> {
    source: S,
    classifier: Classifier,
    analysis_latency: Duration,
}

impl<S: MailSource> Orchestrator<S> {
    /// Orchestrator with the built-in classifier and no analysis delay.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            classifier: Classifier::builtin(),
            analysis_latency: Duration::ZERO,
        }
    }

    /// Use a different classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Simulate inference time using `latency.analysis_ms`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Latency) -> Self {
        self.analysis_latency = latency.analysis();
        self
    }

    /// The mail source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the inbox and build a fresh snapshot.
    ///
    /// This replaces the store wholesale: analysis attached to earlier
    /// snapshots is not carried over.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the fetch fails, or [`Error::Source`]
    /// if it returned two messages with the same identifier.
    pub async fn refresh(&self) -> Result<Snapshot> {
        let records = self.source.fetch_all().await?;

        if let Some(duplicate) = first_duplicate(&records) {
            return Err(Error::Source(format!(
                "duplicate email id in source: {duplicate}"
            )));
        }

        let snapshot = Snapshot::new(records);
        info!(
            count = snapshot.len(),
            unread = snapshot.unread_count(),
            "Inbox refreshed"
        );
        Ok(snapshot)
    }

    /// Classify one email and return a snapshot carrying the result.
    ///
    /// Re-analyzing an email overwrites its previous analysis; the classifier
    /// is deterministic, so the result is the same every time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not in `snapshot`. The given
    /// snapshot is never modified.
    pub async fn analyze_one(&self, id: &EmailId, snapshot: &Snapshot) -> Result<Snapshot> {
        let email = snapshot.get(id).ok_or_else(|| Error::NotFound(id.clone()))?;
        debug!(%id, "Analyzing email");

        pause(self.analysis_latency).await;
        let analysis = self.classifier.classify(email);

        info!(%id, category = %analysis.category, "Email analyzed");
        snapshot.with_analysis(id, analysis)
    }
}

fn first_duplicate(records: &[EmailRecord]) -> Option<&EmailId> {
    let mut seen = HashSet::with_capacity(records.len());
    records.iter().map(|r| &r.id).find(|id| !seen.insert(*id))
}
