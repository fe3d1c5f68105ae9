//! Inbox screen state.
//!
//! Holds the current snapshot and which emails are being analyzed. All
//! methods take `&self` so several analyses can be in flight at once on the
//! current-thread runtime; no `RefCell` borrow is held across an await.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use futures::future::join_all;
use inboxshield_core::{
    Category, EmailId, EmailRecord, MailSource, Orchestrator, Snapshot, filter,
};
use tracing::debug;

/// What happened to an analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// The email was analyzed and the inbox updated.
    Analyzed(Category),
    /// An analysis of this email was already running; nothing was done.
    Busy,
    /// The inbox was refreshed while analyzing; the result was dropped.
    Stale,
}

/// Inbox screen state.
pub struct Inbox<S> {
    orchestrator: Orchestrator<S>,
    snapshot: RefCell<Snapshot>,
    busy: RefCell<HashSet<EmailId>>,
    connected: Cell<bool>,
    generation: Cell<u64>,
}

/// Clears an email's busy mark when the analysis ends, however it ends.
struct BusyGuard<'a> {
    busy: &'a RefCell<HashSet<EmailId>>,
    id: EmailId,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.borrow_mut().remove(&self.id);
    }
}

impl<S: MailSource> Inbox<S> {
    /// Empty, disconnected inbox.
    #[must_use]
    pub fn new(orchestrator: Orchestrator<S>) -> Self {
        Self {
            orchestrator,
            snapshot: RefCell::new(Snapshot::default()),
            busy: RefCell::new(HashSet::new()),
            connected: Cell::new(false),
            generation: Cell::new(0),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Whether a mailbox has been connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    /// Record the outcome of a connection attempt.
    pub fn set_connected(&self, connected: bool) {
        self.connected.set(connected);
    }

    /// Whether `id` is being analyzed right now.
    #[cfg(test)]
    #[must_use]
    pub fn is_busy(&self, id: &EmailId) -> bool {
        self.busy.borrow().contains(id)
    }

    /// Load the inbox for the first time. Works before connecting.
    ///
    /// # Errors
    ///
    /// Returns the mail source's error.
    pub async fn load(&self) -> anyhow::Result<usize> {
        let fresh = self.orchestrator.refresh().await?;
        Ok(self.replace(fresh))
    }

    /// Re-fetch the inbox, dropping all analysis. Requires a connected mailbox.
    ///
    /// # Errors
    ///
    /// Fails when not connected, or with the mail source's error.
    pub async fn refresh(&self) -> anyhow::Result<usize> {
        anyhow::ensure!(
            self.is_connected(),
            "Connect a mailbox before refreshing the inbox"
        );
        self.load().await
    }

    fn replace(&self, fresh: Snapshot) -> usize {
        let count = fresh.len();
        self.busy
            .borrow_mut()
            .retain(|id| fresh.get(id).is_some());
        *self.snapshot.borrow_mut() = fresh;
        self.generation.set(self.generation.get() + 1);
        count
    }

    /// Analyze one email, unless it is already being analyzed.
    ///
    /// The result is applied to whatever snapshot is current when it lands,
    /// so concurrent analyses of different emails all keep their results.
    /// It is only re-issued if the email itself changed in the meantime.
    ///
    /// # Errors
    ///
    /// Returns the orchestrator's error, e.g. when the email is not in the inbox.
    pub async fn analyze(&self, id: &EmailId) -> anyhow::Result<AnalyzeOutcome> {
        if !self.busy.borrow_mut().insert(id.clone()) {
            debug!(%id, "Analysis already running");
            return Ok(AnalyzeOutcome::Busy);
        }
        let _guard = BusyGuard {
            busy: &self.busy,
            id: id.clone(),
        };

        let generation = self.generation.get();
        loop {
            let base = self.snapshot();
            let updated = self.orchestrator.analyze_one(id, &base).await?;

            if self.generation.get() != generation {
                debug!(%id, "Inbox refreshed during analysis; dropping result");
                return Ok(AnalyzeOutcome::Stale);
            }

            let current = self.snapshot();
            let merged = if current.is_same(&base) {
                Some(updated)
            } else if current.get(id) == base.get(id) {
                match updated.get(id).and_then(|email| email.analysis.clone()) {
                    Some(analysis) => Some(current.with_analysis(id, analysis)?),
                    None => None,
                }
            } else {
                None
            };

            if let Some(merged) = merged {
                let category = merged
                    .get(id)
                    .and_then(EmailRecord::category)
                    .unwrap_or_default();
                *self.snapshot.borrow_mut() = merged;
                return Ok(AnalyzeOutcome::Analyzed(category));
            }

            debug!(%id, "Email changed during analysis; re-issuing");
        }
    }

    /// Analyze every visible email at once.
    pub async fn analyze_visible(
        &self,
        search_term: &str,
        category: &str,
    ) -> Vec<(EmailId, anyhow::Result<AnalyzeOutcome>)> {
        let snapshot = self.snapshot();
        let ids: Vec<EmailId> = filter(&snapshot, search_term, category)
            .into_iter()
            .map(|email| email.id.clone())
            .collect();

        let outcomes = join_all(ids.iter().map(|id| self.analyze(id))).await;
        ids.into_iter().zip(outcomes).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use inboxshield_core::{FixtureSource, Latency};

    use super::*;

    fn inbox(latency: Latency) -> Inbox<FixtureSource> {
        Inbox::new(Orchestrator::new(FixtureSource::demo()).with_latency(latency))
    }

    #[tokio::test]
    async fn test_refresh_requires_connection() {
        let inbox = inbox(Latency::none());
        assert!(inbox.refresh().await.is_err());

        inbox.set_connected(true);
        assert_eq!(inbox.refresh().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_analyze_updates_snapshot() {
        let inbox = inbox(Latency::none());
        inbox.load().await.unwrap();

        let outcome = inbox.analyze(&"1".into()).await.unwrap();

        assert_eq!(outcome, AnalyzeOutcome::Analyzed(Category::JobOffer));
        assert_eq!(inbox.snapshot().analyzed_count(), 1);
        assert!(!inbox.is_busy(&"1".into()));
    }

    #[tokio::test]
    async fn test_unknown_email_clears_busy_mark() {
        let inbox = inbox(Latency::none());
        inbox.load().await.unwrap();

        assert!(inbox.analyze(&"99".into()).await.is_err());
        assert!(!inbox.is_busy(&"99".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_request_for_same_email_is_refused() {
        let inbox = inbox(Latency::default());
        inbox.load().await.unwrap();
        let id = EmailId::from("2");

        let (first, second) = tokio::join!(inbox.analyze(&id), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let busy = inbox.is_busy(&id);
            (busy, inbox.analyze(&id).await)
        });

        let (was_busy, second) = second;
        assert!(was_busy);
        assert_eq!(second.unwrap(), AnalyzeOutcome::Busy);
        assert_eq!(
            first.unwrap(),
            AnalyzeOutcome::Analyzed(Category::Marketing)
        );
        assert!(!inbox.is_busy(&id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_analyses_all_land() {
        let inbox = inbox(Latency::default());
        inbox.load().await.unwrap();

        let outcomes = inbox.analyze_visible("", "all").await;

        assert_eq!(outcomes.len(), 5);
        assert!(
            outcomes
                .iter()
                .all(|(_, o)| matches!(o, Ok(AnalyzeOutcome::Analyzed(_))))
        );
        assert_eq!(inbox.snapshot().analyzed_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_analyses_share_one_delay() {
        let latency = Latency::default();
        let inbox = inbox(latency);
        inbox.load().await.unwrap();

        let start = tokio::time::Instant::now();
        let outcomes = inbox.analyze_visible("", "all").await;
        let elapsed = start.elapsed();

        assert_eq!(outcomes.len(), 5);
        assert!(elapsed >= latency.analysis());
        assert!(elapsed < latency.analysis() * 2, "took {elapsed:?}");
        assert_eq!(inbox.snapshot().analyzed_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_during_analysis_drops_result() {
        let inbox = inbox(Latency::default());
        inbox.set_connected(true);
        inbox.load().await.unwrap();
        let id = EmailId::from("3");

        let (outcome, refreshed) = tokio::join!(inbox.analyze(&id), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            inbox.refresh().await
        });

        assert_eq!(outcome.unwrap(), AnalyzeOutcome::Stale);
        assert_eq!(refreshed.unwrap(), 5);
        assert_eq!(inbox.snapshot().analyzed_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_visible_respects_filter() {
        let inbox = inbox(Latency::none());
        inbox.load().await.unwrap();

        let outcomes = inbox.analyze_visible("recruit", "all").await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, EmailId::from("1"));
        assert_eq!(inbox.snapshot().analyzed_count(), 1);
    }
}
