//! Rule-based email classifier.
//!
//! Classification walks an ordered list of [`Rule`]s and stops at the first
//! one whose predicate matches. Each rule builds the whole
//! [`AnalysisResult`]: category, summary bullets and suggested reply. Mail
//! that no rule recognises is classified as [`Category::Other`] with an
//! empty summary and no reply.
//!
//! The built-in rules, in priority order:
//!
//! | # | Category   | Matches when                                                   |
//! |---|------------|----------------------------------------------------------------|
//! | 1 | job-offer  | subject has "position", or body has "opportunity" and "experience" |
//! | 2 | marketing  | subject has "boost" or "revenue", or body has "sales"           |
//! | 3 | support    | subject has "subscription", or sender address has "support"     |
//! | 4 | cold-email | subject has "collaboration", or body has "partnership"          |
//! | 5 | newsletter | subject has "weekly", or sender address has "newsletter"        |
//!
//! All matching is case-insensitive and only looks at the fields a rule names.

mod rules;

use std::sync::LazyLock;

use tracing::debug;

use crate::model::{AnalysisResult, Category, EmailRecord};

pub use rules::{builtin_rules, cold_email, job_offer, marketing, newsletter, support};

/// Decides whether an email belongs to a rule.
pub type Predicate = fn(&EmailRecord) -> bool;

/// Produces summary bullets or a reply for a matched email.
pub type Builder<T> = fn(&EmailRecord) -> T;

/// One classification rule: a predicate plus the builders for its result.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    category: Category,
    predicate: Predicate,
    summary: Builder<Vec<String>>,
    reply: Builder<String>,
}

impl Rule {
    /// Create a rule for `category`.
    #[must_use]
    pub const fn new(
        category: Category,
        predicate: Predicate,
        summary: Builder<Vec<String>>,
        reply: Builder<String>,
    ) -> Self {
        Self {
            category,
            predicate,
            summary,
            reply,
        }
    }

    /// Category this rule assigns.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Whether this rule applies to `email`.
    #[must_use]
    pub fn matches(&self, email: &EmailRecord) -> bool {
        (self.predicate)(email)
    }

    /// Build the analysis for an email this rule matched.
    #[must_use]
    pub fn build(&self, email: &EmailRecord) -> AnalysisResult {
        AnalysisResult::new(self.category, (self.summary)(email), (self.reply)(email))
    }
}

/// Ordered, first-match-wins rule set.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Classifier {
    /// Classifier with an explicit rule list, evaluated in order.
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Classifier with the built-in rules.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }

    /// Append a rule with the lowest priority.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify one email. Never fails: unmatched mail becomes [`Category::Other`].
    #[must_use]
    pub fn classify(&self, email: &EmailRecord) -> AnalysisResult {
        match self.rules.iter().find(|rule| rule.matches(email)) {
            Some(rule) => {
                debug!(id = %email.id, category = %rule.category, "Rule matched");
                rule.build(email)
            }
            None => {
                debug!(id = %email.id, "No rule matched");
                AnalysisResult::unmatched()
            }
        }
    }
}

static BUILTIN: LazyLock<Classifier> = LazyLock::new(Classifier::builtin);

/// Classify an email with the built-in rules.
#[must_use]
pub fn classify(email: &EmailRecord) -> AnalysisResult {
    BUILTIN.classify(email)
}
