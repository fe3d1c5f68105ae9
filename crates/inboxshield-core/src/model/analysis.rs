//! Classification result models.

use serde::{Deserialize, Deserializer, Serialize};

/// Category assigned to an email by the classifier.
///
/// Serialized as a kebab-case tag (`job-offer`). The spaced tags used by
/// older exports (`job offer`, `cold email`) are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// A recruiter reaching out about a position.
    #[serde(alias = "job offer")]
    JobOffer,
    /// Sales and product pitches.
    Marketing,
    /// Account, billing and subscription notices from a vendor.
    Support,
    /// Unsolicited collaboration or partnership requests.
    #[serde(alias = "cold email")]
    ColdEmail,
    /// Periodic digests and roundups.
    Newsletter,
    /// Junk mail.
    Spam,
    /// Anything no rule recognised.
    #[default]
    Other,
}

impl Category {
    /// Categories in the order the filter bar lists them.
    pub const FILTERABLE: [Self; 6] = [
        Self::JobOffer,
        Self::ColdEmail,
        Self::Support,
        Self::Marketing,
        Self::Newsletter,
        Self::Spam,
    ];

    /// Parse a category tag, accepting kebab-case, `snake_case` and spaced forms.
    ///
    /// Returns `None` for unknown tags.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "job-offer" => Some(Self::JobOffer),
            "marketing" => Some(Self::Marketing),
            "support" => Some(Self::Support),
            "cold-email" => Some(Self::ColdEmail),
            "newsletter" => Some(Self::Newsletter),
            "spam" => Some(Self::Spam),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Serialized tag for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JobOffer => "job-offer",
            Self::Marketing => "marketing",
            Self::Support => "support",
            Self::ColdEmail => "cold-email",
            Self::Newsletter => "newsletter",
            Self::Spam => "spam",
            Self::Other => "other",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::JobOffer => "Job Offer",
            Self::Marketing => "Marketing",
            Self::Support => "Support",
            Self::ColdEmail => "Cold Email",
            Self::Newsletter => "Newsletter",
            Self::Spam => "Spam",
            Self::Other => "Other",
        }
    }

    /// Badge colour for this category.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::JobOffer => "green",
            Self::Marketing => "orange",
            Self::Support => "purple",
            Self::ColdEmail => "blue",
            Self::Newsletter => "yellow",
            Self::Spam => "red",
            Self::Other => "gray",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the classifier for one email.
///
/// Immutable once built; re-analysis replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Assigned category.
    #[serde(alias = "type")]
    pub category: Category,
    /// Summary bullets, in reading order.
    pub summary: Vec<String>,
    /// Suggested reply. Empty means no reply is needed.
    pub suggested_reply: String,
    /// Always `true`; kept so serialized records stay readable by older clients.
    /// Whatever value is read back is ignored.
    #[serde(default = "analyzed_default", deserialize_with = "always_analyzed")]
    pub analyzed: bool,
}

const fn analyzed_default() -> bool {
    true
}

fn always_analyzed<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    bool::deserialize(deserializer).map(|_| true)
}

impl AnalysisResult {
    /// Create a result for `category`.
    #[must_use]
    pub fn new(category: Category, summary: Vec<String>, suggested_reply: String) -> Self {
        Self {
            category,
            summary,
            suggested_reply,
            analyzed: true,
        }
    }

    /// Result for mail that no rule recognised.
    #[must_use]
    pub fn unmatched() -> Self {
        Self::new(Category::Other, Vec::new(), String::new())
    }

    /// Whether the classifier suggested replying at all.
    #[must_use]
    pub fn has_reply(&self) -> bool {
        !self.suggested_reply.is_empty()
    }
}
