//! Email record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::{AnalysisResult, Category};

/// Stable identifier of an email within the inbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(String);

impl EmailId {
    /// Create a new email ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmailId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EmailId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Who sent an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl Sender {
    /// Create a sender from a display name and address.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One message in the inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    /// Unique identifier.
    pub id: EmailId,
    /// Sender.
    pub from: Sender,
    /// Message subject.
    pub subject: String,
    /// Short preview of the body.
    pub snippet: String,
    /// Full plain text body.
    pub body: String,
    /// When the message was received.
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    /// Whether the message is still unread.
    pub unread: bool,
    /// Classifier output, once the message has been analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

impl EmailRecord {
    /// Whether the classifier has looked at this message.
    #[must_use]
    pub const fn is_analyzed(&self) -> bool {
        self.analysis.is_some()
    }

    /// Category assigned by the classifier, if analyzed.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.analysis.as_ref().map(|a| a.category)
    }

    /// Copy of this record carrying `analysis` in place of any previous one.
    #[must_use]
    pub fn with_analysis(&self, analysis: AnalysisResult) -> Self {
        Self {
            analysis: Some(analysis),
            ..self.clone()
        }
    }

    /// Received date formatted for the message list, e.g. `May 3, 09:30`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d, %H:%M").to_string()
    }
}

/// Serde helpers for message dates.
///
/// Dates are written as RFC 3339. When reading, offset-less timestamps
/// (`2023-05-03T09:30:00`) are accepted and taken as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}")))
    }

    pub(super) fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
