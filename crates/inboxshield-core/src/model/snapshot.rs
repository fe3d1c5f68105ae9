//! Immutable inbox snapshots.

use std::sync::Arc;

use super::analysis::AnalysisResult;
use super::email::{EmailId, EmailRecord};
use crate::{Error, Result};

/// An ordered, immutable view of the inbox.
///
/// Records keep fetch order. Cloning is cheap (the records are shared), and
/// every update builds a new snapshot, so a reader holding an older one never
/// sees a partially applied change.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Arc<[EmailRecord]>,
}

impl Snapshot {
    /// Create a snapshot from records in fetch order.
    #[must_use]
    pub fn new(records: Vec<EmailRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// All records, in fetch order.
    #[must_use]
    pub fn records(&self) -> &[EmailRecord] {
        &self.records
    }

    /// Iterate over records in fetch order.
    pub fn iter(&self) -> std::slice::Iter<'_, EmailRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the inbox is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by identifier.
    #[must_use]
    pub fn get(&self, id: &EmailId) -> Option<&EmailRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Number of unread messages.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|r| r.unread).count()
    }

    /// Number of messages that have been analyzed.
    #[must_use]
    pub fn analyzed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_analyzed()).count()
    }

    /// Whether `other` is the very same snapshot (not merely equal contents).
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// New snapshot where the record `id` carries `analysis`.
    ///
    /// Order and every other record are unchanged; `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this identifier.
    pub fn with_analysis(&self, id: &EmailId, analysis: AnalysisResult) -> Result<Self> {
        let index = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        let mut records = self.records.to_vec();
        records[index] = records[index].with_analysis(analysis);
        Ok(Self::new(records))
    }
}

impl From<Vec<EmailRecord>> for Snapshot {
    fn from(records: Vec<EmailRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a EmailRecord;
    type IntoIter = std::slice::Iter<'a, EmailRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Category, Sender};
    use chrono::{TimeZone, Utc};

    fn record(id: &str, unread: bool) -> EmailRecord {
        EmailRecord {
            id: EmailId::from(id),
            from: Sender::new("Test", "test@example.com"),
            subject: format!("Subject {id}"),
            snippet: String::new(),
            body: String::new(),
            date: Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
            unread,
            analysis: None,
        }
    }

    fn ids(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_with_analysis_keeps_order_and_original() {
        let snapshot = Snapshot::new(vec![record("a", true), record("b", false), record("c", true)]);
        let analysis = AnalysisResult::new(Category::Spam, Vec::new(), String::new());

        let updated = snapshot.with_analysis(&"b".into(), analysis.clone()).unwrap();

        assert_eq!(ids(&updated), vec!["a", "b", "c"]);
        assert_eq!(updated.get(&"b".into()).unwrap().analysis, Some(analysis));
        assert_eq!(updated.analyzed_count(), 1);
        assert_eq!(snapshot.analyzed_count(), 0);
        assert!(!updated.is_same(&snapshot));
    }

    #[test]
    fn test_with_analysis_unknown_id() {
        let snapshot = Snapshot::new(vec![record("a", true)]);
        let err = snapshot
            .with_analysis(&"zzz".into(), AnalysisResult::unmatched())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id.as_str() == "zzz"));
    }

    #[test]
    fn test_counts() {
        let snapshot = Snapshot::new(vec![record("a", true), record("b", false)]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.unread_count(), 1);
        assert!(snapshot.is_same(&snapshot.clone()));
        assert!(Snapshot::default().is_empty());
    }
}
