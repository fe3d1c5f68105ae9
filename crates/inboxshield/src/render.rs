//! Plain-text rendering of the inbox screen.

use std::fmt::Write as _;

use inboxshield_core::{Category, CategoryFilter, EmailRecord, Snapshot, filter};

/// Category filter bar with per-category counts, e.g. `[All 5] Job Offer 1 ...`.
#[must_use]
pub fn filter_bar(snapshot: &Snapshot, selected: &str) -> String {
    let selected = CategoryFilter::parse(selected);
    let mut bar = if selected == CategoryFilter::All {
        format!("[All {}]", snapshot.len())
    } else {
        format!("All {}", snapshot.len())
    };

    for category in Category::FILTERABLE {
        let count = snapshot
            .iter()
            .filter(|email| email.category() == Some(category))
            .count();
        if selected == CategoryFilter::Only(category) {
            let _ = write!(bar, "  [{} {count}]", category.display_name());
        } else {
            let _ = write!(bar, "  {} {count}", category.display_name());
        }
    }
    bar
}

/// One email: header line, subject and, once analyzed, summary and reply.
#[must_use]
pub fn email(email: &EmailRecord) -> String {
    let mut out = String::new();
    let marker = if email.unread { '*' } else { ' ' };
    let badge = email
        .category()
        .map(|c| format!(" [{}]", c.display_name()))
        .unwrap_or_default();

    let _ = writeln!(
        out,
        "{marker} {} <{}>  {}{badge}",
        email.from.name,
        email.from.email,
        email.display_date()
    );
    let _ = writeln!(out, "  {}", email.subject);

    match &email.analysis {
        None => {
            let _ = writeln!(out, "  {}", email.snippet);
        }
        Some(analysis) => {
            for point in &analysis.summary {
                let _ = writeln!(out, "    - {point}");
            }
            if analysis.has_reply() {
                let _ = writeln!(out, "  Suggested reply:");
                for line in analysis.suggested_reply.lines() {
                    let _ = writeln!(out, "    | {line}");
                }
            }
        }
    }
    out
}

/// Whole inbox screen for the given search and category selection.
#[must_use]
pub fn inbox(header: &str, snapshot: &Snapshot, search_term: &str, category: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{header}");
    let _ = writeln!(
        out,
        "{} messages, {} unread, {} analyzed",
        snapshot.len(),
        snapshot.unread_count(),
        snapshot.analyzed_count()
    );
    let _ = writeln!(out, "{}", filter_bar(snapshot, category));
    let _ = writeln!(out);

    let visible = filter(snapshot, search_term, category);
    if visible.is_empty() {
        let _ = writeln!(out, "No emails found");
        return out;
    }
    for record in visible {
        out.push_str(&email(record));
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use inboxshield_core::{AnalysisResult, FixtureSource, MailSource};

    use super::*;

    async fn demo() -> Snapshot {
        Snapshot::new(FixtureSource::demo().fetch_all().await.unwrap())
    }

    #[tokio::test]
    async fn test_filter_bar_marks_selection() {
        let snapshot = demo().await;
        let bar = filter_bar(&snapshot, "all");
        assert!(bar.starts_with("[All 5]"));
        assert!(bar.contains("Job Offer 0"));

        let bar = filter_bar(&snapshot, "job-offer");
        assert!(bar.starts_with("All 5"));
        assert!(bar.contains("[Job Offer 0]"));
    }

    #[tokio::test]
    async fn test_unanalyzed_email_shows_snippet() {
        let snapshot = demo().await;
        let record = snapshot.get(&"1".into()).unwrap();

        let text = email(record);

        assert!(text.contains(&record.snippet));
        assert!(!text.contains("Suggested reply"));
    }

    #[tokio::test]
    async fn test_analyzed_email_shows_summary_and_reply() {
        let snapshot = demo().await;
        let record = snapshot.get(&"1".into()).unwrap().with_analysis(AnalysisResult::new(
            Category::JobOffer,
            vec!["Role: Engineer".into()],
            "Thanks!\n[Your Name]".into(),
        ));

        let text = email(&record);

        assert!(text.contains("[Job Offer]"));
        assert!(text.contains("    - Role: Engineer"));
        assert!(text.contains("    | [Your Name]"));
    }

    #[tokio::test]
    async fn test_empty_result() {
        let snapshot = demo().await;
        let text = inbox("Not signed in", &snapshot, "no such thing", "all");
        assert!(text.contains("No emails found"));
        assert!(text.starts_with("Not signed in\n5 messages"));
    }
}
