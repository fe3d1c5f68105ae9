//! Search and category filtering for the message list.

use crate::model::{Category, EmailRecord, Snapshot};

/// Category selection from the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show everything, analyzed or not.
    #[default]
    All,
    /// Only analyzed messages in this category.
    Only(Category),
    /// A selection that names no known category; matches nothing.
    Unknown,
}

impl CategoryFilter {
    /// Parse a filter bar selection. `"all"` (any case) selects everything.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            return Self::All;
        }
        Category::parse(s).map_or(Self::Unknown, Self::Only)
    }

    /// Whether a record passes this filter.
    #[must_use]
    pub fn matches(&self, email: &EmailRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => email.category() == Some(*category),
            Self::Unknown => false,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

/// Whether `email` matches a search term (already lowercased).
fn matches_search(email: &EmailRecord, term: &str) -> bool {
    term.is_empty()
        || email.subject.to_lowercase().contains(term)
        || email.from.name.to_lowercase().contains(term)
        || email.from.email.to_lowercase().contains(term)
}

/// Messages to display for a search term and category selection.
///
/// A message is shown when the search term is empty or appears
/// (case-insensitively) in its subject, sender name or sender address, and
/// the category selection is `"all"` or equals its analyzed category.
/// Unanalyzed messages only show under `"all"`. Snapshot order is kept.
///
/// The selection is compared case-insensitively after trimming. The older
/// `snake_case` and spaced tags (`job_offer`, `cold email`) select the same
/// category as their kebab-case form.
#[must_use]
pub fn filter<'a>(
    snapshot: &'a Snapshot,
    search_term: &str,
    selected_category: &str,
) -> Vec<&'a EmailRecord> {
    let term = search_term.to_lowercase();
    let category = CategoryFilter::parse(selected_category);

    snapshot
        .iter()
        .filter(|email| matches_search(email, &term) && category.matches(email))
        .collect()
}
