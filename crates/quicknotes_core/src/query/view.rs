//! Pure view derivation for the note list.
//!
//! # Responsibility
//! - Filter the collection by archive state, category and search term.
//! - Order the result with pinned notes first, then by the chosen key.
//!
//! # Invariants
//! - The input slice is never reordered or mutated.
//! - Identical inputs produce identical output order and membership; ties
//!   within a sort key keep their relative input order (stable sort).

use crate::model::note::{Category, Note};

/// Sort key for the unpinned/pinned subsequences of the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first by `created_at`.
    #[default]
    Date,
    /// Case-insensitive ascending by title.
    Title,
    /// Ascending by category key.
    Category,
}

impl SortKey {
    /// Parses a sort key name, falling back to [`SortKey::Date`] for
    /// anything unrecognized.
    pub fn parse(value: &str) -> SortKey {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => SortKey::Title,
            "category" => SortKey::Category,
            _ => SortKey::Date,
        }
    }
}

/// Category narrowing for the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep every category.
    #[default]
    All,
    /// Keep exactly one category.
    Only(Category),
}

impl CategoryFilter {
    fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

/// View parameters supplied by the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Case-insensitive substring matched against title and content.
    /// Empty means no text filter.
    pub search_term: String,
    /// Category narrowing; defaults to all categories.
    pub category: CategoryFilter,
    /// `false` shows active notes, `true` shows the archive.
    pub show_archived: bool,
    /// Ordering within each pin group.
    pub sort_by: SortKey,
}

/// Derives the displayed note sequence from the full collection.
///
/// Pinned notes always precede unpinned notes regardless of `sort_by`.
/// Returns a new sequence; `notes` is left untouched.
pub fn derive_view(notes: &[Note], query: &ViewQuery) -> Vec<Note> {
    let term = query.search_term.to_lowercase();

    let mut view: Vec<Note> = notes
        .iter()
        .filter(|note| {
            note.is_archived == query.show_archived
                && query.category.matches(note.category)
                && (term.is_empty() || matches_term(note, &term))
        })
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        b.is_pinned.cmp(&a.is_pinned).then_with(|| match query.sort_by {
            SortKey::Date => b.created_at.cmp(&a.created_at),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Category => a.category.key().cmp(b.category.key()),
        })
    });

    view
}

fn matches_term(note: &Note, lowered_term: &str) -> bool {
    note.title.to_lowercase().contains(lowered_term)
        || note.content.to_lowercase().contains(lowered_term)
}

#[cfg(test)]
mod tests {
    use super::SortKey;

    #[test]
    fn sort_key_parse_accepts_known_names() {
        assert_eq!(SortKey::parse("title"), SortKey::Title);
        assert_eq!(SortKey::parse(" CATEGORY "), SortKey::Category);
        assert_eq!(SortKey::parse("date"), SortKey::Date);
    }

    #[test]
    fn sort_key_parse_falls_back_to_date() {
        assert_eq!(SortKey::parse("newest"), SortKey::Date);
        assert_eq!(SortKey::parse(""), SortKey::Date);
    }
}
