//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and the fixed category set.
//! - Provide pure transformation helpers returning new values.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `title` and `content` are non-empty after trimming in every value
//!   produced by this module.
//! - `created_at <= updated_at` for every value produced by this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Generated as UUIDv7 so identifiers stay time-ordered at creation.
pub type NoteId = Uuid;

/// Closed category set partitioning notes for filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Work-related notes.
    Work,
    /// Everything personal. Default for new notes.
    #[default]
    Personal,
    /// Loose ideas and sketches.
    Ideas,
    /// Actionable to-do style notes.
    Tasks,
}

impl Category {
    /// All categories in their canonical filter-bar order.
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Ideas,
        Category::Tasks,
    ];

    /// Stable uppercase key used on the wire and for category ordering.
    pub fn key(self) -> &'static str {
        match self {
            Category::Work => "WORK",
            Category::Personal => "PERSONAL",
            Category::Ideas => "IDEAS",
            Category::Tasks => "TASKS",
        }
    }

    /// Human-facing label for pickers and filter chips.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Ideas => "Ideas",
            Category::Tasks => "Tasks",
        }
    }

    /// Parses a stable key, case-insensitively.
    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_ascii_uppercase().as_str() {
            "WORK" => Some(Category::Work),
            "PERSONAL" => Some(Category::Personal),
            "IDEAS" => Some(Category::Ideas),
            "TASKS" => Some(Category::Tasks),
            _ => None,
        }
    }
}

/// Validation error for note text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Content is empty after trimming.
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::EmptyContent => write!(f, "note content cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Persisted user note record.
///
/// Field names serialize in camelCase to keep the stored JSON payload
/// compatible with the mobile app's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable ID assigned once at creation.
    pub id: NoteId,
    /// Short headline, non-empty after trim.
    pub title: String,
    /// Body text, non-empty after trim.
    pub content: String,
    /// Filter category; absent in early payloads, hence defaulted.
    #[serde(default)]
    pub category: Category,
    /// Free-form labels; unique members, order not meaningful.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Pinned notes sort before everything else.
    #[serde(default)]
    pub is_pinned: bool,
    /// Reversible hidden state, distinct from deletion.
    #[serde(default)]
    pub is_archived: bool,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
    /// Refreshed by every mutating transformation.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with a generated time-ordered ID.
    ///
    /// # Errors
    /// - [`NoteValidationError::EmptyTitle`] when the trimmed title is empty.
    /// - [`NoteValidationError::EmptyContent`] when the trimmed content is
    ///   empty.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
    ) -> Result<Self, NoteValidationError> {
        Self::with_id(Uuid::now_v7(), title, content, category)
    }

    /// Creates a new note with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
    ) -> Result<Self, NoteValidationError> {
        let title = require_trimmed(title.into(), NoteValidationError::EmptyTitle)?;
        let content = require_trimmed(content.into(), NoteValidationError::EmptyContent)?;
        let now = Utc::now();
        Ok(Self {
            id,
            title,
            content,
            category,
            tags: Vec::new(),
            is_pinned: false,
            is_archived: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns a copy with the pin flag flipped and `updated_at` refreshed.
    pub fn with_pin_toggled(&self) -> Note {
        let mut next = self.clone();
        next.is_pinned = !next.is_pinned;
        next.updated_at = Utc::now();
        next
    }

    /// Returns a copy with the archive flag flipped and `updated_at`
    /// refreshed.
    pub fn with_archive_toggled(&self) -> Note {
        let mut next = self.clone();
        next.is_archived = !next.is_archived;
        next.updated_at = Utc::now();
        next
    }

    /// Returns a copy assigned to `category` with `updated_at` refreshed.
    pub fn with_category(&self, category: Category) -> Note {
        let mut next = self.clone();
        next.category = category;
        next.updated_at = Utc::now();
        next
    }

    /// Returns a copy carrying replacement title/content.
    ///
    /// # Errors
    /// Same validation rules as [`Note::new`].
    pub fn with_edits(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, NoteValidationError> {
        let title = require_trimmed(title.into(), NoteValidationError::EmptyTitle)?;
        let content = require_trimmed(content.into(), NoteValidationError::EmptyContent)?;
        let mut next = self.clone();
        next.title = title;
        next.content = content;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Returns a copy with `tag` appended.
    ///
    /// Blank tags and tags already present leave the note unchanged and do
    /// not touch `updated_at`.
    pub fn with_tag_added(&self, tag: &str) -> Note {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|existing| existing == trimmed) {
            return self.clone();
        }
        let mut next = self.clone();
        next.tags.push(trimmed.to_string());
        next.updated_at = Utc::now();
        next
    }

    /// Returns a copy with `tag` removed.
    ///
    /// An absent tag leaves the note unchanged and does not touch
    /// `updated_at`.
    pub fn with_tag_removed(&self, tag: &str) -> Note {
        if !self.tags.iter().any(|existing| existing == tag) {
            return self.clone();
        }
        let mut next = self.clone();
        next.tags.retain(|existing| existing != tag);
        next.updated_at = Utc::now();
        next
    }
}

fn require_trimmed(
    value: String,
    on_empty: NoteValidationError,
) -> Result<String, NoteValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(on_empty);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Category, Note, NoteValidationError};

    #[test]
    fn category_keys_and_names_are_stable() {
        assert_eq!(Category::Work.key(), "WORK");
        assert_eq!(Category::Ideas.display_name(), "Ideas");
        assert_eq!(Category::parse(" tasks "), Some(Category::Tasks));
        assert_eq!(Category::parse("archive"), None);
    }

    #[test]
    fn default_category_is_personal() {
        assert_eq!(Category::default(), Category::Personal);
    }

    #[test]
    fn new_trims_title_and_content() {
        let note = Note::new("  Groceries  ", " milk, eggs ", Category::Personal).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
    }

    #[test]
    fn new_rejects_blank_fields() {
        assert_eq!(
            Note::new("   ", "body", Category::Work),
            Err(NoteValidationError::EmptyTitle)
        );
        assert_eq!(
            Note::new("title", "\n\t", Category::Work),
            Err(NoteValidationError::EmptyContent)
        );
    }

    #[test]
    fn tag_helpers_deduplicate_and_ignore_blank() {
        let note = Note::new("t", "c", Category::Ideas).unwrap();
        let tagged = note.with_tag_added("errand").with_tag_added("errand");
        assert_eq!(tagged.tags, vec!["errand".to_string()]);

        let unchanged = tagged.with_tag_added("  ");
        assert_eq!(unchanged.tags, tagged.tags);
        assert_eq!(unchanged.updated_at, tagged.updated_at);

        let removed = tagged.with_tag_removed("errand");
        assert!(removed.tags.is_empty());
    }
}
