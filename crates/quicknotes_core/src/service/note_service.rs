//! Note use-case service.
//!
//! # Responsibility
//! - Provide the full mutation set over the persisted note collection.
//! - Run every mutation as load, pure transform, full-snapshot save.
//!
//! # Invariants
//! - Mutating APIs take `&mut self`: exclusive access through the borrow
//!   checker is the single-writer strategy for the load-modify-save
//!   protocol, so overlapping mutations cannot race on the slot.
//! - Callers replace their in-memory copy with the returned collection;
//!   the persisted collection stays the single source of truth.
//! - Validation failures abort before any write reaches the store.

use crate::model::note::{Category, Note, NoteId, NoteValidationError};
use crate::store::note_store::{NoteStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Title/content rejected before any write was attempted.
    Validation(NoteValidationError),
    /// Targeted note does not exist in the stored collection.
    NotFound(NoteId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result envelope for bulk operations.
///
/// `affected == 0` means there was nothing to do; the store was not
/// written and `notes` is the unchanged collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Full collection after the operation.
    pub notes: Vec<Note>,
    /// Number of notes the operation touched.
    pub affected: usize,
}

/// Note service facade over store implementations.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the full stored collection.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.store.load()?)
    }

    /// Creates one note and prepends it to the collection.
    ///
    /// The collection keeps newest-first insertion order; display order is
    /// derived separately by [`crate::query::view::derive_view`].
    pub fn add_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
    ) -> Result<Vec<Note>, NoteServiceError> {
        let note = Note::new(title, content, category)?;

        let mut notes = self.store.load()?;
        notes.insert(0, note);
        self.store.save_all(&notes)?;

        info!(
            "event=note_add module=service status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    /// Replaces title, content and category of one note.
    pub fn update_note(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
    ) -> Result<Vec<Note>, NoteServiceError> {
        let title = title.into();
        let content = content.into();
        self.mutate_note(id, "note_update", move |note| {
            let edited = note.with_edits(title, content)?;
            Ok(edited.with_category(category))
        })
    }

    /// Removes one note permanently.
    pub fn delete_note(&mut self, id: NoteId) -> Result<Vec<Note>, NoteServiceError> {
        let mut notes = self.store.load()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Err(NoteServiceError::NotFound(id));
        }

        self.store.save_all(&notes)?;
        info!("event=note_delete module=service status=ok id={id}");
        Ok(notes)
    }

    /// Flips the pin flag of one note.
    pub fn toggle_pin(&mut self, id: NoteId) -> Result<Vec<Note>, NoteServiceError> {
        self.mutate_note(id, "note_pin_toggle", |note| Ok(note.with_pin_toggled()))
    }

    /// Flips the archive flag of one note.
    pub fn toggle_archive(&mut self, id: NoteId) -> Result<Vec<Note>, NoteServiceError> {
        self.mutate_note(id, "note_archive_toggle", |note| {
            Ok(note.with_archive_toggled())
        })
    }

    /// Assigns one note to `category`.
    pub fn set_category(
        &mut self,
        id: NoteId,
        category: Category,
    ) -> Result<Vec<Note>, NoteServiceError> {
        self.mutate_note(id, "note_set_category", move |note| {
            Ok(note.with_category(category))
        })
    }

    /// Clears the archive flag on every archived note.
    pub fn restore_all_archived(&mut self) -> Result<BulkOutcome, NoteServiceError> {
        let notes = self.store.load()?;
        let affected = notes.iter().filter(|note| note.is_archived).count();
        if affected == 0 {
            info!("event=notes_restore_archived module=service status=noop");
            return Ok(BulkOutcome { notes, affected });
        }

        let restored: Vec<Note> = notes
            .iter()
            .map(|note| {
                if note.is_archived {
                    note.with_archive_toggled()
                } else {
                    note.clone()
                }
            })
            .collect();
        self.store.save_all(&restored)?;

        info!("event=notes_restore_archived module=service status=ok affected={affected}");
        Ok(BulkOutcome {
            notes: restored,
            affected,
        })
    }

    /// Removes every archived note permanently.
    pub fn delete_all_archived(&mut self) -> Result<BulkOutcome, NoteServiceError> {
        let mut notes = self.store.load()?;
        let before = notes.len();
        notes.retain(|note| !note.is_archived);
        let affected = before - notes.len();
        if affected == 0 {
            info!("event=notes_delete_archived module=service status=noop");
            return Ok(BulkOutcome { notes, affected });
        }

        self.store.save_all(&notes)?;
        info!("event=notes_delete_archived module=service status=ok affected={affected}");
        Ok(BulkOutcome { notes, affected })
    }

    /// Removes every note permanently.
    pub fn delete_all(&mut self) -> Result<BulkOutcome, NoteServiceError> {
        let notes = self.store.load()?;
        let affected = notes.len();
        if affected == 0 {
            info!("event=notes_delete_all module=service status=noop");
            return Ok(BulkOutcome { notes, affected });
        }

        self.store.save_all(&[])?;
        info!("event=notes_delete_all module=service status=ok affected={affected}");
        Ok(BulkOutcome {
            notes: Vec::new(),
            affected,
        })
    }

    fn mutate_note<F>(
        &mut self,
        id: NoteId,
        event: &str,
        transform: F,
    ) -> Result<Vec<Note>, NoteServiceError>
    where
        F: FnOnce(&Note) -> Result<Note, NoteServiceError>,
    {
        let mut notes = self.store.load()?;
        let Some(slot) = notes.iter_mut().find(|note| note.id == id) else {
            return Err(NoteServiceError::NotFound(id));
        };

        let updated = transform(slot)?;
        *slot = updated;
        self.store.save_all(&notes)?;

        info!("event={event} module=service status=ok id={id}");
        Ok(notes)
    }
}
