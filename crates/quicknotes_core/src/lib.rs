//! Core domain logic for QuickNotes.
//! This crate is the single source of truth for note business invariants.

pub mod autosave;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use autosave::{AutosaveError, AutosaveResult, Debouncer};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Category, Note, NoteId, NoteValidationError};
pub use query::view::{derive_view, CategoryFilter, SortKey, ViewQuery};
pub use service::note_service::{BulkOutcome, NoteService, NoteServiceError};
pub use store::note_store::{NoteStore, SqliteNoteStore, StoreError, StoreResult, NOTES_SLOT_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
