//! Persistence layer for the note collection.
//!
//! # Responsibility
//! - Define the full-snapshot store contract used by the service layer.
//! - Isolate SQLite slot access details from business orchestration.
//!
//! # Invariants
//! - The persisted collection is replaced wholesale on every write.
//! - Read paths surface corrupt persisted state instead of masking it.

pub mod note_store;
