//! Note collection store over single-slot key/value persistence.
//!
//! # Responsibility
//! - Load/save the full note collection as one JSON payload under a fixed
//!   storage key.
//! - Surface read and write failures as distinct typed errors.
//!
//! # Invariants
//! - `save_all` replaces the whole slot; there is no partial write path.
//! - `load` never fabricates data: a missing slot is an empty collection,
//!   a corrupt slot is an error the caller decides about.

use crate::db::DbError;
use crate::model::note::Note;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized note collection.
pub const NOTES_SLOT_KEY: &str = "@notes_app_notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for the note collection slot.
#[derive(Debug)]
pub enum StoreError {
    /// Slot payload exists but is not a decodable note collection.
    CorruptPayload { key: &'static str, message: String },
    /// Collection could not be encoded for writing.
    Encode(String),
    /// Underlying storage read failed.
    Read(DbError),
    /// Underlying storage write failed.
    Write(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptPayload { key, message } => {
                write!(f, "corrupt payload in slot `{key}`: {message}")
            }
            Self::Encode(message) => write!(f, "failed to encode note collection: {message}"),
            Self::Read(err) => write!(f, "storage read failed: {err}"),
            Self::Write(err) => write!(f, "storage write failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::CorruptPayload { .. } | Self::Encode(_) => None,
        }
    }
}

/// Store contract for the full note collection.
///
/// Implementations persist the collection as one atomic unit per call;
/// there is no diff-based path. Mutating callers must hold exclusive
/// access, which [`crate::service::note_service::NoteService`] enforces
/// through `&mut self` receivers.
pub trait NoteStore {
    /// Loads the full collection; empty when nothing was persisted yet.
    fn load(&self) -> StoreResult<Vec<Note>>;

    /// Replaces the persisted collection with `notes`.
    fn save_all(&mut self, notes: &[Note]) -> StoreResult<()>;
}

/// SQLite-backed single-slot store.
pub struct SqliteNoteStore {
    conn: Connection,
}

impl SqliteNoteStore {
    /// Wraps a migrated connection from [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl NoteStore for SqliteNoteStore {
    fn load(&self) -> StoreResult<Vec<Note>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [NOTES_SLOT_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Read(DbError::Sqlite(err)))?;

        let Some(payload) = payload else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&payload).map_err(|err| {
            warn!(
                "event=notes_load module=store status=error error_code=corrupt_payload error={err}"
            );
            StoreError::CorruptPayload {
                key: NOTES_SLOT_KEY,
                message: err.to_string(),
            }
        })
    }

    fn save_all(&mut self, notes: &[Note]) -> StoreResult<()> {
        let payload =
            serde_json::to_string(notes).map_err(|err| StoreError::Encode(err.to_string()))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv_slots (key, value) VALUES (?1, ?2);",
                params![NOTES_SLOT_KEY, payload],
            )
            .map_err(|err| StoreError::Write(DbError::Sqlite(err)))?;

        info!(
            "event=notes_save module=store status=ok count={}",
            notes.len()
        );
        Ok(())
    }
}
