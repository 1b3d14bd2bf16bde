//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quicknotes_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use quicknotes_core::db::open_db_in_memory;
use quicknotes_core::{Category, NoteService, SqliteNoteStore};

fn main() {
    println!("quicknotes_core version={}", quicknotes_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory store: {err}");
            std::process::exit(1);
        }
    };

    let mut service = NoteService::new(SqliteNoteStore::new(conn));
    match service.add_note("Smoke note", "created by the CLI probe", Category::Personal) {
        Ok(notes) => println!("smoke add/list note_count={}", notes.len()),
        Err(err) => {
            eprintln!("smoke mutation failed: {err}");
            std::process::exit(1);
        }
    }
}
