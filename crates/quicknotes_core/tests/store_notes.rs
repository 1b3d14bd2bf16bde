use quicknotes_core::db::{open_db, open_db_in_memory};
use quicknotes_core::{Category, Note, NoteStore, SqliteNoteStore, StoreError, NOTES_SLOT_KEY};

fn sample_notes() -> Vec<Note> {
    let first = Note::new("Pinned", "stays on top", Category::Work)
        .unwrap()
        .with_pin_toggled()
        .with_tag_added("priority");
    let second = Note::new("Archived", "hidden away", Category::Ideas)
        .unwrap()
        .with_archive_toggled();
    vec![first, second]
}

#[test]
fn load_returns_empty_without_payload() {
    let store = SqliteNoteStore::new(open_db_in_memory().unwrap());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrips_the_collection() {
    let mut store = SqliteNoteStore::new(open_db_in_memory().unwrap());
    let notes = sample_notes();

    store.save_all(&notes).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded, notes);

    // Persisting an unmodified loaded collection must be a no-op on content.
    store.save_all(&loaded).unwrap();
    assert_eq!(store.load().unwrap(), notes);
}

#[test]
fn save_replaces_prior_payload() {
    let mut store = SqliteNoteStore::new(open_db_in_memory().unwrap());
    let notes = sample_notes();

    store.save_all(&notes).unwrap();
    store.save_all(&notes[..1]).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, notes[0].id);
}

#[test]
fn corrupt_payload_surfaces_read_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_slots (key, value) VALUES (?1, 'not json at all');",
        [NOTES_SLOT_KEY],
    )
    .unwrap();

    let store = SqliteNoteStore::new(conn);
    let error = store.load().expect_err("corrupt slot must not load");
    assert!(matches!(
        error,
        StoreError::CorruptPayload {
            key: NOTES_SLOT_KEY,
            ..
        }
    ));
}

#[test]
fn file_backed_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");
    let notes = sample_notes();

    {
        let mut store = SqliteNoteStore::new(open_db(&path).unwrap());
        store.save_all(&notes).unwrap();
    }

    let store = SqliteNoteStore::new(open_db(&path).unwrap());
    assert_eq!(store.load().unwrap(), notes);
}
