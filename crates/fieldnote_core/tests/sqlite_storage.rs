use fieldnote_core::storage::schema_version;
use fieldnote_core::{
    Entry, EntryStore, KeyValueStore, SqliteStore, StorageError, Theme, ThemePreference,
};
use rusqlite::Connection;

#[test]
fn in_memory_store_has_current_schema() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(user_version(store.connection()), schema_version());
    assert_table_exists(store.connection(), "kv_records");
}

#[test]
fn opening_same_file_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fieldnote.sqlite3");

    drop(SqliteStore::open(&path).unwrap());
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(user_version(store.connection()), schema_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match SqliteStore::open(&path) {
        Err(StorageError::SchemaTooNew { found, supported }) => {
            assert_eq!(found, 999);
            assert_eq!(supported, schema_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema must be rejected"),
    }
}

#[test]
fn entries_and_theme_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fieldnote.sqlite3");

    {
        let mut notebook = EntryStore::load(SqliteStore::open(&path).unwrap());
        notebook.save(Entry::new("2024-07-04", "humid", "creek", "<i>herons</i>"));
        ThemePreference::save(notebook.storage_mut(), &Theme::from_id("dusk")).unwrap();
    }

    let notebook = EntryStore::load(SqliteStore::open(&path).unwrap());
    assert_eq!(notebook.len(), 1);
    assert_eq!(notebook.current_index(), 0);
    assert_eq!(notebook.current().unwrap().notes, "<i>herons</i>");
    assert_eq!(
        ThemePreference::load(notebook.storage()),
        Theme::Named("dusk".to_string())
    );
}

#[test]
fn missing_key_reads_as_none() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get("fieldEntries").unwrap(), None);
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0)).unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
