//! Integration tests for the citydb-sqlite crate.

use std::fs;
use std::path::Path;

use citydb_core::{ColumnDefinition, TableDefinition, countries_table};
use citydb_sqlite::{DatabaseHandle, SqliteError, create_database, create_database_with};
use rusqlite::{Connection, params};

fn index_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'index' AND tbl_name = ?1 AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )
        .unwrap();
    stmt.query_map([table], |row| row.get(0))
        .unwrap()
        .collect::<rusqlite::Result<Vec<String>>>()
        .unwrap()
}

fn primary_key_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .unwrap();
    let mut columns: Vec<(i64, String)> = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(5)?, row.get::<_, String>(1)?)))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap()
        .into_iter()
        .filter(|(pk, _)| *pk > 0)
        .collect();
    columns.sort();
    columns.into_iter().map(|(_, name)| name).collect()
}

fn table_count(path: &Path) -> i64 {
    let conn = Connection::open(path).unwrap();
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn test_existing_file_is_rejected_and_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("existing.db");
    fs::write(&path, b"not a database").unwrap();

    let err = create_database(&path).unwrap_err();
    assert!(matches!(err, SqliteError::AlreadyExists(ref p) if p == &path));
    assert_eq!(fs::read(&path).unwrap(), b"not a database");
}

#[test]
fn test_existing_empty_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    fs::write(&path, b"").unwrap();

    assert!(matches!(
        create_database(&path),
        Err(SqliteError::AlreadyExists(_))
    ));
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_creates_exactly_three_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.db");

    let handle = create_database(&path).unwrap();
    assert!(path.exists());
    assert_eq!(handle.path(), path.as_path());
    assert_eq!(
        handle.table_names().unwrap(),
        vec!["cities", "cities_labels", "countries"]
    );
    handle.close().unwrap();

    assert_eq!(table_count(&path), 3);
}

#[test]
fn test_keys_and_indexes() {
    let dir = tempfile::tempdir().unwrap();
    let handle = create_database(dir.path().join("new.db")).unwrap();
    let conn = handle.connection();

    assert_eq!(primary_key_columns(conn, "countries"), vec!["id"]);
    assert_eq!(primary_key_columns(conn, "cities"), vec!["id"]);
    assert_eq!(primary_key_columns(conn, "cities_labels"), vec!["city", "lang"]);

    assert_eq!(index_names(conn, "countries"), vec!["idx_countries_iso"]);
    assert_eq!(
        index_names(conn, "cities"),
        vec!["idx_cities_country", "idx_cities_population"]
    );
    assert_eq!(index_names(conn, "cities_labels"), vec!["idx_cities_labels_label"]);
}

#[test]
fn test_tables_start_empty() {
    let dir = tempfile::tempdir().unwrap();
    let handle = create_database(dir.path().join("new.db")).unwrap();
    let status = handle.status().unwrap();
    assert!(status.tables_exist);
    assert_eq!(status.country_count, 0);
    assert_eq!(status.city_count, 0);
    assert_eq!(status.label_count, 0);
}

#[test]
fn test_duplicate_country_id_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let handle = create_database(dir.path().join("new.db")).unwrap();
    let conn = handle.connection();

    conn.execute(
        "INSERT INTO countries (id, iso) VALUES (?1, ?2)",
        params!["Q142", "fr"],
    )
    .unwrap();
    assert!(
        conn.execute(
            "INSERT INTO countries (id, iso) VALUES (?1, ?2)",
            params!["Q142", "be"],
        )
        .is_err()
    );
}

#[test]
fn test_iso_is_not_unique() {
    let dir = tempfile::tempdir().unwrap();
    let handle = create_database(dir.path().join("new.db")).unwrap();
    let conn = handle.connection();

    conn.execute("INSERT INTO countries (id, iso) VALUES ('Q1', 'xx')", [])
        .unwrap();
    conn.execute("INSERT INTO countries (id, iso) VALUES ('Q2', 'xx')", [])
        .unwrap();
    assert_eq!(handle.status().unwrap().country_count, 2);
}

#[test]
fn test_labels_composite_primary_key() {
    let dir = tempfile::tempdir().unwrap();
    let handle = create_database(dir.path().join("new.db")).unwrap();
    let conn = handle.connection();
    let insert = "INSERT INTO cities_labels (city, lang, label) VALUES (?1, ?2, ?3)";

    conn.execute(insert, params!["C1", "en", "Paris"]).unwrap();
    conn.execute(insert, params!["C1", "fr", "Paris-fr"]).unwrap();
    assert!(
        conn.execute(insert, params!["C1", "en", "anything-else"])
            .is_err()
    );

    let label: String = conn
        .query_row(
            "SELECT label FROM cities_labels WHERE city = 'C1' AND lang = 'en'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(label, "Paris");
}

#[test]
fn test_no_foreign_key_enforcement() {
    let dir = tempfile::tempdir().unwrap();
    let handle = create_database(dir.path().join("new.db")).unwrap();
    let conn = handle.connection();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();

    conn.execute(
        "INSERT INTO cities (id, country, population) VALUES ('Q90', 'Q-missing', 2100000)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO cities_labels (city, lang, label) VALUES ('Q-missing', 'en', 'Nowhere')",
        [],
    )
    .unwrap();
}

#[test]
fn test_handle_round_trips_a_row_per_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut handle = create_database(dir.path().join("new.db")).unwrap();

    let tx = handle.connection_mut().transaction().unwrap();
    tx.execute("INSERT INTO countries (id, iso) VALUES ('Q142', 'fr')", [])
        .unwrap();
    tx.execute(
        "INSERT INTO cities (id, country, population) VALUES ('Q90', 'Q142', 2145906)",
        [],
    )
    .unwrap();
    tx.execute(
        "INSERT INTO cities_labels (city, lang, label) VALUES ('Q90', 'de', 'Paris')",
        [],
    )
    .unwrap();
    tx.commit().unwrap();

    let conn = handle.connection();
    let iso: String = conn
        .query_row("SELECT iso FROM countries WHERE id = 'Q142'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(iso, "fr");

    let (country, population): (String, i64) = conn
        .query_row(
            "SELECT country, population FROM cities WHERE id = 'Q90'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(country, "Q142");
    assert_eq!(population, 2_145_906);

    let label: String = conn
        .query_row(
            "SELECT label FROM cities_labels WHERE city = 'Q90' AND lang = 'de'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(label, "Paris");

    let status = handle.status().unwrap();
    assert_eq!(
        (status.country_count, status.city_count, status.label_count),
        (1, 1, 1)
    );
}

#[test]
fn test_second_create_fails_and_keeps_first_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.db");

    let handle = create_database(&path).unwrap();
    handle
        .connection()
        .execute("INSERT INTO countries (id, iso) VALUES ('Q142', 'fr')", [])
        .unwrap();

    assert!(matches!(
        create_database(&path),
        Err(SqliteError::AlreadyExists(_))
    ));

    // The first handle is still usable and its data is intact.
    assert_eq!(handle.status().unwrap().country_count, 1);
    drop(handle);

    let reopened = DatabaseHandle::open(&path).unwrap();
    let status = reopened.status().unwrap();
    assert!(status.tables_exist);
    assert_eq!(status.country_count, 1);
    assert_eq!(reopened.table_names().unwrap().len(), 3);
}

#[test]
fn test_failed_schema_creation_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.db");

    // Names starting with `sqlite_` are reserved, so the second table fails
    // after the first one has been created inside the transaction.
    let reserved = TableDefinition::new("sqlite_reserved")
        .with_column(ColumnDefinition::text("id"))
        .with_primary_key(&["id"]);
    let err = create_database_with(&path, &[countries_table(), reserved]).unwrap_err();

    assert!(matches!(err, SqliteError::DatabaseError(_)));
    assert!(!path.exists());

    // The path is free again.
    create_database(&path).unwrap();
}

#[test]
fn test_invalid_layout_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.db");

    let err = create_database_with(&path, &[]).unwrap_err();
    assert!(matches!(err, SqliteError::InvalidLayout(_)));
    assert!(!path.exists());
}

#[test]
fn test_custom_layout() {
    let dir = tempfile::tempdir().unwrap();
    let layout = vec![
        TableDefinition::new("regions")
            .with_column(ColumnDefinition::text("id"))
            .with_column(ColumnDefinition::text("name").not_null())
            .with_primary_key(&["id"])
            .with_index(&["name"]),
    ];

    let handle = create_database_with(dir.path().join("custom.db"), &layout).unwrap();
    assert_eq!(handle.table_names().unwrap(), vec!["regions"]);
    assert!(!handle.status().unwrap().tables_exist);
    assert!(
        handle
            .connection()
            .execute("INSERT INTO regions (id, name) VALUES ('R1', NULL)", [])
            .is_err()
    );
}

#[test]
fn test_missing_parent_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.db");

    assert!(matches!(create_database(&path), Err(SqliteError::Io(_))));
    assert!(!path.exists());
}

#[test]
fn test_concurrent_creates_have_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");

    let results: Vec<bool> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| create_database(&path).is_ok()))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|ok| **ok).count(), 1);
    assert_eq!(table_count(&path), 3);
}

#[test]
fn test_open_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.db");
    create_database(&path).unwrap().close().unwrap();

    let handle = DatabaseHandle::open(&path).unwrap();
    assert!(handle.status().unwrap().tables_exist);
    let conn = handle.into_connection();
    conn.execute("INSERT INTO cities (id) VALUES ('Q64')", [])
        .unwrap();
}
