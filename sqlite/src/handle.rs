//! Caller-owned handle to a city database.

use std::path::{Path, PathBuf};

use citydb_core::{CITIES_LABELS_TABLE, CITIES_TABLE, COUNTRIES_TABLE};
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Result, SqliteError};

/// An open connection to a city database together with its path.
///
/// Returned by [`create_database`](crate::create_database). The caller owns
/// the connection: dropping the handle closes it, [`close`](Self::close)
/// does so explicitly and reports errors.
#[derive(Debug)]
pub struct DatabaseHandle {
    conn: Connection,
    path: PathBuf,
}

impl DatabaseHandle {
    pub(crate) fn new(conn: Connection, path: PathBuf) -> Self {
        Self { conn, path }
    }

    /// Opens an existing database for reading and writing.
    ///
    /// Never creates a file.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::NotFound`] if nothing exists at `path`, or
    /// [`SqliteError::DatabaseError`] if SQLite cannot open it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SqliteError::NotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.display(), "opened database");
        Ok(Self::new(conn, path.to_path_buf()))
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying connection, e.g. to
    /// start a transaction.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Consumes the handle and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Names of all user tables, sorted.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Returns whether the city tables exist and how many rows they hold.
    pub fn status(&self) -> Result<SchemaStatus> {
        let names = self.table_names()?;
        let tables_exist = [COUNTRIES_TABLE, CITIES_TABLE, CITIES_LABELS_TABLE]
            .iter()
            .all(|table| names.iter().any(|name| name == table));

        if !tables_exist {
            return Ok(SchemaStatus::default());
        }

        Ok(SchemaStatus {
            tables_exist,
            country_count: self.count_rows(COUNTRIES_TABLE)?,
            city_count: self.count_rows(CITIES_TABLE)?,
            label_count: self.count_rows(CITIES_LABELS_TABLE)?,
        })
    }

    /// Closes the connection, surfacing any error SQLite reports.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, err)| SqliteError::DatabaseError(err))?;
        debug!(path = %path.display(), "closed database");
        Ok(())
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Snapshot of a city database, returned by [`DatabaseHandle::status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Whether all three city tables exist.
    pub tables_exist: bool,
    /// Number of rows in `countries`.
    pub country_count: usize,
    /// Number of rows in `cities`.
    pub city_count: usize,
    /// Number of rows in `cities_labels`.
    pub label_count: usize,
}
