//! One-shot database creation.
//!
//! [`create_database`] claims a path that must not exist yet, creates the
//! SQLite file there, creates every table and index inside one transaction
//! and hands back an open [`DatabaseHandle`].
//!
//! Creation is all-or-nothing. The existence check and the file creation are
//! a single exclusive-create call, so two concurrent callers cannot both
//! claim the same path. If any DDL statement fails the transaction is rolled
//! back and the newly created file is removed. A path that already existed is
//! never touched.
//!
//! # Example
//!
//! ```no_run
//! use citydb_sqlite::{SqliteError, create_database};
//!
//! let handle = create_database("cities.db").unwrap();
//! assert_eq!(handle.table_names().unwrap().len(), 3);
//!
//! // A second call refuses to overwrite the file.
//! assert!(matches!(
//!     create_database("cities.db"),
//!     Err(SqliteError::AlreadyExists(_))
//! ));
//! ```

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use citydb_core::{TableDefinition, city_tables};
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::error::{Result, SqliteError};
use crate::handle::DatabaseHandle;
use crate::schema::schema_statements;

/// Creates a new city database at `path` with the `countries`, `cities` and
/// `cities_labels` tables.
///
/// # Errors
///
/// - [`SqliteError::AlreadyExists`] if anything exists at `path`. The
///   existing file is left as it was.
/// - [`SqliteError::Io`] if the file cannot be created.
/// - [`SqliteError::DatabaseError`] if SQLite fails to open the file or to
///   create the schema. The new file is removed before returning.
pub fn create_database(path: impl AsRef<Path>) -> Result<DatabaseHandle> {
    create_database_with(path, &city_tables())
}

/// Creates a new database at `path` with a caller-supplied layout.
///
/// Behaves exactly like [`create_database`], except that the layout is
/// validated first: an invalid layout fails with
/// [`SqliteError::InvalidLayout`] before the filesystem is touched.
pub fn create_database_with(
    path: impl AsRef<Path>,
    tables: &[TableDefinition],
) -> Result<DatabaseHandle> {
    let path = path.as_ref();
    let statements = schema_statements(tables)?;

    claim_path(path)?;
    debug!(path = %path.display(), "created empty database file");

    match initialize(path, &statements) {
        Ok(conn) => {
            info!(
                path = %path.display(),
                tables = tables.len(),
                "database created"
            );
            Ok(DatabaseHandle::new(conn, path.to_path_buf()))
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "schema creation failed, removing file");
            if let Err(remove_err) = fs::remove_file(path) {
                warn!(
                    path = %path.display(),
                    error = %remove_err,
                    "failed to remove partially created database"
                );
            }
            Err(err)
        }
    }
}

/// Atomically creates an empty file at `path`, failing if anything is there.
fn claim_path(path: &Path) -> Result<()> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Err(SqliteError::AlreadyExists(path.to_path_buf()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Opens the claimed file and runs every statement in one transaction.
///
/// On error the connection is dropped before returning, so the caller can
/// remove the file.
fn initialize(path: &Path, statements: &[String]) -> Result<Connection> {
    let mut conn = Connection::open(path)?;

    let tx = conn.transaction()?;
    for statement in statements {
        debug!(statement = %summary(statement), "executing");
        tx.execute_batch(statement)?;
    }
    tx.commit()?;

    Ok(conn)
}

/// First line of a statement, for log output.
fn summary(statement: &str) -> &str {
    statement.lines().next().unwrap_or(statement)
}
