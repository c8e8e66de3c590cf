//! Error types for database creation and access.
//!
//! Provides a unified error type covering the existence guard, layout
//! validation, filesystem and SQLite failures.

use std::path::PathBuf;

use citydb_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while creating or opening a city database.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// Something already exists at the target path; nothing was modified.
    #[error("database path already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// No database exists at the path being opened.
    #[error("database not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The table layout failed validation.
    #[error("invalid table layout: {}", join_errors(.0))]
    InvalidLayout(Vec<ValidationError>),

    /// Filesystem failure while creating or removing the database file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
