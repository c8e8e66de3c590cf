//! Layout validation.
//!
//! Catches structural mistakes in a list of [`TableDefinition`]s (bad
//! identifiers, duplicate names, keys and indexes over missing columns)
//! before any DDL is rendered from them.
//!
//! # Examples
//!
//! ```
//! use citydb_core::*;
//!
//! assert!(validate_tables(&city_tables()).is_empty());
//!
//! // Invalid: primary key over a column that does not exist
//! let bad = TableDefinition::new("things")
//!     .with_column(ColumnDefinition::text("id"))
//!     .with_primary_key(&["uuid"]);
//! assert!(!validate_tables(&[bad]).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ColumnType, TableDefinition};

/// Layout validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The layout has no tables at all.
    #[error("layout must define at least one table")]
    EmptyLayout,
    /// A table, column or index name is empty or contains characters other
    /// than ASCII alphanumerics and underscores.
    #[error("invalid identifier '{0}': must contain only alphanumeric characters and underscores")]
    InvalidIdentifier(String),
    /// Two tables share a name.
    #[error("duplicate table: {0}")]
    DuplicateTable(String),
    /// A table has no columns.
    #[error("table {0} has no columns")]
    NoColumns(String),
    /// Two columns in the same table share a name.
    #[error("duplicate column in table {table}: {column}")]
    DuplicateColumn { table: String, column: String },
    /// A table has no primary key.
    #[error("table {0} has no primary key")]
    MissingPrimaryKey(String),
    /// A primary key or index refers to a column the table does not have.
    #[error("table {table} has no column {column}")]
    UnknownColumn { table: String, column: String },
    /// Two indexes share a name.
    #[error("duplicate index: {0}")]
    DuplicateIndex(String),
    /// An index lists no columns.
    #[error("index {0} has no columns")]
    EmptyIndex(String),
    /// A fixed-length column declares length zero.
    #[error("column {table}.{column} has zero fixed length")]
    ZeroLength { table: String, column: String },
}

/// Returns `true` if `name` is usable unquoted as an SQL identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates a layout.
///
/// Returns every problem found; an empty vector means the layout is valid.
pub fn validate_tables(tables: &[TableDefinition]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if tables.is_empty() {
        errors.push(ValidationError::EmptyLayout);
        return errors;
    }

    let mut seen_tables: HashSet<&str> = HashSet::new();
    let mut seen_indexes: HashSet<&str> = HashSet::new();

    for table in tables {
        if !is_valid_identifier(&table.name) {
            errors.push(ValidationError::InvalidIdentifier(table.name.clone()));
        }
        if !seen_tables.insert(table.name.as_str()) {
            errors.push(ValidationError::DuplicateTable(table.name.clone()));
        }
        validate_columns(table, &mut errors);
        validate_keys(table, &mut seen_indexes, &mut errors);
    }

    errors
}

fn validate_columns(table: &TableDefinition, errors: &mut Vec<ValidationError>) {
    if table.columns.is_empty() {
        errors.push(ValidationError::NoColumns(table.name.clone()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for column in &table.columns {
        if !is_valid_identifier(&column.name) {
            errors.push(ValidationError::InvalidIdentifier(column.name.clone()));
        }
        if !seen.insert(column.name.as_str()) {
            errors.push(ValidationError::DuplicateColumn {
                table: table.name.clone(),
                column: column.name.clone(),
            });
        }
        if column.column_type == ColumnType::FixedText(0) {
            errors.push(ValidationError::ZeroLength {
                table: table.name.clone(),
                column: column.name.clone(),
            });
        }
    }
}

fn validate_keys<'a>(
    table: &'a TableDefinition,
    seen_indexes: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if table.primary_key.is_empty() {
        errors.push(ValidationError::MissingPrimaryKey(table.name.clone()));
    }
    for column in &table.primary_key {
        check_column_exists(table, column, errors);
    }

    for index in &table.indexes {
        if !is_valid_identifier(&index.name) {
            errors.push(ValidationError::InvalidIdentifier(index.name.clone()));
        }
        if !seen_indexes.insert(index.name.as_str()) {
            errors.push(ValidationError::DuplicateIndex(index.name.clone()));
        }
        if index.columns.is_empty() {
            errors.push(ValidationError::EmptyIndex(index.name.clone()));
        }
        for column in &index.columns {
            check_column_exists(table, column, errors);
        }
    }
}

fn check_column_exists(table: &TableDefinition, column: &str, errors: &mut Vec<ValidationError>) {
    if table.find_column(column).is_none() {
        errors.push(ValidationError::UnknownColumn {
            table: table.name.clone(),
            column: column.to_string(),
        });
    }
}
