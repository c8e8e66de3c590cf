//! Core table layout types for the city database.
//!
//! This crate describes tables as plain data, independent of any storage
//! engine:
//!
//! - [`TableDefinition`] — a table with its columns, primary key and
//!   secondary indexes.
//! - [`ColumnDefinition`] / [`ColumnType`] — a column and its storage type.
//! - [`IndexDefinition`] — a secondary index.
//!
//! The fixed layout (`countries`, `cities`, `cities_labels`) is returned by
//! [`city_tables`]. Validation ([`validate_tables`]) catches structural errors
//! such as keys over missing columns or unsafe identifiers.
//!
//! # Example
//!
//! ```
//! use citydb_core::*;
//!
//! let tables = city_tables();
//! assert_eq!(tables.len(), 3);
//!
//! let labels = &tables[2];
//! assert_eq!(labels.name, CITIES_LABELS_TABLE);
//! assert_eq!(labels.primary_key, vec!["city", "lang"]);
//! assert!(validate_tables(&tables).is_empty());
//! ```

mod layout;
mod types;
mod validate;

pub use layout::{
    CITIES_LABELS_TABLE, CITIES_TABLE, COUNTRIES_TABLE, ISO_CODE_LENGTH, cities_labels_table,
    cities_table, city_tables, countries_table,
};
pub use types::*;
pub use validate::{ValidationError, is_valid_identifier, validate_tables};
