//! SQLite schema initializer for the city database.
//!
//! This crate creates a new SQLite file holding three empty tables:
//!
//! | Table | Primary key | Secondary indexes |
//! |---|---|---|
//! | `countries` | `id` | `iso` |
//! | `cities` | `id` | `country`, `population` |
//! | `cities_labels` | `(city, lang)` | `label` |
//!
//! It never writes rows, never alters an existing database and never
//! overwrites an existing path.
//!
//! # Architecture
//!
//! - **`schema`** — DDL generation from [`citydb_core`] table layouts
//! - **`initializer`** — guarded, all-or-nothing database creation
//! - **`handle`** — the caller-owned [`DatabaseHandle`]
//!
//! # Quick start
//!
//! ```no_run
//! use citydb_sqlite::create_database;
//!
//! let handle = create_database("cities.db").unwrap();
//! handle
//!     .connection()
//!     .execute("INSERT INTO countries (id, iso) VALUES ('Q142', 'fr')", [])
//!     .unwrap();
//!
//! let status = handle.status().unwrap();
//! println!("Countries: {}", status.country_count);
//! handle.close().unwrap();
//! ```

mod error;
mod handle;
mod initializer;
mod schema;

pub use error::{Result, SqliteError};
pub use handle::{DatabaseHandle, SchemaStatus};
pub use initializer::{create_database, create_database_with};
pub use schema::{generate_schema_sql, schema_statements};
