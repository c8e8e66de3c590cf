//! The fixed city database layout.
//!
//! Three tables, created in this order:
//!
//! - `countries` — `id` primary key, two-letter `iso` code (indexed)
//! - `cities` — `id` primary key, `country` (indexed), `population` (indexed)
//! - `cities_labels` — localized names keyed by `(city, lang)`, `label` indexed
//!
//! `cities.country` and `cities_labels.city` refer to other tables by id
//! only; no foreign keys are declared.

use crate::{ColumnDefinition, TableDefinition};

/// Name of the countries table.
pub const COUNTRIES_TABLE: &str = "countries";
/// Name of the cities table.
pub const CITIES_TABLE: &str = "cities";
/// Name of the localized city labels table.
pub const CITIES_LABELS_TABLE: &str = "cities_labels";

/// Length of the `countries.iso` column (ISO 3166-1 alpha-2).
pub const ISO_CODE_LENGTH: u32 = 2;

/// Returns the `countries` table definition.
pub fn countries_table() -> TableDefinition {
    TableDefinition::new(COUNTRIES_TABLE)
        .with_column(ColumnDefinition::text("id"))
        .with_column(ColumnDefinition::fixed_text("iso", ISO_CODE_LENGTH))
        .with_primary_key(&["id"])
        .with_index(&["iso"])
}

/// Returns the `cities` table definition.
pub fn cities_table() -> TableDefinition {
    TableDefinition::new(CITIES_TABLE)
        .with_column(ColumnDefinition::text("id"))
        .with_column(ColumnDefinition::text("country"))
        .with_column(ColumnDefinition::integer("population"))
        .with_primary_key(&["id"])
        .with_index(&["country"])
        .with_index(&["population"])
}

/// Returns the `cities_labels` table definition.
pub fn cities_labels_table() -> TableDefinition {
    TableDefinition::new(CITIES_LABELS_TABLE)
        .with_column(ColumnDefinition::text("city"))
        .with_column(ColumnDefinition::text("lang"))
        .with_column(ColumnDefinition::text("label"))
        .with_primary_key(&["city", "lang"])
        .with_index(&["label"])
}

/// Returns the complete layout in creation order.
///
/// # Examples
///
/// ```
/// use citydb_core::{city_tables, validate_tables};
///
/// let tables = city_tables();
/// let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
/// assert_eq!(names, ["countries", "cities", "cities_labels"]);
/// assert!(validate_tables(&tables).is_empty());
/// ```
pub fn city_tables() -> Vec<TableDefinition> {
    vec![countries_table(), cities_table(), cities_labels_table()]
}
