//! Table layout type definitions.
//!
//! These types describe tables as data (columns, primary key, secondary
//! indexes) so that storage backends can render them into DDL. They are
//! serializable with [`serde`] so a layout can be printed or shipped as JSON.

use serde::{Deserialize, Serialize};

/// Storage type of a column.
///
/// # Examples
///
/// ```
/// use citydb_core::ColumnType;
///
/// assert_eq!(ColumnType::default(), ColumnType::Text);
/// assert_ne!(ColumnType::FixedText(2), ColumnType::FixedText(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColumnType {
    /// Variable-length string (the default).
    #[default]
    Text,
    /// 64-bit signed integer.
    Integer,
    /// String of exactly `n` characters (e.g. a two-letter ISO code).
    FixedText(u32),
}

/// A single column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Storage type.
    pub column_type: ColumnType,
    /// Whether `NULL` is accepted. Primary-key columns are always rendered
    /// `NOT NULL` regardless of this flag.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnDefinition {
    /// Creates a nullable column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }

    /// Shorthand for a nullable [`ColumnType::Text`] column.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Shorthand for a nullable [`ColumnType::Integer`] column.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    /// Shorthand for a nullable [`ColumnType::FixedText`] column.
    pub fn fixed_text(name: impl Into<String>, length: u32) -> Self {
        Self::new(name, ColumnType::FixedText(length))
    }

    /// Marks the column `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// A secondary index over one or more columns of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Index name, unique within the database.
    pub name: String,
    /// Indexed columns, in key order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub unique: bool,
}

impl IndexDefinition {
    /// Creates a non-unique index named `idx_{table}_{columns joined by _}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use citydb_core::IndexDefinition;
    ///
    /// let index = IndexDefinition::for_columns("cities", &["population"]);
    /// assert_eq!(index.name, "idx_cities_population");
    /// assert!(!index.unique);
    /// ```
    pub fn for_columns(table: &str, columns: &[&str]) -> Self {
        Self {
            name: format!("idx_{table}_{}", columns.join("_")),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: false,
        }
    }
}

/// Definition of a single table: its columns, primary key and indexes.
///
/// Built with chained builder methods, mirroring how a query builder
/// describes a table before it is created.
///
/// # Examples
///
/// ```
/// use citydb_core::{ColumnDefinition, TableDefinition};
///
/// let table = TableDefinition::new("countries")
///     .with_column(ColumnDefinition::text("id"))
///     .with_column(ColumnDefinition::fixed_text("iso", 2))
///     .with_primary_key(&["id"])
///     .with_index(&["iso"]);
///
/// assert_eq!(table.primary_key, vec!["id".to_string()]);
/// assert_eq!(table.indexes[0].name, "idx_countries_iso");
/// assert!(table.find_column("iso").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDefinition>,
    /// Primary key columns, in key order. May span several columns.
    pub primary_key: Vec<String>,
    /// Secondary indexes.
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    /// Creates an empty table definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Appends a column.
    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key columns.
    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Adds a non-unique secondary index over `columns`.
    pub fn with_index(mut self, columns: &[&str]) -> Self {
        let index = IndexDefinition::for_columns(&self.name, columns);
        self.indexes.push(index);
        self
    }

    /// Finds a column by name.
    pub fn find_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns `true` if `column` is part of the primary key.
    pub fn is_primary_key_column(&self, column: &str) -> bool {
        self.primary_key.iter().any(|c| c == column)
    }
}
