//! DDL generation from table layouts.
//!
//! Renders [`TableDefinition`]s into `CREATE TABLE` and `CREATE INDEX`
//! statements. Statements are emitted table by table in layout order: each
//! table is followed by its own indexes.
//!
//! No statement uses `IF NOT EXISTS`; they only run against a freshly
//! created file.

use citydb_core::{ColumnDefinition, ColumnType, TableDefinition, validate_tables};

use crate::error::{Result, SqliteError};

/// Renders the statements creating every table and index of the layout.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidLayout`] if the layout fails validation.
pub fn schema_statements(tables: &[TableDefinition]) -> Result<Vec<String>> {
    let errors = validate_tables(tables);
    if !errors.is_empty() {
        return Err(SqliteError::InvalidLayout(errors));
    }

    let mut statements = Vec::new();
    for table in tables {
        statements.push(create_table_sql(table));
        statements.extend(create_index_sql(table));
    }
    Ok(statements)
}

/// Renders the complete layout as a single SQL script.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidLayout`] if the layout fails validation.
pub fn generate_schema_sql(tables: &[TableDefinition]) -> Result<String> {
    let statements = schema_statements(tables)?;
    Ok(statements
        .iter()
        .map(|s| format!("{s};\n"))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn create_table_sql(table: &TableDefinition) -> String {
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| column_sql(table, column))
        .collect();
    lines.push(format!("PRIMARY KEY ({})", table.primary_key.join(", ")));

    format!("CREATE TABLE {} (\n    {}\n)", table.name, lines.join(",\n    "))
}

fn column_sql(table: &TableDefinition, column: &ColumnDefinition) -> String {
    let mut sql = match column.column_type {
        ColumnType::Text => format!("{} TEXT", column.name),
        ColumnType::Integer => format!("{} INTEGER", column.name),
        ColumnType::FixedText(length) => format!(
            "{name} TEXT CHECK (length({name}) = {length})",
            name = column.name
        ),
    };
    if !column.nullable || table.is_primary_key_column(&column.name) {
        sql.push_str(" NOT NULL");
    }
    sql
}

fn create_index_sql(table: &TableDefinition) -> impl Iterator<Item = String> + '_ {
    table.indexes.iter().map(move |index| {
        format!(
            "CREATE {}INDEX {} ON {}({})",
            if index.unique { "UNIQUE " } else { "" },
            index.name,
            table.name,
            index.columns.join(", ")
        )
    })
}
