//! `init` and `schema` command handlers.

use super::OutputFormat;
use super::output::write_json;
use diesel::sqlite::SqliteConnection;
use kingstore_database::{SCHEMA_SQL, apply_schema, table_columns, table_names};
use serde_json::json;
use std::io::Write;

/// Apply the schema and list the resulting tables with their columns.
#[tracing::instrument(skip_all)]
pub fn handle_init(
    conn: &mut SqliteConnection,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    apply_schema(conn)?;

    let mut tables = Vec::new();
    for table in table_names(conn)? {
        let columns = table_columns(conn, &table)?;
        tables.push((table, columns));
    }
    tracing::info!(tables = tables.len(), "Database initialised");

    match format {
        OutputFormat::Human => {
            for (table, columns) in &tables {
                writeln!(out, "{} ({})", table, columns.join(", "))?;
            }
        }
        OutputFormat::Json => {
            let tables: Vec<_> = tables
                .iter()
                .map(|(table, columns)| json!({ "table": table, "columns": columns }))
                .collect();
            write_json(out, &tables)?;
        }
    }
    Ok(())
}

/// Print the canonical DDL.
pub fn handle_schema(out: &mut dyn Write) -> anyhow::Result<()> {
    write!(out, "{}", SCHEMA_SQL)?;
    Ok(())
}
