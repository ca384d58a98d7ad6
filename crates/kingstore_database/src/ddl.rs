//! Applying and inspecting the schema.

use crate::DatabaseResult;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use kingstore_error::{DatabaseError, DatabaseErrorKind};
use tracing::{debug, info, instrument};

/// The canonical DDL for the `channels`, `posts` and `callback_payloads` tables.
pub const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");

/// Tables created by [`SCHEMA_SQL`], sorted by name.
pub const SCHEMA_TABLES: [&str; 3] = ["callback_payloads", "channels", "posts"];

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Execute the schema against `conn`.
///
/// Every statement is `CREATE TABLE IF NOT EXISTS`, so applying the schema to
/// an initialised database changes nothing.
#[instrument(skip(conn))]
pub fn apply_schema(conn: &mut SqliteConnection) -> DatabaseResult<()> {
    debug!("Applying schema");
    conn.batch_execute(SCHEMA_SQL).map_err(|e| {
        tracing::error!(error = %e, "Failed to apply schema");
        DatabaseError::new(DatabaseErrorKind::Schema(e.to_string()))
    })?;
    info!("Schema applied");
    Ok(())
}

/// Names of all user tables, sorted.
#[instrument(skip(conn))]
pub fn table_names(conn: &mut SqliteConnection) -> DatabaseResult<Vec<String>> {
    let rows = diesel::sql_query(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )
    .load::<NameRow>(conn)?;

    Ok(rows.into_iter().map(|row| row.name).collect())
}

/// Column names of `table` in declaration order.
///
/// # Errors
///
/// Returns `TableNotFound` when the table does not exist.
#[instrument(skip(conn))]
pub fn table_columns(conn: &mut SqliteConnection, table: &str) -> DatabaseResult<Vec<String>> {
    let rows = diesel::sql_query("SELECT name FROM pragma_table_info(?) ORDER BY cid")
        .bind::<Text, _>(table)
        .load::<NameRow>(conn)?;

    if rows.is_empty() {
        return Err(DatabaseError::new(DatabaseErrorKind::TableNotFound(
            table.to_string(),
        )));
    }
    Ok(rows.into_iter().map(|row| row.name).collect())
}
