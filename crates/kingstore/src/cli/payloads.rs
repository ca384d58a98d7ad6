//! `payloads` command handlers.

use super::output::write_json;
use super::{OutputFormat, PayloadsCommand};
use diesel::sqlite::SqliteConnection;
use kingstore_database::purge_payloads_older_than;
use serde_json::json;
use std::io::Write;

/// Handle a `payloads` subcommand.
#[tracing::instrument(skip(conn, out))]
pub fn handle_payloads_command(
    conn: &mut SqliteConnection,
    command: PayloadsCommand,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let PayloadsCommand::Purge { older_than } = command;
    let cutoff = chrono::Utc::now().timestamp() - i64::from(older_than);
    let purged = purge_payloads_older_than(conn, cutoff)?;

    match format {
        OutputFormat::Human => writeln!(out, "Purged {} callback payloads", purged)?,
        OutputFormat::Json => write_json(out, &json!({ "purged": purged, "cutoff": cutoff }))?,
    }
    Ok(())
}
