//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the
//! `kingstore` binary. Handlers write their results to the given writer.

mod channel;
mod commands;
mod config;
mod keyboard;
mod link;
mod output;
mod payloads;
mod post;
mod schema;

pub use channel::handle_channel_command;
pub use commands::{
    ChannelCommand, Cli, Commands, ConfigCommand, KeyboardCommand, LinkCommand, PayloadsCommand,
    PostCommand,
};
pub use config::{handle_config_command, write_config};
pub use keyboard::{edit_keyboard, handle_keyboard_command};
pub use link::handle_link_command;
pub use output::OutputFormat;
pub use payloads::handle_payloads_command;
pub use post::handle_post_command;
pub use schema::{handle_init, handle_schema};

use anyhow::Context;
use diesel::sqlite::SqliteConnection;
use kingstore_database::{apply_schema, establish_connection};
use std::io::Write;

/// Open the database and make sure the schema exists.
pub fn open_database(database_url: Option<&str>) -> anyhow::Result<SqliteConnection> {
    let url = database_url.context("No database given: pass --database-url or set DATABASE_URL")?;
    let mut conn = establish_connection(url)?;
    apply_schema(&mut conn)?;
    Ok(conn)
}

/// Run a parsed command line.
pub fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let format = OutputFormat::from_json_flag(cli.json);
    let database_url = cli.database_url.as_deref();

    match cli.command {
        Commands::Schema => handle_schema(out),
        Commands::Link { command } => handle_link_command(command, format, out),
        Commands::Config { command } => handle_config_command(command, format, out),
        Commands::Init => handle_init(&mut open_database(database_url)?, format, out),
        Commands::Channel { command } => {
            handle_channel_command(&mut open_database(database_url)?, command, format, out)
        }
        Commands::Post { command } => {
            handle_post_command(&mut open_database(database_url)?, command, format, out)
        }
        Commands::Payloads { command } => {
            handle_payloads_command(&mut open_database(database_url)?, command, format, out)
        }
        Commands::Keyboard { post_id, command } => handle_keyboard_command(
            &mut open_database(database_url)?,
            post_id,
            command,
            format,
            out,
        ),
    }
}
