//! `config` command handlers.

use super::output::write_json;
use super::{ConfigCommand, OutputFormat};
use kingstore_core::{BotConfig, mask_secret};
use serde_json::json;
use std::io::Write;

/// Handle a `config` subcommand.
pub fn handle_config_command(
    command: ConfigCommand,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let ConfigCommand::Check { file } = command;
    let config = match file {
        Some(path) => BotConfig::from_file(path)?,
        None => BotConfig::from_env()?,
    };
    write_config(&config, format, out)
}

/// Print `config` with the bot token masked.
pub fn write_config(
    config: &BotConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let token = mask_secret(config.bot_token());
    match format {
        OutputFormat::Human => {
            writeln!(out, "BOT_TOKEN:    {}", token)?;
            writeln!(out, "CHANNEL_ID:   {}", config.channel_id())?;
            writeln!(out, "DATABASE_URL: {}", config.database_url())?;
            writeln!(out, "database:     {}", config.database_path())?;
        }
        OutputFormat::Json => write_json(
            out,
            &json!({
                "bot_token": token,
                "channel_id": config.channel_id(),
                "database_url": config.database_url(),
                "database_path": config.database_path(),
            }),
        )?,
    }
    Ok(())
}
