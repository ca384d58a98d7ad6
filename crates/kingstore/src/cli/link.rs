//! `link` command handlers.

use super::output::write_json;
use super::{LinkCommand, OutputFormat};
use anyhow::{Context, bail};
use kingstore_core::{ChatRef, parse_post_link, post_link};
use serde_json::json;
use std::io::Write;

/// Handle a `link` subcommand.
pub fn handle_link_command(
    command: LinkCommand,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        LinkCommand::Parse { url } => {
            let (chat, message_id) = parse_post_link(&url)?;
            match format {
                OutputFormat::Human => {
                    writeln!(out, "chat:       {}", chat)?;
                    writeln!(out, "message_id: {}", message_id)?;
                }
                OutputFormat::Json => {
                    write_json(out, &json!({ "chat": chat, "message_id": message_id }))?;
                }
            }
        }
        LinkCommand::Build { chat, message_id } => {
            let chat: ChatRef = chat
                .parse()
                .with_context(|| format!("Invalid chat '{}'", chat))?;
            let Some(link) = post_link(&chat, message_id) else {
                bail!("Chat {} has no public link", chat);
            };
            match format {
                OutputFormat::Human => writeln!(out, "{}", link)?,
                OutputFormat::Json => write_json(out, &json!({ "link": link }))?,
            }
        }
    }
    Ok(())
}
