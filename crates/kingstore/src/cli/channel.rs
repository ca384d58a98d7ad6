//! `channel` command handlers.

use super::output::{write_channel, write_channels};
use super::{ChannelCommand, OutputFormat};
use anyhow::{Context, bail};
use diesel::sqlite::SqliteConnection;
use kingstore_core::ChatRef;
use kingstore_database::{
    NewChannelBuilder, create_channel, delete_channel, get_channel_by_chat_id, list_channels,
};
use std::io::Write;

/// Normalise a chat id argument to its stored form.
fn chat_id(raw: &str) -> anyhow::Result<String> {
    let chat: ChatRef = raw
        .parse()
        .with_context(|| format!("Invalid chat id '{}'", raw))?;
    Ok(chat.to_stored())
}

/// Handle a `channel` subcommand.
#[tracing::instrument(skip(conn, out))]
pub fn handle_channel_command(
    conn: &mut SqliteConnection,
    command: ChannelCommand,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        ChannelCommand::Add {
            chat_id: raw,
            title,
            added_by,
        } => {
            let mut builder = NewChannelBuilder::default();
            builder.chat_id(chat_id(&raw)?);
            if let Some(title) = title {
                builder.title(title);
            }
            if let Some(added_by) = added_by {
                builder.added_by(added_by);
            }
            let channel = create_channel(conn, &builder.build()?)?;
            write_channel(out, format, &channel)
        }
        ChannelCommand::List => write_channels(out, format, &list_channels(conn)?),
        ChannelCommand::Show { chat_id: raw } => {
            let chat_id = chat_id(&raw)?;
            match get_channel_by_chat_id(conn, &chat_id)? {
                Some(channel) => write_channel(out, format, &channel),
                None => bail!("Channel {} is not registered", chat_id),
            }
        }
        ChannelCommand::Remove { chat_id: raw } => {
            let chat_id = chat_id(&raw)?;
            if !delete_channel(conn, &chat_id)? {
                bail!("Channel {} is not registered", chat_id);
            }
            writeln!(out, "Removed channel {}", chat_id)?;
            Ok(())
        }
    }
}
