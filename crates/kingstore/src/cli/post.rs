//! `post` command handlers.

use super::output::{write_json, write_post, write_posts};
use super::{OutputFormat, PostCommand};
use anyhow::{Context, bail};
use diesel::sqlite::SqliteConnection;
use kingstore_core::{ChatRef, Keyboard, build_inline_markup};
use kingstore_database::{
    ConnectionPayloadStore, NewPostBuilder, PostChanges, PostFilterBuilder, PostRow, create_post,
    delete_post, get_post, list_posts, publish_post, update_post,
};
use std::io::Write;

/// Decode and validate keyboard JSON from the command line.
pub(crate) fn parse_keyboard(json: &str) -> anyhow::Result<Keyboard> {
    let mut keyboard = Keyboard::from_json(json)?;
    keyboard.validate()?;
    Ok(keyboard)
}

/// Load a post or fail with a readable message.
pub(crate) fn require_post(conn: &mut SqliteConnection, id: i64) -> anyhow::Result<PostRow> {
    get_post(conn, id)?.with_context(|| format!("Post #{} not found", id))
}

/// Handle a `post` subcommand.
#[tracing::instrument(skip(conn, out))]
pub fn handle_post_command(
    conn: &mut SqliteConnection,
    command: PostCommand,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        PostCommand::New {
            author,
            text,
            photo,
            keyboard,
        } => {
            let mut builder = NewPostBuilder::default();
            builder.author_id(author);
            if let Some(text) = text {
                builder.text(text);
            }
            if let Some(photo) = photo {
                builder.photo_file_id(photo);
            }
            if let Some(json) = keyboard {
                builder.keyboard(&parse_keyboard(&json)?);
            }
            let post = create_post(conn, &builder.build()?)?;
            write_post(out, format, &post)
        }
        PostCommand::List { author, status } => {
            let mut filter = PostFilterBuilder::default();
            if let Some(author) = author {
                filter.author_id(author);
            }
            if let Some(status) = status {
                filter.status(status);
            }
            let posts = list_posts(conn, &filter.build()?)?;
            write_posts(out, format, &posts)
        }
        PostCommand::Show { id } => write_post(out, format, &require_post(conn, id)?),
        PostCommand::Edit {
            id,
            text,
            clear_text,
            photo,
            clear_photo,
            keyboard,
        } => {
            let mut changes = PostChanges::new();
            if text.is_some() || clear_text {
                changes = changes.text(text);
            }
            if photo.is_some() || clear_photo {
                changes = changes.photo_file_id(photo);
            }
            if let Some(json) = keyboard {
                changes = changes.keyboard(&parse_keyboard(&json)?);
            }
            if changes.is_empty() {
                bail!("Nothing to change: pass --text, --photo, --keyboard or a --clear flag");
            }
            let post = update_post(conn, id, changes)?
                .with_context(|| format!("Post #{} not found", id))?;
            write_post(out, format, &post)
        }
        PostCommand::Publish {
            id,
            message_id,
            channel,
        } => {
            let channel = channel.context("No channel given: pass --channel or set CHANNEL_ID")?;
            let chat: ChatRef = channel
                .parse()
                .with_context(|| format!("Invalid channel '{}'", channel))?;
            let post = publish_post(conn, id, &chat, message_id)?;
            write_post(out, format, &post)
        }
        PostCommand::Delete { id } => {
            if !delete_post(conn, id)? {
                bail!("Post #{} not found", id);
            }
            writeln!(out, "Deleted post #{}", id)?;
            Ok(())
        }
        PostCommand::Markup { id } => {
            let post = require_post(conn, id)?;
            let keyboard = Keyboard::from_json(post.keyboard_json())
                .with_context(|| format!("Stored keyboard of post #{} is unreadable", id))?;
            let markup = {
                let store = ConnectionPayloadStore::new(conn);
                build_inline_markup(&keyboard, &store)
            };
            // Markup is JSON in both formats
            write_json(out, &markup)
        }
    }
}
