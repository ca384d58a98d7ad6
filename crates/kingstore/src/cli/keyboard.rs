//! `keyboard` command handlers.

use super::output::write_json;
use super::post::require_post;
use super::{KeyboardCommand, OutputFormat};
use anyhow::{Context, bail};
use diesel::sqlite::SqliteConnection;
use kingstore_core::{Button, Keyboard};
use kingstore_database::update_post_keyboard;
use std::io::Write;

/// Apply `command` to `keyboard`.
///
/// Returns `false` for commands that only read the keyboard.
pub fn edit_keyboard(keyboard: &mut Keyboard, command: KeyboardCommand) -> anyhow::Result<bool> {
    match command {
        KeyboardCommand::Show => return Ok(false),
        KeyboardCommand::AddRow => keyboard.add_row(),
        KeyboardCommand::AddButton {
            text,
            row,
            url,
            callback,
        } => {
            keyboard.add_button(row, Button::new(text, url, callback));
        }
        KeyboardCommand::Edit {
            row,
            col,
            text,
            url,
            callback,
        } => {
            if keyboard
                .replace_button(row, col, Button::new(text, url, callback))
                .is_none()
            {
                bail!("No button at {}:{}", row, col);
            }
        }
        KeyboardCommand::Delete { row, col } => {
            if keyboard.delete_button(row, col).is_none() {
                bail!("No button at {}:{}", row, col);
            }
        }
        KeyboardCommand::Move {
            from_row,
            from_col,
            to_row,
            to_col,
        } => {
            if !keyboard.move_button(from_row, from_col, to_row, to_col) {
                bail!("No button at {}:{}", from_row, from_col);
            }
        }
        KeyboardCommand::Columns { columns } => keyboard.reformat_columns(columns),
    }
    Ok(true)
}

/// Handle a `keyboard` subcommand for post `post_id`.
///
/// Edits are validated before the keyboard is saved.
#[tracing::instrument(skip(conn, out))]
pub fn handle_keyboard_command(
    conn: &mut SqliteConnection,
    post_id: i64,
    command: KeyboardCommand,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let post = require_post(conn, post_id)?;
    let mut keyboard = Keyboard::from_json(post.keyboard_json())
        .with_context(|| format!("Stored keyboard of post #{} is unreadable", post_id))?;

    if edit_keyboard(&mut keyboard, command)? {
        keyboard.validate()?;
        update_post_keyboard(conn, post_id, &keyboard)?;
        tracing::info!(post_id, buttons = keyboard.button_count(), "Saved keyboard");
    }

    match format {
        OutputFormat::Human => writeln!(out, "{}", keyboard.summary())?,
        OutputFormat::Json => write_json(out, &keyboard)?,
    }
    Ok(())
}
