//! Channel registry.

use crate::{ChannelRow, DatabaseResult, NewChannel, schema::channels};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info, instrument};

/// Register a channel.
///
/// # Errors
///
/// Returns `Duplicate` when a channel with the same `chat_id` exists.
#[instrument(skip(conn, channel), fields(chat_id = %channel.chat_id()))]
pub fn create_channel(conn: &mut SqliteConnection, channel: &NewChannel) -> DatabaseResult<ChannelRow> {
    let row = diesel::insert_into(channels::table)
        .values(channel)
        .returning(ChannelRow::as_returning())
        .get_result(conn)?;

    info!(id = row.id(), "Registered channel");
    Ok(row)
}

/// All channels, most recently added first.
#[instrument(skip(conn))]
pub fn list_channels(conn: &mut SqliteConnection) -> DatabaseResult<Vec<ChannelRow>> {
    let rows = channels::table
        .order(channels::id.desc())
        .select(ChannelRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded channels");
    Ok(rows)
}

/// Look up a channel by its Telegram chat id.
#[instrument(skip(conn))]
pub fn get_channel_by_chat_id(
    conn: &mut SqliteConnection,
    chat_id: &str,
) -> DatabaseResult<Option<ChannelRow>> {
    Ok(channels::table
        .filter(channels::chat_id.eq(chat_id))
        .select(ChannelRow::as_select())
        .first(conn)
        .optional()?)
}

/// Look up a channel by its row id.
#[instrument(skip(conn))]
pub fn get_channel_by_id(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<Option<ChannelRow>> {
    Ok(channels::table
        .find(id)
        .select(ChannelRow::as_select())
        .first(conn)
        .optional()?)
}

/// Remove a channel. Returns `true` if a row was deleted.
#[instrument(skip(conn))]
pub fn delete_channel(conn: &mut SqliteConnection, chat_id: &str) -> DatabaseResult<bool> {
    let deleted = diesel::delete(channels::table.filter(channels::chat_id.eq(chat_id))).execute(conn)?;

    if deleted > 0 {
        info!(chat_id, "Removed channel");
    }
    Ok(deleted > 0)
}
