//! Post storage: drafts, edits and publication records.

use crate::{DatabaseResult, NewPost, NewPostBuilder, PostChanges, PostFilter, PostRow, schema::posts};
use diesel::dsl::now;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use kingstore_core::{ChatRef, Keyboard, PostStatus, post_link};
use kingstore_error::{DatabaseError, DatabaseErrorKind};
use tracing::{debug, info, instrument};

/// Insert a post and return the stored row.
#[instrument(skip(conn, post), fields(author_id = post.author_id()))]
pub fn create_post(conn: &mut SqliteConnection, post: &NewPost) -> DatabaseResult<PostRow> {
    let row = diesel::insert_into(posts::table)
        .values(post)
        .returning(PostRow::as_returning())
        .get_result(conn)?;

    info!(id = row.id(), "Created post");
    Ok(row)
}

/// Load a post by id.
#[instrument(skip(conn))]
pub fn get_post(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<Option<PostRow>> {
    Ok(posts::table
        .find(id)
        .select(PostRow::as_select())
        .first(conn)
        .optional()?)
}

/// Posts matching `filter`, most recently updated first.
#[instrument(skip(conn))]
pub fn list_posts(conn: &mut SqliteConnection, filter: &PostFilter) -> DatabaseResult<Vec<PostRow>> {
    let mut query = posts::table.into_boxed();

    if let Some(author_id) = filter.author_id() {
        query = query.filter(posts::author_id.eq(*author_id));
    }
    if let Some(status) = filter.status() {
        query = query.filter(posts::status.eq(status.as_str()));
    }

    let rows = query
        .order((posts::updated_at.desc(), posts::id.desc()))
        .select(PostRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded posts");
    Ok(rows)
}

/// Apply `changes` to a post and bump its `updated_at`.
///
/// Returns `None` when the post does not exist. An empty change set only
/// loads the post.
#[instrument(skip(conn, changes))]
pub fn update_post(
    conn: &mut SqliteConnection,
    id: i64,
    changes: PostChanges,
) -> DatabaseResult<Option<PostRow>> {
    if changes.is_empty() {
        return get_post(conn, id);
    }

    let row = diesel::update(posts::table.find(id))
        .set((changes, posts::updated_at.eq(now)))
        .returning(PostRow::as_returning())
        .get_result(conn)
        .optional()?;

    if row.is_some() {
        debug!(id, "Updated post");
    }
    Ok(row)
}

/// Replace (or clear) the text of a post.
pub fn update_post_text(
    conn: &mut SqliteConnection,
    id: i64,
    text: Option<String>,
) -> DatabaseResult<Option<PostRow>> {
    update_post(conn, id, PostChanges::new().text(text))
}

/// Replace (or clear) the photo of a post.
pub fn update_post_photo(
    conn: &mut SqliteConnection,
    id: i64,
    photo_file_id: Option<String>,
) -> DatabaseResult<Option<PostRow>> {
    update_post(conn, id, PostChanges::new().photo_file_id(photo_file_id))
}

/// Replace the keyboard of a post.
pub fn update_post_keyboard(
    conn: &mut SqliteConnection,
    id: i64,
    keyboard: &Keyboard,
) -> DatabaseResult<Option<PostRow>> {
    update_post(conn, id, PostChanges::new().keyboard(keyboard))
}

/// Mark a draft as published to `chat` under `message_id`.
///
/// # Errors
///
/// - `NotFound` if the post does not exist
/// - `InvalidState` if it is already published
#[instrument(skip(conn), fields(chat = %chat))]
pub fn publish_post(
    conn: &mut SqliteConnection,
    id: i64,
    chat: &ChatRef,
    message_id: i32,
) -> DatabaseResult<PostRow> {
    let draft = posts::table
        .find(id)
        .filter(posts::status.eq(PostStatus::Draft.as_str()));

    let row = diesel::update(draft)
        .set((
            PostChanges::new().published(chat, message_id),
            posts::updated_at.eq(now),
        ))
        .returning(PostRow::as_returning())
        .get_result(conn)
        .optional()?;

    match row {
        Some(row) => {
            info!(id, message_id, link = ?row.published_link(), "Published post");
            Ok(row)
        }
        None if get_post(conn, id)?.is_some() => Err(DatabaseError::new(
            DatabaseErrorKind::InvalidState(format!("post {} is already published", id)),
        )),
        None => Err(DatabaseError::new(DatabaseErrorKind::NotFound)),
    }
}

/// Register a message that was published without going through a draft.
#[instrument(skip(conn, text, photo_file_id, keyboard), fields(chat = %chat))]
pub fn record_published_post(
    conn: &mut SqliteConnection,
    author_id: i64,
    chat: &ChatRef,
    message_id: i32,
    text: Option<String>,
    photo_file_id: Option<String>,
    keyboard: &Keyboard,
) -> DatabaseResult<PostRow> {
    let mut builder = NewPostBuilder::default();
    builder
        .author_id(author_id)
        .keyboard(keyboard)
        .status(PostStatus::Published)
        .published_channel(chat.to_stored())
        .published_message_id(message_id);
    if let Some(text) = text {
        builder.text(text);
    }
    if let Some(photo_file_id) = photo_file_id {
        builder.photo_file_id(photo_file_id);
    }
    if let Some(link) = post_link(chat, message_id) {
        builder.published_link(link);
    }

    let post = builder
        .build()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;
    create_post(conn, &post)
}

/// Find the post published to `chat` under `message_id`.
///
/// A post matches when either its channel or its stored link equals the chat
/// reference.
#[instrument(skip(conn), fields(chat = %chat))]
pub fn find_published_post(
    conn: &mut SqliteConnection,
    chat: &ChatRef,
    message_id: i32,
) -> DatabaseResult<Option<PostRow>> {
    let chat = chat.to_stored();
    Ok(posts::table
        .filter(
            posts::published_channel
                .eq(&chat)
                .or(posts::published_link.eq(&chat)),
        )
        .filter(posts::published_message_id.eq(message_id))
        .order(posts::id.desc())
        .select(PostRow::as_select())
        .first(conn)
        .optional()?)
}

/// Replace the keyboard of every post published to `chat` under `message_id`.
///
/// Returns the number of posts updated.
#[instrument(skip(conn, keyboard), fields(chat = %chat))]
pub fn update_keyboard_by_message(
    conn: &mut SqliteConnection,
    chat: &ChatRef,
    message_id: i32,
    keyboard: &Keyboard,
) -> DatabaseResult<usize> {
    let chat = chat.to_stored();
    let target = posts::table
        .filter(
            posts::published_channel
                .eq(&chat)
                .or(posts::published_link.eq(&chat)),
        )
        .filter(posts::published_message_id.eq(message_id));

    let updated = diesel::update(target)
        .set((
            posts::keyboard_json.eq(keyboard.to_json()),
            posts::updated_at.eq(now),
        ))
        .execute(conn)?;

    debug!(updated, "Updated keyboard by message");
    Ok(updated)
}

/// Delete a post. Returns `true` if a row was deleted.
#[instrument(skip(conn))]
pub fn delete_post(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<bool> {
    let deleted = diesel::delete(posts::table.find(id)).execute(conn)?;

    if deleted > 0 {
        info!(id, "Deleted post");
    }
    Ok(deleted > 0)
}
