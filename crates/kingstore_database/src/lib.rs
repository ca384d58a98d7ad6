//! SQLite storage for the Kingstore channel publishing store.
//!
//! This crate ships the canonical schema and the repositories over it:
//! - `channels`: channels the bot may publish to
//! - `posts`: drafts and published posts with their inline keyboards
//! - `callback_payloads`: callback data too long for Telegram
//!
//! All repository functions take a `&mut SqliteConnection`; use
//! [`establish_connection`] for a single connection or [`create_pool`] for a
//! pool. Apply the schema with [`apply_schema`] before use.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod callback_payloads;
mod channel_models;
mod channels;
mod connection;
mod ddl;
mod post_models;
mod posts;

#[allow(missing_docs)]
pub mod schema;

pub use callback_payloads::{
    ConnectionPayloadStore, SqlitePayloadStore, delete_payload, get_payload, purge_payloads_older_than, store_payload,
};
pub use channel_models::{ChannelRow, NewChannel, NewChannelBuilder};
pub use channels::{
    create_channel, delete_channel, get_channel_by_chat_id, get_channel_by_id, list_channels,
};
pub use connection::{DbPool, create_pool, establish_connection, establish_connection_from_env};
pub use ddl::{SCHEMA_SQL, SCHEMA_TABLES, apply_schema, table_columns, table_names};
pub use post_models::{
    NewPost, NewPostBuilder, PostChanges, PostFilter, PostFilterBuilder, PostRow,
};
pub use posts::{
    create_post, delete_post, find_published_post, get_post, list_posts, publish_post,
    record_published_post, update_keyboard_by_message, update_post, update_post_keyboard,
    update_post_photo, update_post_text,
};

pub use kingstore_error::{DatabaseError, DatabaseErrorKind};

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
