//! Diesel models for the channels table.

use chrono::NaiveDateTime;
use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use serde::Serialize;

/// Database row for the channels table.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Serialize, Getters)]
#[diesel(table_name = crate::schema::channels)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChannelRow {
    /// Surrogate key
    id: i64,
    /// Telegram chat id or `@username`, unique
    chat_id: String,
    /// Display title
    title: Option<String>,
    /// Telegram user who registered the channel
    added_by: Option<i64>,
    /// Registration time (UTC)
    created_at: NaiveDateTime,
}

/// Insertable struct for the channels table with builder pattern.
#[derive(Debug, Clone, Insertable, Getters, Builder)]
#[diesel(table_name = crate::schema::channels)]
#[builder(setter(into))]
pub struct NewChannel {
    /// Telegram chat id or `@username`
    chat_id: String,
    /// Display title
    #[builder(default, setter(into, strip_option))]
    title: Option<String>,
    /// Telegram user who registered the channel
    #[builder(default, setter(into, strip_option))]
    added_by: Option<i64>,
}
