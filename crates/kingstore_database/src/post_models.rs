//! Diesel models for the posts table.

use crate::DatabaseResult;
use chrono::NaiveDateTime;
use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use kingstore_core::{ChatRef, Keyboard, PostStatus, post_link};
use serde::Serialize;

/// Database row for the posts table.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Serialize, Getters)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostRow {
    /// Post id
    id: i64,
    /// Telegram user who wrote the post
    author_id: i64,
    /// Message text or photo caption
    text: Option<String>,
    /// Telegram file id of the attached photo
    photo_file_id: Option<String>,
    /// Inline keyboard as JSON rows
    keyboard_json: String,
    /// `draft` or `published`
    #[getter(skip)]
    status: String,
    /// Creation time (UTC)
    created_at: NaiveDateTime,
    /// Last modification time (UTC)
    updated_at: NaiveDateTime,
    /// Message id in the channel once published
    published_message_id: Option<i32>,
    /// Public link to the published message
    published_link: Option<String>,
    /// Channel the post was published to
    published_channel: Option<String>,
}

impl PostRow {
    /// Decoded inline keyboard; unreadable JSON yields an empty keyboard.
    pub fn keyboard(&self) -> Keyboard {
        Keyboard::from_stored(Some(&self.keyboard_json))
    }

    /// Lifecycle status.
    pub fn status(&self) -> DatabaseResult<PostStatus> {
        self.status.parse()
    }

    /// True once the post has been published.
    pub fn is_published(&self) -> bool {
        matches!(self.status(), Ok(PostStatus::Published))
    }
}

/// Insertable struct for the posts table with builder pattern.
///
/// Status defaults to `draft` and the keyboard to `[]`; timestamps come from
/// the column defaults.
#[derive(Debug, Clone, Insertable, Getters, Builder)]
#[diesel(table_name = crate::schema::posts)]
#[builder(setter(into))]
pub struct NewPost {
    /// Telegram user who wrote the post
    author_id: i64,
    /// Message text or photo caption
    #[builder(default, setter(into, strip_option))]
    text: Option<String>,
    /// Telegram file id of the attached photo
    #[builder(default, setter(into, strip_option))]
    photo_file_id: Option<String>,
    /// Inline keyboard as JSON rows
    #[builder(default = "Keyboard::new().to_json()", setter(custom))]
    keyboard_json: String,
    /// `draft` or `published`
    #[builder(default = "PostStatus::Draft.as_str().to_string()", setter(custom))]
    status: String,
    /// Message id in the channel once published
    #[builder(default, setter(into, strip_option))]
    published_message_id: Option<i32>,
    /// Public link to the published message
    #[builder(default, setter(into, strip_option))]
    published_link: Option<String>,
    /// Channel the post was published to
    #[builder(default, setter(into, strip_option))]
    published_channel: Option<String>,
}

impl NewPostBuilder {
    /// Set the inline keyboard.
    pub fn keyboard(&mut self, keyboard: &Keyboard) -> &mut Self {
        self.keyboard_json = Some(keyboard.to_json());
        self
    }

    /// Set the lifecycle status.
    pub fn status(&mut self, status: PostStatus) -> &mut Self {
        self.status = Some(status.as_str().to_string());
        self
    }
}

/// Partial update for the posts table.
///
/// Fields left unset are not touched; nullable fields set to `None` are
/// cleared. `updated_at` is bumped by the repository on every update.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
pub struct PostChanges {
    text: Option<Option<String>>,
    photo_file_id: Option<Option<String>>,
    keyboard_json: Option<String>,
    status: Option<String>,
    published_message_id: Option<Option<i32>>,
    published_link: Option<Option<String>>,
    published_channel: Option<Option<String>>,
}

impl PostChanges {
    /// Empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Replace (or clear) the text.
    pub fn text(mut self, text: Option<String>) -> Self {
        self.text = Some(text);
        self
    }

    /// Replace (or clear) the photo.
    pub fn photo_file_id(mut self, photo_file_id: Option<String>) -> Self {
        self.photo_file_id = Some(photo_file_id);
        self
    }

    /// Replace the keyboard.
    pub fn keyboard(mut self, keyboard: &Keyboard) -> Self {
        self.keyboard_json = Some(keyboard.to_json());
        self
    }

    /// Change the status.
    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    /// Record where the post was published and mark it published.
    pub fn published(mut self, chat: &ChatRef, message_id: i32) -> Self {
        self.status = Some(PostStatus::Published.as_str().to_string());
        self.published_channel = Some(Some(chat.to_stored()));
        self.published_message_id = Some(Some(message_id));
        self.published_link = Some(post_link(chat, message_id));
        self
    }
}

/// Criteria for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct PostFilter {
    /// Only posts by this author
    author_id: Option<i64>,
    /// Only posts in this status
    status: Option<PostStatus>,
}

impl PostFilter {
    /// Match every post.
    pub fn all() -> Self {
        Self::default()
    }
}
