//! Core data types for the Kingstore channel publishing store.
//!
//! This crate provides the foundation types shared by the storage layer and
//! the command-line tool: post status, chat references, the inline keyboard
//! model with its editing operations, Telegram markup rendering and the
//! helpers for button URLs and `t.me` post links.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chat;
mod config;
mod keyboard;
mod links;
mod markup;
mod observability;
mod post;

pub use chat::ChatRef;
pub use config::{BotConfig, BotConfigBuilder, database_path, mask_secret};
pub use keyboard::{Button, Keyboard, MAX_CALLBACK_BYTES};
pub use links::{parse_post_link, post_link, validate_button_url};
pub use markup::{
    InlineKeyboardButton, InlineKeyboardMarkup, PAYLOAD_PREFIX, PayloadStore, build_inline_markup,
};
pub use observability::init_tracing;
pub use post::PostStatus;
