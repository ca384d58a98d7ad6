//! CLI command definitions.

use clap::{Parser, Subcommand};
use kingstore_core::PostStatus;
use std::path::PathBuf;

/// Kingstore: channel publishing store for a Telegram bot
#[derive(Parser, Debug)]
#[command(name = "kingstore", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database (`sqlite:///path` or a bare path)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the tables and list them
    Init,

    /// Print the canonical schema
    Schema,

    /// Manage registered channels
    Channel {
        #[command(subcommand)]
        command: ChannelCommand,
    },

    /// Manage posts
    Post {
        #[command(subcommand)]
        command: PostCommand,
    },

    /// Edit the inline keyboard of a post
    Keyboard {
        /// Post id
        post_id: i64,

        #[command(subcommand)]
        command: KeyboardCommand,
    },

    /// Work with t.me post links
    Link {
        #[command(subcommand)]
        command: LinkCommand,
    },

    /// Inspect bot configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Housekeeping for stored callback payloads
    Payloads {
        #[command(subcommand)]
        command: PayloadsCommand,
    },
}

/// Channel subcommands.
#[derive(Subcommand, Debug)]
pub enum ChannelCommand {
    /// Register a channel
    Add {
        /// Chat id (`-100...`) or username
        #[arg(allow_negative_numbers = true)]
        chat_id: String,

        /// Display title
        #[arg(long)]
        title: Option<String>,

        /// Telegram user id of whoever added it
        #[arg(long)]
        added_by: Option<i64>,
    },

    /// List channels, newest first
    List,

    /// Show one channel
    Show {
        /// Chat id or username
        #[arg(allow_negative_numbers = true)]
        chat_id: String,
    },

    /// Remove a channel
    Remove {
        /// Chat id or username
        #[arg(allow_negative_numbers = true)]
        chat_id: String,
    },
}

/// Post subcommands.
#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Create a draft
    New {
        /// Telegram user id of the author
        #[arg(long)]
        author: i64,

        /// Message text or photo caption
        #[arg(long)]
        text: Option<String>,

        /// Telegram file id of a photo
        #[arg(long)]
        photo: Option<String>,

        /// Keyboard as JSON rows, e.g. '[[{"text":"Site","url":"https://example.com"}]]'
        #[arg(long)]
        keyboard: Option<String>,
    },

    /// List posts, most recently updated first
    List {
        /// Only posts by this author
        #[arg(long)]
        author: Option<i64>,

        /// Only posts in this status (draft, published)
        #[arg(long)]
        status: Option<PostStatus>,
    },

    /// Show one post
    Show {
        /// Post id
        id: i64,
    },

    /// Change a post
    Edit {
        /// Post id
        id: i64,

        /// New text
        #[arg(long, conflicts_with = "clear_text")]
        text: Option<String>,

        /// Remove the text
        #[arg(long)]
        clear_text: bool,

        /// New photo file id
        #[arg(long, conflicts_with = "clear_photo")]
        photo: Option<String>,

        /// Remove the photo
        #[arg(long)]
        clear_photo: bool,

        /// New keyboard as JSON rows
        #[arg(long)]
        keyboard: Option<String>,
    },

    /// Record that a draft was published
    Publish {
        /// Post id
        id: i64,

        /// Message id the channel assigned
        #[arg(long)]
        message_id: i32,

        /// Channel the post went to
        #[arg(long, env = "CHANNEL_ID", allow_negative_numbers = true)]
        channel: Option<String>,
    },

    /// Delete a post
    Delete {
        /// Post id
        id: i64,
    },

    /// Render the Telegram inline markup of a post
    Markup {
        /// Post id
        id: i64,
    },
}

/// Keyboard subcommands.
#[derive(Subcommand, Debug)]
pub enum KeyboardCommand {
    /// Show the keyboard
    Show,

    /// Append an empty row
    AddRow,

    /// Add a button
    AddButton {
        /// Button label
        text: String,

        /// Row to append to (a new row when absent or out of range)
        #[arg(long)]
        row: Option<usize>,

        /// Link to open
        #[arg(long)]
        url: Option<String>,

        /// Callback data
        #[arg(long)]
        callback: Option<String>,
    },

    /// Replace a button with a new one
    Edit {
        /// Row index
        row: usize,

        /// Column index
        col: usize,

        /// New label
        text: String,

        /// Link to open
        #[arg(long)]
        url: Option<String>,

        /// Callback data
        #[arg(long)]
        callback: Option<String>,
    },

    /// Delete a button
    Delete {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },

    /// Move a button
    Move {
        /// Source row
        from_row: usize,
        /// Source column
        from_col: usize,
        /// Target row
        to_row: usize,
        /// Target column
        to_col: usize,
    },

    /// Re-flow buttons into rows of N
    Columns {
        /// Buttons per row
        columns: usize,
    },
}

/// Link subcommands.
#[derive(Subcommand, Debug)]
pub enum LinkCommand {
    /// Extract chat and message id from a post link
    Parse {
        /// Link such as https://t.me/channel/42
        url: String,
    },

    /// Build the link for a message
    Build {
        /// Chat id or username
        #[arg(allow_negative_numbers = true)]
        chat: String,

        /// Message id
        message_id: i32,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Load configuration and print it with secrets masked
    Check {
        /// Read a TOML file instead of the environment
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Callback payload subcommands.
#[derive(Subcommand, Debug)]
pub enum PayloadsCommand {
    /// Delete payloads stored more than N seconds ago
    Purge {
        /// Age in seconds
        #[arg(long)]
        older_than: u32,
    },
}
