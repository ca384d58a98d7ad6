//! Human and JSON rendering of command results.

use kingstore_database::{ChannelRow, PostRow};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// JSON when `json` is set, text otherwise.
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

pub(crate) fn write_json(out: &mut dyn Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn channel_line(channel: &ChannelRow) -> String {
    let mut line = format!("{}  {}", channel.id(), channel.chat_id());
    if let Some(title) = channel.title() {
        line.push_str(&format!("  \"{}\"", title));
    }
    if let Some(added_by) = channel.added_by() {
        line.push_str(&format!("  added by {}", added_by));
    }
    line.push_str(&format!("  ({})", channel.created_at()));
    line
}

pub(crate) fn write_channel(
    out: &mut dyn Write,
    format: OutputFormat,
    channel: &ChannelRow,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => writeln!(out, "{}", channel_line(channel))?,
        OutputFormat::Json => write_json(out, channel)?,
    }
    Ok(())
}

pub(crate) fn write_channels(
    out: &mut dyn Write,
    format: OutputFormat,
    channels: &[ChannelRow],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human if channels.is_empty() => writeln!(out, "No channels")?,
        OutputFormat::Human => {
            for channel in channels {
                writeln!(out, "{}", channel_line(channel))?;
            }
        }
        OutputFormat::Json => write_json(out, &channels)?,
    }
    Ok(())
}

fn status_label(post: &PostRow) -> String {
    post.status()
        .map(|s| s.to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 40;
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > PREVIEW_CHARS || text.lines().nth(1).is_some() {
        let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}

pub(crate) fn post_line(post: &PostRow) -> String {
    let text = post.text().as_deref().map(preview).unwrap_or_default();
    let photo = if post.photo_file_id().is_some() { " [photo]" } else { "" };
    format!(
        "#{}  [{}]  author {}  {}{}{}",
        post.id(),
        status_label(post),
        post.author_id(),
        post.updated_at(),
        photo,
        if text.is_empty() { String::new() } else { format!("  {}", text) }
    )
}

/// JSON view of a post with its keyboard decoded.
fn post_json(post: &PostRow) -> serde_json::Value {
    json!({
        "id": post.id(),
        "author_id": post.author_id(),
        "status": status_label(post),
        "text": post.text(),
        "photo_file_id": post.photo_file_id(),
        "keyboard": post.keyboard(),
        "created_at": post.created_at(),
        "updated_at": post.updated_at(),
        "published_message_id": post.published_message_id(),
        "published_link": post.published_link(),
        "published_channel": post.published_channel(),
    })
}

pub(crate) fn write_post(
    out: &mut dyn Write,
    format: OutputFormat,
    post: &PostRow,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, &post_json(post));
    }

    writeln!(out, "Post #{} [{}]", post.id(), status_label(post))?;
    writeln!(out, "  author:  {}", post.author_id())?;
    writeln!(out, "  created: {}", post.created_at())?;
    writeln!(out, "  updated: {}", post.updated_at())?;
    if let Some(photo) = post.photo_file_id() {
        writeln!(out, "  photo:   {}", photo)?;
    }
    if let Some(channel) = post.published_channel() {
        let message = post
            .published_message_id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        writeln!(out, "  channel: {} message {}", channel, message)?;
    }
    if let Some(link) = post.published_link() {
        writeln!(out, "  link:    {}", link)?;
    }
    match post.text() {
        Some(text) => {
            writeln!(out, "  text:")?;
            for line in text.lines() {
                writeln!(out, "    {}", line)?;
            }
        }
        None => writeln!(out, "  text:    (none)")?,
    }
    writeln!(out, "  keyboard:")?;
    for line in post.keyboard().summary().lines() {
        writeln!(out, "    {}", line)?;
    }
    Ok(())
}

pub(crate) fn write_posts(
    out: &mut dyn Write,
    format: OutputFormat,
    posts: &[PostRow],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human if posts.is_empty() => writeln!(out, "No posts")?,
        OutputFormat::Human => {
            for post in posts {
                writeln!(out, "{}", post_line(post))?;
            }
        }
        OutputFormat::Json => {
            let posts: Vec<serde_json::Value> = posts.iter().map(post_json).collect();
            write_json(out, &posts)?;
        }
    }
    Ok(())
}
