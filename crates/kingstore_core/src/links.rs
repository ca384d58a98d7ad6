//! Button URL validation and `t.me` post links.

use crate::ChatRef;
use kingstore_error::{LinkError, LinkErrorKind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

static TELEGRAM_MESSAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://t\.me/([^/]+)/(\d+)$").expect("valid telegram url regex")
});

static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:https?)://[^/?#\s]+(?:[/?#]\S*)?$").expect("valid http url regex")
});

static PRIVATE_POST_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://t\.me/c/(\d+)/(\d+)").expect("valid private link regex")
});

static PUBLIC_POST_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://t\.me/([^/\s]+)/(\d+)").expect("valid public link regex")
});

/// Prefix Telegram puts in front of the internal id of channels and supergroups.
const CHANNEL_ID_PREFIX: &str = "-100";

/// Validate a button URL and return its normalised form.
///
/// Telegram message links (`https://t.me/<name>/<id>`) are normalised to
/// lowercase `https://t.me`. Any other URL must use `http` or `https` and
/// name a host; it is returned trimmed but otherwise unchanged.
///
/// # Examples
///
/// ```
/// use kingstore_core::validate_button_url;
///
/// assert_eq!(
///     validate_button_url("HTTP://T.ME/news/42").as_deref(),
///     Some("https://t.me/news/42")
/// );
/// assert!(validate_button_url("ftp://example.com").is_none());
/// ```
pub fn validate_button_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if let Some(caps) = TELEGRAM_MESSAGE_URL.captures(url) {
        return Some(format!("https://t.me/{}/{}", &caps[1], &caps[2]));
    }
    HTTP_URL.is_match(url).then(|| url.to_string())
}

/// Parse a link to a channel post into the chat and message id.
///
/// Accepts `t.me/c/<internal id>/<message>` for private channels, which maps
/// to chat id `-100<internal id>`, and `t.me/<username>/<message>` for public
/// ones.
///
/// # Errors
///
/// Returns an error when the link matches neither form or the ids overflow.
#[instrument]
pub fn parse_post_link(link: &str) -> Result<(ChatRef, i32), LinkError> {
    if let Some(caps) = PRIVATE_POST_LINK.captures(link) {
        let chat_id = format!("{}{}", CHANNEL_ID_PREFIX, &caps[1])
            .parse::<i64>()
            .map_err(|_| LinkError::new(LinkErrorKind::InvalidChat(caps[1].to_string())))?;
        let message_id = parse_message_id(&caps[2])?;
        debug!(chat_id, message_id, "Parsed private post link");
        return Ok((ChatRef::Id(chat_id), message_id));
    }

    if let Some(caps) = PUBLIC_POST_LINK.captures(link) {
        let chat = ChatRef::username(&caps[1])?;
        let message_id = parse_message_id(&caps[2])?;
        debug!(%chat, message_id, "Parsed public post link");
        return Ok((chat, message_id));
    }

    Err(LinkError::new(LinkErrorKind::Unrecognized(link.to_string())))
}

/// Build the public link for a message, if the chat has one.
///
/// Usernames link to `https://t.me/<name>/<id>`; channel ids of the form
/// `-100<internal>` link to `https://t.me/c/<internal>/<id>`. Other numeric
/// chats (private groups, users) have no shareable link.
pub fn post_link(chat: &ChatRef, message_id: i32) -> Option<String> {
    match chat {
        ChatRef::Username(name) => Some(format!(
            "https://t.me/{}/{}",
            name.trim_start_matches('@'),
            message_id
        )),
        ChatRef::Id(id) => {
            let id = id.to_string();
            let internal = id.strip_prefix(CHANNEL_ID_PREFIX)?;
            (!internal.is_empty()).then(|| format!("https://t.me/c/{}/{}", internal, message_id))
        }
    }
}

fn parse_message_id(digits: &str) -> Result<i32, LinkError> {
    digits
        .parse::<i32>()
        .map_err(|_| LinkError::new(LinkErrorKind::InvalidMessageId(digits.to_string())))
}
