//! Rendering keyboards into Telegram inline markup.

use crate::keyboard::{Keyboard, MAX_CALLBACK_BYTES};
use crate::links::validate_button_url;
use kingstore_error::KingstoreResult;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument, warn};

/// Callback data prefix for buttons whose payload lives in the payload store.
pub const PAYLOAD_PREFIX: &str = "kb_payload:";

/// Prefix for buttons that carry neither a url nor callback data.
const FALLBACK_PREFIX: &str = "btn:";

/// Number of label characters kept in fallback callback data.
const FALLBACK_TEXT_CHARS: usize = 20;

/// Storage for callback payloads too large for Telegram.
///
/// Implementations persist the payload and return a short id that fits in
/// callback data after [`PAYLOAD_PREFIX`].
pub trait PayloadStore {
    /// Persist `payload` and return its id.
    fn store_payload(&self, payload: &serde_json::Value) -> KingstoreResult<String>;
}

/// Bot API `InlineKeyboardMarkup` object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    /// Button rows
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Bot API `InlineKeyboardButton` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    /// Label
    pub text: String,
    /// Link to open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Data sent back to the bot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    /// URL button.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            callback_data: None,
        }
    }

    /// Callback button.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: Some(data.into()),
        }
    }
}

/// Render a keyboard into Bot API markup.
///
/// Every button becomes either a URL button or a callback button:
/// - a valid URL wins (invalid URLs are logged and ignored)
/// - callback data up to [`MAX_CALLBACK_BYTES`] is used as-is
/// - longer callback data is saved in `store` and replaced by
///   `kb_payload:<id>`; if saving fails it is truncated instead
/// - a button with neither gets `btn:<label>`
///
/// Rows left without buttons are dropped.
#[instrument(skip_all, fields(rows = keyboard.rows().len()))]
pub fn build_inline_markup(keyboard: &Keyboard, store: &dyn PayloadStore) -> InlineKeyboardMarkup {
    let mut rows = Vec::with_capacity(keyboard.rows().len());

    for row in keyboard.rows() {
        let mut buttons = Vec::with_capacity(row.len());
        for button in row {
            let text = button.text().clone();

            let url = button.url().as_deref().filter(|u| !u.is_empty()).and_then(|raw| {
                let normalized = validate_button_url(raw);
                if normalized.is_none() {
                    warn!(url = raw, "Invalid URL in keyboard button, ignoring url");
                }
                normalized
            });
            if let Some(url) = url {
                buttons.push(InlineKeyboardButton::url(text, url));
                continue;
            }

            match button.callback_data().as_deref().filter(|c| !c.is_empty()) {
                Some(data) if data.len() <= MAX_CALLBACK_BYTES => {
                    buttons.push(InlineKeyboardButton::callback(text, data));
                }
                Some(data) => {
                    let callback = match store.store_payload(&json!({ "callback": data })) {
                        Ok(id) => {
                            debug!(payload_id = %id, bytes = data.len(), "Stored long callback");
                            format!("{}{}", PAYLOAD_PREFIX, id)
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to store long callback payload; truncating");
                            truncate_to_bytes(data, MAX_CALLBACK_BYTES).to_string()
                        }
                    };
                    buttons.push(InlineKeyboardButton::callback(text, callback));
                }
                None => {
                    let label: String = text.chars().take(FALLBACK_TEXT_CHARS).collect();
                    let fallback = format!("{}{}", FALLBACK_PREFIX, label);
                    let fallback = truncate_to_bytes(&fallback, MAX_CALLBACK_BYTES).to_string();
                    buttons.push(InlineKeyboardButton::callback(text, fallback));
                }
            }
        }
        if !buttons.is_empty() {
            rows.push(buttons);
        }
    }

    InlineKeyboardMarkup {
        inline_keyboard: rows,
    }
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary.
fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "ж".repeat(40); // 80 bytes
        let cut = truncate_to_bytes(&s, 63);
        assert_eq!(cut.len(), 62);
        assert_eq!(truncate_to_bytes("short", 64), "short");
    }
}
