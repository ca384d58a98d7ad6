//! Chat references.

use kingstore_error::{LinkError, LinkErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reference to a Telegram chat or channel.
///
/// Channels are addressed either by their numeric id (`-1001234567890`) or by
/// their public username. The textual form is what the `chat_id` and
/// `published_channel` columns store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChatRef {
    /// Numeric chat id
    Id(i64),
    /// Public username, always stored with a leading `@`
    Username(String),
}

impl ChatRef {
    /// Build a username reference, adding the `@` prefix when missing.
    pub fn username(name: impl AsRef<str>) -> Result<Self, LinkError> {
        let name = name.as_ref().trim().trim_start_matches('@');
        if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(LinkError::new(LinkErrorKind::InvalidChat(name.to_string())));
        }
        Ok(ChatRef::Username(format!("@{}", name)))
    }

    /// Column value for this reference.
    pub fn to_stored(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ChatRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRef::Id(id) => write!(f, "{}", id),
            ChatRef::Username(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for ChatRef {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(id) => Ok(ChatRef::Id(id)),
            Err(_) => ChatRef::username(trimmed),
        }
    }
}

impl TryFrom<String> for ChatRef {
    type Error = LinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChatRef> for String {
    fn from(chat: ChatRef) -> Self {
        chat.to_stored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_chat_ids() {
        assert_eq!(
            "-1001234567890".parse::<ChatRef>().unwrap(),
            ChatRef::Id(-1001234567890)
        );
    }

    #[test]
    fn test_usernames_are_normalised() {
        let bare: ChatRef = "mychannel".parse().unwrap();
        let prefixed: ChatRef = " @mychannel ".parse().unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(bare.to_stored(), "@mychannel");
    }

    #[test]
    fn test_empty_username_is_rejected() {
        assert!("@".parse::<ChatRef>().is_err());
        assert!("".parse::<ChatRef>().is_err());
        assert!("two words".parse::<ChatRef>().is_err());
    }
}
