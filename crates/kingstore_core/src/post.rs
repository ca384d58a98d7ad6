//! Post lifecycle status.

use kingstore_error::{DatabaseError, DatabaseErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a post.
///
/// Stored in the `posts.status` column as lowercase text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Being edited, not yet sent to a channel
    #[default]
    #[display("draft")]
    Draft,
    /// Sent to a channel
    #[display("published")]
    Published,
}

impl PostStatus {
    /// Column value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl FromStr for PostStatus {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DatabaseError::new(DatabaseErrorKind::Serialization(
                format!("Unknown post status '{}'", other),
            ))),
        }
    }
}
