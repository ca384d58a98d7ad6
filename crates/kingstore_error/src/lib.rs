//! Error types for the Kingstore library.
//!
//! This crate provides the foundation error types used throughout the Kingstore
//! workspace. Every error records the file and line where it was created.

#![warn(missing_docs)]

mod config;
mod database;
mod keyboard;
mod link;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use keyboard::{KeyboardError, KeyboardErrorKind};
pub use link::{LinkError, LinkErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum KingstoreErrorKind {
    /// Database error
    #[display("{}", _0)]
    Database(DatabaseError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// Keyboard validation error
    #[display("{}", _0)]
    Keyboard(KeyboardError),
    /// Link parsing error
    #[display("{}", _0)]
    Link(LinkError),
}

/// Kingstore error with kind discrimination.
#[derive(Debug)]
pub struct KingstoreError(Box<KingstoreErrorKind>);

impl KingstoreError {
    /// Create a new error from a kind.
    pub fn new(kind: KingstoreErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &KingstoreErrorKind {
        &self.0
    }
}

impl std::fmt::Display for KingstoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kingstore Error: {}", self.0)
    }
}

impl std::error::Error for KingstoreError {}

// Generic From implementation for any type that converts to KingstoreErrorKind
impl<T> From<T> for KingstoreError
where
    T: Into<KingstoreErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Kingstore operations.
pub type KingstoreResult<T> = std::result::Result<T, KingstoreError>;
