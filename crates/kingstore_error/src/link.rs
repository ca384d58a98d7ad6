//! Telegram link and chat reference error types.

/// Link parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LinkErrorKind {
    /// Not a t.me/<username>/<id> or t.me/c/<id>/<id> link
    #[display("Unrecognized post link: {}", _0)]
    Unrecognized(String),
    /// Message id does not fit a Telegram message id
    #[display("Invalid message id: {}", _0)]
    InvalidMessageId(String),
    /// Chat reference is empty or malformed
    #[display("Invalid chat reference: {}", _0)]
    InvalidChat(String),
}

/// Link error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Link Error: {} at line {} in {}", kind, line, file)]
pub struct LinkError {
    /// The kind of error that occurred
    pub kind: LinkErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LinkError {
    /// Create a new link error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LinkErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
