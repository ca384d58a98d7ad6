//! Inline keyboard error types.

/// Reasons a keyboard is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum KeyboardErrorKind {
    /// Button has neither a url nor callback data
    #[display("Button at {}:{} must have url or callback_data", row, col)]
    MissingTarget {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },
    /// Button url is not http(s) or a Telegram message link
    #[display("Button at {}:{} has invalid url", row, col)]
    InvalidUrl {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },
    /// Callback data exceeds the Telegram byte limit
    #[display("callback_data at {}:{} too long ({} bytes, max {})", row, col, len, max)]
    CallbackTooLong {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Length in UTF-8 bytes
        len: usize,
        /// Allowed maximum
        max: usize,
    },
    /// Keyboard JSON could not be decoded
    #[display("Malformed keyboard: {}", _0)]
    Malformed(String),
}

/// Keyboard error with location tracking.
///
/// # Examples
///
/// ```
/// use kingstore_error::{KeyboardError, KeyboardErrorKind};
///
/// let err = KeyboardError::new(KeyboardErrorKind::MissingTarget { row: 0, col: 1 });
/// assert!(format!("{}", err).contains("0:1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Keyboard Error: {} at line {} in {}", kind, line, file)]
pub struct KeyboardError {
    /// The kind of error that occurred
    pub kind: KeyboardErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl KeyboardError {
    /// Create a new keyboard error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: KeyboardErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
