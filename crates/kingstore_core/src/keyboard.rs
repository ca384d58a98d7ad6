//! Inline keyboard model and editing operations.
//!
//! A keyboard is a list of rows, each row a list of buttons. It is persisted
//! as JSON in `posts.keyboard_json` and edited in place by the operator
//! before being rendered into Telegram markup.

use crate::links::validate_button_url;
use kingstore_error::{KeyboardError, KeyboardErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Maximum size of Telegram callback data, in UTF-8 bytes.
pub const MAX_CALLBACK_BYTES: usize = 64;

/// A single inline button.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
#[serde(from = "StoredButton")]
pub struct Button {
    /// Label shown to users
    text: String,
    /// Link opened by the button
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// Data sent back to the bot when pressed
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
}

/// Button as found in stored keyboards.
///
/// Older keyboards carry callback data under `callback` or `data`, sometimes
/// next to `callback_data`; the first non-empty one wins.
#[derive(Deserialize)]
struct StoredButton {
    text: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    callback_data: Option<String>,
    #[serde(default)]
    callback: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

impl From<StoredButton> for Button {
    fn from(stored: StoredButton) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        let callback_data = non_empty(stored.callback_data)
            .or_else(|| non_empty(stored.callback))
            .or_else(|| non_empty(stored.data));
        Self::new(stored.text, stored.url, callback_data)
    }
}

impl Button {
    /// Button that opens a link.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text.into(), Some(url.into()), None)
    }

    /// Button that sends callback data.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(text.into(), None, Some(data.into()))
    }

    fn has_url(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }

    fn has_callback(&self) -> bool {
        self.callback_data.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Rows of inline buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Create an empty keyboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keyboard from rows.
    pub fn from_rows(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// The rows of this keyboard.
    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// True when the keyboard has no buttons at all.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Total number of buttons.
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Decode keyboard JSON supplied by an operator.
    pub fn from_json(json: &str) -> Result<Self, KeyboardError> {
        if json.trim().is_empty() || json.trim() == "null" {
            return Ok(Self::new());
        }
        serde_json::from_str(json)
            .map_err(|e| KeyboardError::new(KeyboardErrorKind::Malformed(e.to_string())))
    }

    /// Decode the `keyboard_json` column. Anything unreadable loads as empty.
    pub fn from_stored(json: Option<&str>) -> Self {
        match json {
            None => Self::new(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                warn!(error = %e, "Stored keyboard is unreadable, using empty keyboard");
                Self::new()
            }),
        }
    }

    /// Encode for the `keyboard_json` column.
    pub fn to_json(&self) -> String {
        // Buttons only hold strings, so serialization cannot fail.
        serde_json::to_string(&self.rows).unwrap_or_else(|_| "[]".to_string())
    }

    /// Check every button and normalise valid URLs in place.
    ///
    /// # Errors
    ///
    /// Returns the first offending button:
    /// - neither url nor callback data
    /// - url that is not http(s) or a Telegram message link
    /// - callback data longer than [`MAX_CALLBACK_BYTES`]
    #[instrument(skip(self), fields(rows = self.rows.len()))]
    pub fn validate(&mut self) -> Result<(), KeyboardError> {
        for (row, buttons) in self.rows.iter_mut().enumerate() {
            for (col, button) in buttons.iter_mut().enumerate() {
                let has_url = button.has_url();
                let has_callback = button.has_callback();

                if !has_url && !has_callback {
                    return Err(KeyboardError::new(KeyboardErrorKind::MissingTarget {
                        row,
                        col,
                    }));
                }

                if has_url {
                    let raw = button.url.as_deref().unwrap_or_default();
                    let normalized = validate_button_url(raw).ok_or_else(|| {
                        KeyboardError::new(KeyboardErrorKind::InvalidUrl { row, col })
                    })?;
                    button.url = Some(normalized);
                }

                if has_callback {
                    let len = button.callback_data.as_deref().map_or(0, str::len);
                    if len > MAX_CALLBACK_BYTES {
                        return Err(KeyboardError::new(KeyboardErrorKind::CallbackTooLong {
                            row,
                            col,
                            len,
                            max: MAX_CALLBACK_BYTES,
                        }));
                    }
                }
            }
        }
        debug!(buttons = self.button_count(), "Keyboard valid");
        Ok(())
    }

    /// Append an empty row.
    pub fn add_row(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Append a button to `row`, or to a new row when `row` is absent or out of range.
    ///
    /// Returns the index of the row that received the button.
    pub fn add_button(&mut self, row: Option<usize>, button: Button) -> usize {
        match row {
            Some(index) if index < self.rows.len() => {
                self.rows[index].push(button);
                index
            }
            _ => {
                self.rows.push(vec![button]);
                self.rows.len() - 1
            }
        }
    }

    /// Remove the button at `row`:`col`, dropping the row if it becomes empty.
    ///
    /// Out-of-range coordinates leave the keyboard unchanged.
    pub fn delete_button(&mut self, row: usize, col: usize) -> Option<Button> {
        let buttons = self.rows.get_mut(row)?;
        if col >= buttons.len() {
            return None;
        }
        let removed = buttons.remove(col);
        if buttons.is_empty() {
            self.rows.remove(row);
        }
        Some(removed)
    }

    /// Replace the button at `row`:`col`, returning the old one.
    ///
    /// Out-of-range coordinates leave the keyboard unchanged.
    pub fn replace_button(&mut self, row: usize, col: usize, button: Button) -> Option<Button> {
        let slot = self.rows.get_mut(row)?.get_mut(col)?;
        Some(std::mem::replace(slot, button))
    }

    /// Move a button to `to_row`:`to_col`.
    ///
    /// A `to_row` past the last row moves the button into one new row at the
    /// end, and `to_col` is clamped to the target row. When the source row
    /// empties it is removed, and a target below it shifts up by one. An
    /// invalid source leaves the keyboard unchanged and returns `false`.
    pub fn move_button(
        &mut self,
        from_row: usize,
        from_col: usize,
        mut to_row: usize,
        to_col: usize,
    ) -> bool {
        let Some(buttons) = self.rows.get_mut(from_row) else {
            return false;
        };
        if from_col >= buttons.len() {
            return false;
        }

        let button = buttons.remove(from_col);
        if buttons.is_empty() {
            self.rows.remove(from_row);
            if from_row < to_row {
                to_row -= 1;
            }
        }

        let to_row = to_row.min(self.rows.len());
        if to_row == self.rows.len() {
            self.rows.push(Vec::new());
        }
        let target = &mut self.rows[to_row];
        let to_col = to_col.min(target.len());
        target.insert(to_col, button);
        true
    }

    /// Re-flow all buttons into rows of `columns` buttons (0 is treated as 1).
    pub fn reformat_columns(&mut self, columns: usize) {
        if self.rows.is_empty() {
            return;
        }
        let columns = columns.max(1);
        let flat: Vec<Button> = self.rows.drain(..).flatten().collect();
        self.rows = flat.chunks(columns).map(<[Button]>::to_vec).collect();
    }

    /// Human-readable rendering, one line per row.
    pub fn summary(&self) -> String {
        if self.rows.is_empty() {
            return "(empty keyboard)".to_string();
        }
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let buttons: Vec<String> = row
                    .iter()
                    .map(|b| match (&b.url, &b.callback_data) {
                        (Some(url), _) if !url.is_empty() => format!("[{}]({})", b.text, url),
                        (_, Some(cb)) if !cb.is_empty() => format!("[{}](cb:{})", b.text, cb),
                        _ => format!("[{}]", b.text),
                    })
                    .collect();
                format!("row {}: {}", index, buttons.join(" | "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Vec<Button>>> for Keyboard {
    fn from(rows: Vec<Vec<Button>>) -> Self {
        Self::from_rows(rows)
    }
}
