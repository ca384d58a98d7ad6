//! Tests for rendering keyboards into Telegram markup.

use kingstore_core::{
    Button, InlineKeyboardButton, Keyboard, PAYLOAD_PREFIX, PayloadStore, build_inline_markup,
};
use kingstore_error::{ConfigError, KingstoreResult};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingStore {
    payloads: RefCell<Vec<serde_json::Value>>,
}

impl PayloadStore for RecordingStore {
    fn store_payload(&self, payload: &serde_json::Value) -> KingstoreResult<String> {
        let mut payloads = self.payloads.borrow_mut();
        payloads.push(payload.clone());
        Ok(format!("{:012x}", payloads.len()))
    }
}

struct FailingStore;

impl PayloadStore for FailingStore {
    fn store_payload(&self, _payload: &serde_json::Value) -> KingstoreResult<String> {
        Err(ConfigError::new("store offline").into())
    }
}

#[test]
fn test_url_and_short_callback_buttons() {
    let keyboard = Keyboard::from_rows(vec![
        vec![Button::link("A", "https://example.com")],
        vec![Button::callback("B", "like:1")],
    ]);
    let store = RecordingStore::default();

    let markup = build_inline_markup(&keyboard, &store);

    assert_eq!(
        markup.inline_keyboard,
        vec![
            vec![InlineKeyboardButton::url("A", "https://example.com")],
            vec![InlineKeyboardButton::callback("B", "like:1")],
        ]
    );
    assert!(store.payloads.borrow().is_empty());
}

#[test]
fn test_long_callback_goes_to_store() {
    let long = "x".repeat(100);
    let keyboard = Keyboard::from_rows(vec![vec![Button::callback("Long", long.clone())]]);
    let store = RecordingStore::default();

    let markup = build_inline_markup(&keyboard, &store);

    let data = markup.inline_keyboard[0][0].callback_data.clone().unwrap();
    assert_eq!(data, format!("{}000000000001", PAYLOAD_PREFIX));
    assert!(data.len() <= 64);
    assert_eq!(
        store.payloads.borrow()[0],
        serde_json::json!({ "callback": long })
    );
}

#[test]
fn test_long_callback_truncated_when_store_fails() {
    let keyboard = Keyboard::from_rows(vec![vec![Button::callback("Long", "y".repeat(100))]]);

    let markup = build_inline_markup(&keyboard, &FailingStore);

    assert_eq!(
        markup.inline_keyboard[0][0].callback_data.as_deref(),
        Some("y".repeat(64).as_str())
    );
}

#[test]
fn test_invalid_url_falls_back_to_callback_or_label() {
    let keyboard = Keyboard::from_rows(vec![vec![
        Button::new(
            "Both".to_string(),
            Some("not a url".to_string()),
            Some("cb".to_string()),
        ),
        Button::link("A very long button label indeed", "mailto:me@example.com"),
    ]]);

    let markup = build_inline_markup(&keyboard, &RecordingStore::default());

    let row = &markup.inline_keyboard[0];
    assert_eq!(row[0], InlineKeyboardButton::callback("Both", "cb"));
    assert_eq!(row[1].callback_data.as_deref(), Some("btn:A very long button l"));
    assert!(row[1].url.is_none());
}

#[test]
fn test_empty_rows_are_dropped_and_json_matches_bot_api() {
    let keyboard = Keyboard::from_rows(vec![vec![], vec![Button::link("Go", "https://t.me/a/1")]]);

    let markup = build_inline_markup(&keyboard, &RecordingStore::default());

    assert_eq!(
        serde_json::to_string(&markup).unwrap(),
        r#"{"inline_keyboard":[[{"text":"Go","url":"https://t.me/a/1"}]]}"#
    );
}
