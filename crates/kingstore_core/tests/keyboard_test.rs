//! Tests for keyboard validation and editing.

use kingstore_core::{Button, Keyboard};
use kingstore_error::KeyboardErrorKind;

fn labels(keyboard: &Keyboard) -> Vec<Vec<String>> {
    keyboard
        .rows()
        .iter()
        .map(|row| row.iter().map(|b| b.text().clone()).collect())
        .collect()
}

#[test]
fn test_validate_accepts_links_and_normalises_telegram_urls() {
    let mut keyboard = Keyboard::from_rows(vec![
        vec![Button::link("A", "https://example.com")],
        vec![Button::link("B", " HTTPS://T.ME/channel/123 ")],
    ]);

    keyboard.validate().unwrap();

    assert_eq!(
        keyboard.rows()[1][0].url().as_deref(),
        Some("https://t.me/channel/123")
    );
}

#[test]
fn test_validate_rejects_button_without_target() {
    let mut keyboard = Keyboard::from_rows(vec![vec![
        Button::callback("ok", "cb"),
        Button::new("empty".to_string(), Some(String::new()), None),
    ]]);

    let err = keyboard.validate().unwrap_err();
    assert_eq!(err.kind, KeyboardErrorKind::MissingTarget { row: 0, col: 1 });
}

#[test]
fn test_validate_rejects_bad_url() {
    let mut keyboard = Keyboard::from_rows(vec![vec![Button::link("ftp", "ftp://example.com")]]);

    let err = keyboard.validate().unwrap_err();
    assert_eq!(err.kind, KeyboardErrorKind::InvalidUrl { row: 0, col: 0 });
}

#[test]
fn test_validate_rejects_long_callback() {
    let mut keyboard = Keyboard::from_rows(vec![vec![Button::callback("x", "a".repeat(65))]]);

    let err = keyboard.validate().unwrap_err();
    assert!(matches!(
        err.kind,
        KeyboardErrorKind::CallbackTooLong { len: 65, max: 64, .. }
    ));
}

#[test]
fn test_validate_counts_callback_bytes_not_chars() {
    // 32 Cyrillic characters are 64 bytes, 33 are 66.
    let mut fits = Keyboard::from_rows(vec![vec![Button::callback("x", "я".repeat(32))]]);
    let mut too_long = Keyboard::from_rows(vec![vec![Button::callback("x", "я".repeat(33))]]);

    assert!(fits.validate().is_ok());
    assert!(too_long.validate().is_err());
}

#[test]
fn test_json_accepts_callback_aliases() {
    let keyboard =
        Keyboard::from_json(r#"[[{"text": "a", "callback": "one"}, {"text": "b", "data": "two"}]]"#)
            .unwrap();

    assert_eq!(keyboard.rows()[0][0].callback_data().as_deref(), Some("one"));
    assert_eq!(keyboard.rows()[0][1].callback_data().as_deref(), Some("two"));
    assert_eq!(
        keyboard.to_json(),
        r#"[[{"text":"a","callback_data":"one"},{"text":"b","callback_data":"two"}]]"#
    );
}

#[test]
fn test_callback_data_next_to_legacy_key_is_accepted() {
    let json = r#"[[{"text":"A","callback_data":"a","callback":"a"},{"text":"B","url":"https://b.com"}]]"#;

    let keyboard = Keyboard::from_json(json).unwrap();
    assert_eq!(keyboard.button_count(), 2);
    assert_eq!(keyboard.rows()[0][0].callback_data().as_deref(), Some("a"));
    assert_eq!(Keyboard::from_stored(Some(json)).button_count(), 2);
}

#[test]
fn test_first_non_empty_callback_key_wins() {
    let keyboard = Keyboard::from_json(
        r#"[[{"text":"A","callback_data":"","callback":"legacy","data":"older"},{"text":"B","callback_data":"new","data":"older"}]]"#,
    )
    .unwrap();

    assert_eq!(keyboard.rows()[0][0].callback_data().as_deref(), Some("legacy"));
    assert_eq!(keyboard.rows()[0][1].callback_data().as_deref(), Some("new"));
}

#[test]
fn test_replace_button() {
    let mut keyboard = Keyboard::from_rows(vec![vec![
        Button::callback("a", "a"),
        Button::callback("b", "b"),
    ]]);

    let old = keyboard.replace_button(0, 1, Button::link("B", "https://b.com"));

    assert_eq!(old, Some(Button::callback("b", "b")));
    assert_eq!(labels(&keyboard), vec![vec!["a", "B"]]);
    assert_eq!(keyboard.rows()[0][1].url().as_deref(), Some("https://b.com"));
    assert_eq!(keyboard.rows()[0][1].callback_data(), &None);

    assert!(keyboard.replace_button(1, 0, Button::callback("x", "x")).is_none());
    assert!(keyboard.replace_button(0, 2, Button::callback("x", "x")).is_none());
    assert_eq!(labels(&keyboard), vec![vec!["a", "B"]]);
}

#[test]
fn test_stored_garbage_loads_as_empty() {
    assert!(Keyboard::from_stored(Some("{not json")).is_empty());
    assert!(Keyboard::from_stored(Some("null")).is_empty());
    assert!(Keyboard::from_stored(None).is_empty());
    assert!(Keyboard::from_json(r#"{"text": "not rows"}"#).is_err());
}

#[test]
fn test_add_delete_move_reformat() {
    let mut keyboard = Keyboard::new();
    keyboard.add_row();
    keyboard.add_button(Some(0), Button::link("Btn1", "https://a.com"));
    keyboard.add_button(Some(0), Button::link("Btn2", "https://b.com"));
    assert_eq!(keyboard.rows()[0].len(), 2);

    keyboard.delete_button(0, 0).unwrap();
    assert_eq!(labels(&keyboard), vec![vec!["Btn2"]]);

    keyboard.add_row();
    keyboard.add_button(Some(1), Button::link("Btn3", "https://c.com"));
    assert!(keyboard.move_button(0, 0, 1, 1));
    // Row 0 emptied and was removed, so the target row shifted up.
    assert_eq!(labels(&keyboard), vec![vec!["Btn3", "Btn2"]]);

    keyboard.reformat_columns(1);
    assert_eq!(labels(&keyboard), vec![vec!["Btn3"], vec!["Btn2"]]);
}

#[test]
fn test_add_button_out_of_range_appends_row() {
    let mut keyboard = Keyboard::new();
    assert_eq!(keyboard.add_button(None, Button::callback("a", "a")), 0);
    assert_eq!(keyboard.add_button(Some(7), Button::callback("b", "b")), 1);
    assert_eq!(labels(&keyboard), vec![vec!["a"], vec!["b"]]);
}

#[test]
fn test_delete_out_of_range_is_noop() {
    let mut keyboard = Keyboard::from_rows(vec![vec![Button::callback("a", "a")]]);
    assert!(keyboard.delete_button(3, 0).is_none());
    assert!(keyboard.delete_button(0, 5).is_none());
    assert_eq!(keyboard.button_count(), 1);
}

#[test]
fn test_move_past_last_row_appends_one_row_and_clamps_column() {
    let mut keyboard = Keyboard::from_rows(vec![vec![
        Button::callback("a", "a"),
        Button::callback("b", "b"),
    ]]);

    assert!(keyboard.move_button(0, 0, 2, 9));
    assert_eq!(labels(&keyboard), vec![vec!["b"], vec!["a"]]);

    assert!(keyboard.move_button(1, 0, 4_000_000_000, 0));
    assert_eq!(labels(&keyboard), vec![vec!["b"], vec!["a"]]);

    assert!(keyboard.move_button(0, 0, usize::MAX, 0));
    assert_eq!(labels(&keyboard), vec![vec!["a"], vec!["b"]]);

    assert!(!keyboard.move_button(5, 0, 0, 0));
    assert!(!keyboard.move_button(0, 3, 0, 0));
}

#[test]
fn test_reformat_zero_columns_means_one() {
    let mut keyboard = Keyboard::from_rows(vec![
        vec![Button::callback("a", "a"), Button::callback("b", "b")],
        vec![Button::callback("c", "c")],
    ]);

    keyboard.reformat_columns(0);
    assert_eq!(labels(&keyboard), vec![vec!["a"], vec!["b"], vec!["c"]]);

    keyboard.reformat_columns(2);
    assert_eq!(labels(&keyboard), vec![vec!["a", "b"], vec!["c"]]);
}

#[test]
fn test_summary_lists_rows() {
    let keyboard = Keyboard::from_rows(vec![vec![
        Button::link("Site", "https://example.com"),
        Button::callback("Like", "like:1"),
    ]]);

    assert_eq!(
        keyboard.summary(),
        "row 0: [Site](https://example.com) | [Like](cb:like:1)"
    );
    assert_eq!(Keyboard::new().summary(), "(empty keyboard)");
}
