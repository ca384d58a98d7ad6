//! Tests for button URLs and post links.

use kingstore_core::{ChatRef, parse_post_link, post_link, validate_button_url};
use kingstore_error::LinkErrorKind;

#[test]
fn test_validate_http_url() {
    let normalized = validate_button_url("https://example.com/path?q=1").unwrap();
    assert_eq!(normalized, "https://example.com/path?q=1");
}

#[test]
fn test_validate_telegram_url() {
    let normalized = validate_button_url("http://t.me/mychan/123").unwrap();
    assert_eq!(normalized, "https://t.me/mychan/123");
}

#[test]
fn test_invalid_urls() {
    assert!(validate_button_url("ftp://example.com").is_none());
    assert!(validate_button_url("https://").is_none());
    assert!(validate_button_url("example.com").is_none());
    assert!(validate_button_url("   ").is_none());
}

#[test]
fn test_parse_public_link() {
    let (chat, message_id) = parse_post_link("https://t.me/news_channel/42").unwrap();
    assert_eq!(chat, ChatRef::Username("@news_channel".to_string()));
    assert_eq!(message_id, 42);
}

#[test]
fn test_parse_private_link() {
    let (chat, message_id) = parse_post_link("https://t.me/c/1234567890/7").unwrap();
    assert_eq!(chat, ChatRef::Id(-1001234567890));
    assert_eq!(message_id, 7);
}

#[test]
fn test_parse_rejects_other_text() {
    let err = parse_post_link("https://example.com/post/1").unwrap_err();
    assert!(matches!(err.kind, LinkErrorKind::Unrecognized(_)));
}

#[test]
fn test_parse_rejects_overflowing_message_id() {
    let err = parse_post_link("https://t.me/news/99999999999").unwrap_err();
    assert!(matches!(err.kind, LinkErrorKind::InvalidMessageId(_)));
}

#[test]
fn test_post_link_is_inverse_of_parse() {
    for link in ["https://t.me/news_channel/42", "https://t.me/c/1234567890/7"] {
        let (chat, message_id) = parse_post_link(link).unwrap();
        assert_eq!(post_link(&chat, message_id).as_deref(), Some(link));
    }
}

#[test]
fn test_post_link_unavailable_for_plain_ids() {
    assert!(post_link(&ChatRef::Id(123456), 1).is_none());
    assert!(post_link(&ChatRef::Id(-4242), 1).is_none());
}
