//! Tests for bot configuration loading.

use kingstore_core::{BotConfig, BotConfigBuilder, ChatRef, database_path, mask_secret};
use std::collections::HashMap;
use std::io::Write;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_lookup_trims_values() {
    let config = BotConfig::from_lookup(lookup(&[
        ("BOT_TOKEN", " 123:abc "),
        ("CHANNEL_ID", "@news\n"),
        ("DATABASE_URL", "sqlite:///./bot.sqlite3"),
    ]))
    .unwrap();

    assert_eq!(config.bot_token(), "123:abc");
    assert_eq!(config.channel().unwrap(), ChatRef::Username("@news".to_string()));
    assert_eq!(config.database_path(), "./bot.sqlite3");
}

#[test]
fn test_missing_variable_is_named() {
    let err = BotConfig::from_lookup(lookup(&[
        ("BOT_TOKEN", "123:abc"),
        ("CHANNEL_ID", "   "),
        ("DATABASE_URL", "bot.sqlite3"),
    ]))
    .unwrap_err();

    assert!(err.to_string().contains("CHANNEL_ID is required"));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "bot_token = \"42:secret\"\nchannel_id = \"-1001234567890\"\ndatabase_url = \" bot.sqlite3 \""
    )
    .unwrap();

    let config = BotConfig::from_file(file.path()).unwrap();

    assert_eq!(config.channel().unwrap(), ChatRef::Id(-1001234567890));
    assert_eq!(config.database_url(), "bot.sqlite3");
}

#[test]
fn test_from_file_rejects_blank_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "bot_token = \"\"\nchannel_id = \"@news\"\ndatabase_url = \"bot.sqlite3\""
    )
    .unwrap();

    let err = BotConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("BOT_TOKEN is required"));
}

#[test]
fn test_debug_masks_token() {
    let config = BotConfigBuilder::default()
        .bot_token("123456:very-secret")
        .channel_id("@news")
        .database_url("bot.sqlite3")
        .build()
        .unwrap();

    let rendered = format!("{:?}", config);
    assert!(rendered.contains("123456:***"));
    assert!(!rendered.contains("very-secret"));
    assert_eq!(mask_secret("nocolon"), "***");
}

#[test]
fn test_database_path_prefixes() {
    assert_eq!(database_path("sqlite:///data/bot.db"), "data/bot.db");
    assert_eq!(database_path("sqlite://bot.db"), "bot.db");
    assert_eq!(database_path(":memory:"), ":memory:");
}
