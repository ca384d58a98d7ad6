//! Tests for callback payload storage.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use kingstore_core::{Button, Keyboard, PAYLOAD_PREFIX, build_inline_markup};
use kingstore_database::{
    ConnectionPayloadStore, SqlitePayloadStore, apply_schema, create_pool, delete_payload,
    establish_connection, get_payload, purge_payloads_older_than, schema::callback_payloads,
    store_payload,
};
use serde_json::json;

fn setup() -> SqliteConnection {
    let mut conn = establish_connection(":memory:").expect("in-memory database");
    apply_schema(&mut conn).expect("schema");
    conn
}

#[test]
fn test_store_and_get_payload() {
    let mut conn = setup();
    let payload = json!({ "callback": "x".repeat(100) });

    let id = store_payload(&mut conn, &payload).unwrap();

    assert_eq!(id.len(), 12);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(get_payload(&mut conn, &id).unwrap(), Some(payload));
}

#[test]
fn test_ids_are_unique() {
    let mut conn = setup();
    let first = store_payload(&mut conn, &json!(1)).unwrap();
    let second = store_payload(&mut conn, &json!(1)).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_missing_payload() {
    let mut conn = setup();
    assert_eq!(get_payload(&mut conn, "000000000000").unwrap(), None);
}

#[test]
fn test_undecodable_payload_is_none() {
    let mut conn = setup();
    diesel::insert_into(callback_payloads::table)
        .values((
            callback_payloads::id.eq("abcdefabcdef"),
            callback_payloads::data.eq("{broken"),
            callback_payloads::created_at.eq(0i64),
        ))
        .execute(&mut conn)
        .unwrap();

    assert_eq!(get_payload(&mut conn, "abcdefabcdef").unwrap(), None);
}

#[test]
fn test_delete_payload() {
    let mut conn = setup();
    let id = store_payload(&mut conn, &json!({ "callback": "a" })).unwrap();

    assert!(delete_payload(&mut conn, &id).unwrap());
    assert!(!delete_payload(&mut conn, &id).unwrap());
    assert_eq!(get_payload(&mut conn, &id).unwrap(), None);
}

#[test]
fn test_purge_old_payloads() {
    let mut conn = setup();
    diesel::insert_into(callback_payloads::table)
        .values((
            callback_payloads::id.eq("000000000001"),
            callback_payloads::data.eq("{}"),
            callback_payloads::created_at.eq(1_000i64),
        ))
        .execute(&mut conn)
        .unwrap();
    let fresh = store_payload(&mut conn, &json!({})).unwrap();

    assert_eq!(purge_payloads_older_than(&mut conn, 2_000).unwrap(), 1);
    assert_eq!(get_payload(&mut conn, "000000000001").unwrap(), None);
    assert!(get_payload(&mut conn, &fresh).unwrap().is_some());
}

#[test]
fn test_markup_stores_long_callbacks_in_database() {
    let pool = create_pool(":memory:").unwrap();
    {
        let mut conn = pool.get().unwrap();
        apply_schema(&mut conn).unwrap();
    }
    let store = SqlitePayloadStore::new(pool.clone());
    let long = "order:".repeat(20);
    let keyboard = Keyboard::from_rows(vec![vec![Button::callback("Buy", long.clone())]]);

    let markup = build_inline_markup(&keyboard, &store);

    let data = markup.inline_keyboard[0][0]
        .callback_data
        .clone()
        .unwrap();
    let id = data.strip_prefix(PAYLOAD_PREFIX).unwrap();
    let mut conn = pool.get().unwrap();
    assert_eq!(
        get_payload(&mut conn, id).unwrap(),
        Some(json!({ "callback": long }))
    );
}

#[test]
fn test_markup_truncates_when_schema_is_missing() {
    let pool = create_pool(":memory:").unwrap();
    let store = SqlitePayloadStore::new(pool);
    let long = "x".repeat(80);
    let keyboard = Keyboard::from_rows(vec![vec![Button::callback("Buy", long)]]);

    let markup = build_inline_markup(&keyboard, &store);

    assert_eq!(
        markup.inline_keyboard[0][0].callback_data.as_deref(),
        Some("x".repeat(64).as_str())
    );
}

#[test]
fn test_markup_with_borrowed_connection() {
    let mut conn = setup();
    let long = "promo:".repeat(15);
    let keyboard = Keyboard::from_rows(vec![
        vec![Button::callback("Short", "ok")],
        vec![Button::callback("Long", long.clone())],
    ]);

    let markup = {
        let store = ConnectionPayloadStore::new(&mut conn);
        build_inline_markup(&keyboard, &store)
    };

    assert_eq!(markup.inline_keyboard[0][0].callback_data.as_deref(), Some("ok"));
    let data = markup.inline_keyboard[1][0].callback_data.clone().unwrap();
    let id = data.strip_prefix(PAYLOAD_PREFIX).unwrap();
    assert_eq!(
        get_payload(&mut conn, id).unwrap(),
        Some(json!({ "callback": long }))
    );
}
