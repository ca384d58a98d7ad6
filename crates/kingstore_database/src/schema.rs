// Mirrors sql/schema.sql. SQLite stores timestamps as `datetime('now')` text.

diesel::table! {
    callback_payloads (id) {
        id -> Text,
        data -> Text,
        created_at -> BigInt,
    }
}

diesel::table! {
    channels (id) {
        id -> BigInt,
        chat_id -> Text,
        title -> Nullable<Text>,
        added_by -> Nullable<BigInt>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    posts (id) {
        id -> BigInt,
        author_id -> BigInt,
        text -> Nullable<Text>,
        photo_file_id -> Nullable<Text>,
        keyboard_json -> Text,
        status -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        published_message_id -> Nullable<Integer>,
        published_link -> Nullable<Text>,
        published_channel -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(callback_payloads, channels, posts,);
