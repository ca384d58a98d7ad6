//! Short-id storage for callback data that exceeds Telegram's limit.

use crate::{DatabaseResult, DbPool, schema::callback_payloads};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use kingstore_core::PayloadStore;
use kingstore_error::{DatabaseError, KingstoreResult};
use rand::RngCore;
use std::cell::RefCell;
use tracing::{debug, instrument, warn};

const PAYLOAD_ID_BYTES: usize = 6;

fn new_payload_id() -> String {
    let mut bytes = [0u8; PAYLOAD_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Persist a payload and return its id (12 lowercase hex characters).
#[instrument(skip(conn, payload))]
pub fn store_payload(conn: &mut SqliteConnection, payload: &serde_json::Value) -> DatabaseResult<String> {
    let id = new_payload_id();
    let data = serde_json::to_string(payload)?;

    diesel::insert_into(callback_payloads::table)
        .values((
            callback_payloads::id.eq(&id),
            callback_payloads::data.eq(&data),
            callback_payloads::created_at.eq(chrono::Utc::now().timestamp()),
        ))
        .execute(conn)?;

    debug!(payload_id = %id, bytes = data.len(), "Stored callback payload");
    Ok(id)
}

/// Load a payload. Missing ids and undecodable data both yield `None`.
#[instrument(skip(conn))]
pub fn get_payload(conn: &mut SqliteConnection, id: &str) -> DatabaseResult<Option<serde_json::Value>> {
    let data: Option<String> = callback_payloads::table
        .find(id)
        .select(callback_payloads::data)
        .first(conn)
        .optional()?;

    Ok(data.and_then(|data| match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(id, error = %e, "Stored callback payload is not valid JSON");
            None
        }
    }))
}

/// Delete a payload. Returns `true` if a row was deleted.
#[instrument(skip(conn))]
pub fn delete_payload(conn: &mut SqliteConnection, id: &str) -> DatabaseResult<bool> {
    let deleted = diesel::delete(callback_payloads::table.find(id)).execute(conn)?;
    Ok(deleted > 0)
}

/// Delete payloads created before `cutoff` (Unix seconds).
///
/// Returns the number of payloads removed.
#[instrument(skip(conn))]
pub fn purge_payloads_older_than(conn: &mut SqliteConnection, cutoff: i64) -> DatabaseResult<usize> {
    let purged = diesel::delete(callback_payloads::table.filter(callback_payloads::created_at.lt(cutoff)))
        .execute(conn)?;

    debug!(purged, "Purged callback payloads");
    Ok(purged)
}

/// [`PayloadStore`] backed by the `callback_payloads` table.
#[derive(Debug, Clone)]
pub struct SqlitePayloadStore {
    pool: DbPool,
}

impl SqlitePayloadStore {
    /// Create a store over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl PayloadStore for SqlitePayloadStore {
    fn store_payload(&self, payload: &serde_json::Value) -> KingstoreResult<String> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;
        Ok(store_payload(&mut conn, payload)?)
    }
}

/// [`PayloadStore`] over a single borrowed connection.
///
/// Lets code that already holds a connection render markup without a pool.
pub struct ConnectionPayloadStore<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl<'a> ConnectionPayloadStore<'a> {
    /// Create a store over `conn`.
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }
}

impl PayloadStore for ConnectionPayloadStore<'_> {
    fn store_payload(&self, payload: &serde_json::Value) -> KingstoreResult<String> {
        let mut conn = self.conn.borrow_mut();
        Ok(store_payload(&mut conn, payload)?)
    }
}
