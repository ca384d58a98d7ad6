//! Database connection utilities.

use crate::DatabaseResult;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use kingstore_core::database_path;
use kingstore_error::{DatabaseError, DatabaseErrorKind};
use tracing::instrument;

/// Pool of SQLite connections.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const MEMORY_DATABASE: &str = ":memory:";
const MAX_POOL_SIZE: u32 = 10;
const PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

/// Establish a connection to the SQLite database at `database_url`.
///
/// Accepts `sqlite:///path`, `sqlite://path` or a bare path; `:memory:`
/// opens a private in-memory database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
#[instrument(name = "database.establish_connection")]
pub fn establish_connection(database_url: &str) -> DatabaseResult<SqliteConnection> {
    let path = database_path(database_url);

    tracing::debug!(path, "Connecting to SQLite database");
    let mut conn = SqliteConnection::establish(path).map_err(|e| {
        tracing::error!(error = %e, "Failed to establish database connection");
        DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
    })?;
    conn.batch_execute(PRAGMAS)?;
    Ok(conn)
}

/// Establish a connection using the `DATABASE_URL` environment variable.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
#[instrument(name = "database.establish_connection_from_env")]
pub fn establish_connection_from_env() -> DatabaseResult<SqliteConnection> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        tracing::error!("DATABASE_URL environment variable not set");
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;
    establish_connection(&database_url)
}

/// Applies connection pragmas to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(PRAGMAS)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the SQLite database at `database_url`.
///
/// An in-memory database is private to its connection, so its pool holds a
/// single connection that is never recycled.
///
/// # Errors
///
/// Returns an error if pool creation fails.
#[instrument(name = "database.create_pool")]
pub fn create_pool(database_url: &str) -> DatabaseResult<DbPool> {
    let path = database_path(database_url);

    tracing::debug!(path, "Creating SQLite connection pool");
    let manager = ConnectionManager::<SqliteConnection>::new(path);
    let builder = Pool::builder().connection_customizer(Box::new(SqlitePragmas));
    let builder = if path == MEMORY_DATABASE {
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder.max_size(MAX_POOL_SIZE)
    };

    builder.build(manager).map_err(|e| {
        tracing::error!(error = %e, "Failed to create connection pool");
        DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
    })
}
