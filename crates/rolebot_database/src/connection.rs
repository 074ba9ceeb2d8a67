//! Database connection and migration utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rolebot_error::{DatabaseError, DatabaseErrorKind};
use tracing::{info, instrument};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Establish a connection to the PostgreSQL database at `database_url`.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened.
#[instrument(skip(database_url))]
pub fn establish_connection(database_url: &str) -> DatabaseResult<PgConnection> {
    PgConnection::establish(database_url).map_err(DatabaseError::from)
}

/// Establish a connection using the `DATABASE_URL` environment variable.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection_from_env() -> DatabaseResult<PgConnection> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;

    establish_connection(&database_url)
}

/// Apply every pending migration and return the versions that ran.
#[instrument(skip(conn))]
pub fn run_pending_migrations(conn: &mut PgConnection) -> DatabaseResult<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?
        .iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = applied.len(), "Applied pending migrations");
    Ok(applied)
}
