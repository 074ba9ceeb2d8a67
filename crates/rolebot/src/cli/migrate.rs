//! Database migration command.

use rolebot::{RolebotConfig, establish_connection, run_pending_migrations};
use tracing::info;

/// Apply every pending migration.
pub fn migrate(config: &RolebotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let url = config.database().require_url()?;
    let mut conn = establish_connection(&url)?;

    let applied = run_pending_migrations(&mut conn)?;
    if applied.is_empty() {
        info!("Database is up to date");
    }
    for version in applied {
        info!(%version, "Applied migration");
    }
    Ok(())
}
