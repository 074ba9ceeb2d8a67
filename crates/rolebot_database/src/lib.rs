//! PostgreSQL integration for rolebot.
//!
//! This crate provides the schema, migrations and repository implementations
//! that mirror chat platform roles locally.
//!
//! # Features
//!
//! - Diesel-based PostgreSQL repositories with embedded migrations
//! - `external_id` uniqueness enforced by the database
//! - In-memory repositories with the same uniqueness rules for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use rolebot_database::{establish_connection, run_pending_migrations, PgRoleRepository};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = establish_connection("postgres://localhost/rolebot")?;
//! run_pending_migrations(&mut conn)?;
//! let repo = PgRoleRepository::new(conn);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod in_memory_repository;
mod models;
mod role_list_repository;
mod role_repository;

/// Diesel table definitions.
#[allow(missing_docs)]
pub mod schema;

pub use connection::{
    MIGRATIONS, establish_connection, establish_connection_from_env, run_pending_migrations,
};
pub use in_memory_repository::{
    InMemoryRoleListInstance, InMemoryRoleListRepository, InMemoryRoleRepository,
};
pub use models::{NewRoleListRoleRow, NewRoleListRow, NewRoleRow, RoleListRow, RoleRow};
pub use role_list_repository::{PgRoleListInstance, PgRoleListRepository};
pub use role_repository::PgRoleRepository;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, rolebot_error::DatabaseError>;
