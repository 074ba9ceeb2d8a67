//! rolebot - self-assignable Discord role lists
//!
//! rolebot mirrors Discord guild roles into PostgreSQL and groups them into
//! role lists users can pick from. Discord is the only party that issues
//! role IDs; local storage is a cache-aside mirror of it.
//!
//! # Cargo Features
//!
//! - `discord` (default) - Serenity client, event handler and role source
//!
//! # Architecture
//!
//! rolebot is organized as a workspace with focused crates:
//!
//! - `rolebot_error` - Error types
//! - `rolebot_core` - Core data types (Role, RoleList, ...)
//! - `rolebot_interface` - Repository and external source traits
//! - `rolebot_database` - PostgreSQL and in-memory repositories
//! - `rolebot_cache` - External-backed role cache
//! - `rolebot_social` - Option decoding, command routing, Discord boundary
//!
//! This crate (`rolebot`) re-exports everything for convenience and adds
//! configuration and logging setup for the binary.

mod observability;
mod settings;

pub use settings::{DatabaseSettings, DiscordSettings, ENV_PREFIX, LoggingSettings, RolebotConfig};
pub use observability::init_logging;

// Re-export workspace crates
pub use rolebot_cache::*;
pub use rolebot_core::*;
pub use rolebot_database::*;
pub use rolebot_error::*;
pub use rolebot_interface::*;
pub use rolebot_social::*;
