//! External-backed role cache for rolebot.
//!
//! [`ExternalRoleCache`] presents `create` and `get_by_external_id` backed
//! first by local storage and falling back to the chat platform, which is the
//! only party allowed to issue role IDs.
//!
//! # Example
//!
//! ```rust,ignore
//! use rolebot_cache::{ExternalRoleCache, RoleCacheConfig};
//! use std::sync::Arc;
//!
//! let cache = ExternalRoleCache::new(repository, source, RoleCacheConfig::default());
//! let role = cache.get_by_external_id("871234").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod role_cache;

pub use config::{RoleCacheConfig, RoleCacheConfigBuilder};
pub use role_cache::ExternalRoleCache;
