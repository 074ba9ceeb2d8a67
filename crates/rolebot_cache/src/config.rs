//! Role cache configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the external-backed role cache.
///
/// # Example
///
/// ```
/// use rolebot_cache::RoleCacheConfig;
/// use std::time::Duration;
///
/// let config = RoleCacheConfig::default().with_external_timeout_ms(250);
/// assert_eq!(config.external_timeout(), Duration::from_millis(250));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct RoleCacheConfig {
    /// Budget for a single external round trip (milliseconds)
    #[serde(default = "default_external_timeout_ms")]
    #[builder(default = "default_external_timeout_ms()")]
    external_timeout_ms: u64,
}

fn default_external_timeout_ms() -> u64 {
    5000
}

impl Default for RoleCacheConfig {
    fn default() -> Self {
        Self {
            external_timeout_ms: default_external_timeout_ms(),
        }
    }
}

impl RoleCacheConfig {
    /// The external round trip budget as a `Duration`.
    pub fn external_timeout(&self) -> Duration {
        Duration::from_millis(self.external_timeout_ms)
    }
}
