//! Process configuration loaded with the `config` crate.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use rolebot_cache::RoleCacheConfig;
use rolebot_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "ROLE_BOT";

/// Discord application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DiscordSettings {
    /// Application (client) ID
    #[serde(default)]
    client_id: String,
    /// Bot token
    #[serde(default)]
    api_token: String,
    /// Guild the bot manages
    #[serde(default)]
    guild_id: String,
}

impl DiscordSettings {
    /// The bot token, which must be set.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        let token = self.api_token.trim();
        if token.is_empty() {
            return Err(ConfigError::new(format!(
                "discord.api_token is not set (env {}_DISCORD__API_TOKEN)",
                ENV_PREFIX
            )));
        }
        Ok(token)
    }

    /// The guild snowflake, which must be a non-zero integer.
    pub fn require_guild_id(&self) -> Result<u64, ConfigError> {
        self.guild_id
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "discord.guild_id must be a Discord snowflake, got '{}'",
                    self.guild_id
                ))
            })
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    #[serde(default)]
    url: String,
}

impl DatabaseSettings {
    /// The connection URL, falling back to `DATABASE_URL`.
    pub fn require_url(&self) -> Result<String, ConfigError> {
        if !self.url.trim().is_empty() {
            return Ok(self.url.trim().to_string());
        }
        std::env::var("DATABASE_URL").map_err(|_| {
            ConfigError::new(format!(
                "database.url is not set (env {}_DATABASE__URL or DATABASE_URL)",
                ENV_PREFIX
            ))
        })
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    level: String,
    /// Emit JSON lines instead of human readable text
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingSettings {
    /// Override the filter directive.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

/// Top-level rolebot configuration.
///
/// Sources in order of precedence (later sources override earlier):
/// 1. Bundled defaults (`rolebot.toml` shipped with the crate)
/// 2. `~/.config/rolebot/rolebot.toml`
/// 3. `./rolebot.toml`
/// 4. A file passed explicitly (`--config`)
/// 5. `ROLE_BOT_*` environment variables, `__` between nested keys
///
/// Every file is optional except an explicitly passed one.
///
/// # Example
///
/// ```no_run
/// use rolebot::RolebotConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RolebotConfig::load(None)?;
/// println!("timeout: {}ms", config.cache().external_timeout_ms());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RolebotConfig {
    /// Discord application settings
    #[serde(default)]
    discord: DiscordSettings,
    /// Local storage settings
    #[serde(default)]
    database: DatabaseSettings,
    /// Role cache settings
    #[serde(default)]
    cache: RoleCacheConfig,
    /// Log output settings
    #[serde(default)]
    logging: LoggingSettings,
}

const DEFAULT_CONFIG: &str = include_str!("../rolebot.toml");

impl RolebotConfig {
    /// Load configuration from every source, reading the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, None)
    }

    /// Load configuration, taking environment variables from `env` instead of
    /// the process when given.
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/rolebot/rolebot.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("rolebot").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        Self::deserialize_from(builder.build().map_err(|e| {
            ConfigError::new(format!("Failed to build configuration: {}", e))
        })?)
    }

    /// Parse a TOML document layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?;
        Self::deserialize_from(config)
    }

    fn deserialize_from(config: Config) -> Result<Self, ConfigError> {
        config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }

    /// Replace the logging settings.
    pub fn with_logging(mut self, logging: LoggingSettings) -> Self {
        self.logging = logging;
        self
    }
}
