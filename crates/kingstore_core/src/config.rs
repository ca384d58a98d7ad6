//! Bot configuration.

use crate::ChatRef;
use derive_builder::Builder;
use derive_getters::Getters;
use kingstore_error::{ConfigError, KingstoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, instrument};

/// Settings shared by the bot and the operator tool.
///
/// Every field is required and stored trimmed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BotConfig {
    /// Telegram bot token
    bot_token: String,
    /// Default channel posts are published to
    channel_id: String,
    /// SQLite database location (`sqlite:///path` or a bare path)
    database_url: String,
}

impl BotConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("BOT_TOKEN", &self.bot_token),
            ("CHANNEL_ID", &self.channel_id),
            ("DATABASE_URL", &self.database_url),
        ];
        for (name, value) in fields {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                return Err(format!("{} is required", name));
            }
        }
        Ok(())
    }
}

impl BotConfig {
    /// Load configuration from the environment.
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first
    /// when present. Reads `BOT_TOKEN`, `CHANNEL_ID` and `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing or blank variable.
    #[instrument]
    pub fn from_env() -> KingstoreResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) => debug!(error = %e, "No .env file loaded"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> KingstoreResult<Self> {
        let read = |key: &str| -> KingstoreResult<String> {
            let value = lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();
            if value.is_empty() {
                error!(variable = key, "Required variable is not set");
                return Err(ConfigError::new(format!("{} is required", key)).into());
            }
            Ok(value)
        };

        Ok(Self {
            bot_token: read("BOT_TOKEN")?,
            channel_id: read("CHANNEL_ID")?,
            database_url: read("DATABASE_URL")?,
        })
    }

    /// Load configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> KingstoreResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let raw: BotConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        BotConfigBuilder::default()
            .bot_token(raw.bot_token.trim())
            .channel_id(raw.channel_id.trim())
            .database_url(raw.database_url.trim())
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// The default channel as a chat reference.
    pub fn channel(&self) -> KingstoreResult<ChatRef> {
        Ok(self.channel_id.parse()?)
    }

    /// Filesystem path of the SQLite database.
    pub fn database_path(&self) -> &str {
        database_path(&self.database_url)
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &mask_secret(&self.bot_token))
            .field("channel_id", &self.channel_id)
            .field("database_url", &self.database_url)
            .finish()
    }
}

/// Strip a `sqlite://` or `sqlite:///` scheme from a database URL.
///
/// # Examples
///
/// ```
/// use kingstore_core::database_path;
///
/// assert_eq!(database_path("sqlite:///./bot.sqlite3"), "./bot.sqlite3");
/// assert_eq!(database_path("bot.sqlite3"), "bot.sqlite3");
/// ```
pub fn database_path(url: &str) -> &str {
    let url = url.trim();
    url.strip_prefix("sqlite:///")
        .or_else(|| url.strip_prefix("sqlite://"))
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

/// Mask a bot token, keeping only the public bot id before the colon.
pub fn mask_secret(secret: &str) -> String {
    match secret.split_once(':') {
        Some((bot_id, _)) if !bot_id.is_empty() => format!("{}:***", bot_id),
        _ => "***".to_string(),
    }
}
