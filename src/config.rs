//! Process configuration read once at startup.
//!
//! The bot needs exactly two values: the bot token (required) and the command
//! prefix (optional). [`BotConfig`] is built once in `main` and handed to the
//! router and handlers explicitly; nothing reads the environment after that.

use thiserror::Error;

/// Environment variable holding the bot token.
pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
/// Environment variable holding the command prefix.
pub const PREFIX_VAR: &str = "BOT_PREFIX";
/// Prefix used when [`PREFIX_VAR`] is unset or empty.
pub const DEFAULT_PREFIX: &str = "!";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is not set (or is empty).
    #[error("{0} environment variable is required")]
    MissingEnvVar(&'static str),
}

/// Immutable bot configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    token: String,
    prefix: String,
}

impl BotConfig {
    /// Build a config directly. Used by tests and embedders that do not
    /// configure through the environment.
    pub fn new(token: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            prefix: prefix.into(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary lookup function.
    ///
    /// Empty values count as unset, for the token and the prefix alike.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingEnvVar(TOKEN_VAR))?;

        let prefix = lookup(PREFIX_VAR)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        Ok(Self { token, prefix })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("prefix", &self.prefix)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
