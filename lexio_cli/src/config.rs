//! Client configuration management.
//!
//! Consolidates all environment variable reads. Command line flags take
//! precedence over the environment, which takes precedence over defaults.

use lexio::{BotDifficulty, ConfigError, GameConfig, TableConfig};
use std::str::FromStr;

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub player_name: Option<String>,
    pub player_count: Option<usize>,
    pub difficulty: Option<BotDifficulty>,
    pub max_rounds: Option<u32>,
    pub think_min_ms: Option<u64>,
    pub think_max_ms: Option<u64>,
}

/// Complete client configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub game: GameConfig,
    pub table: TableConfig,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed, or if the
    /// resulting configuration is invalid
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |var| std::env::var(var).ok())
    }

    /// Same as [`CliConfig::from_env`] with a custom variable source
    pub fn from_lookup(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = GameConfig::default();
        let table_defaults = TableConfig::default();

        let game = GameConfig {
            player_name: match overrides.player_name {
                Some(name) => name,
                None => lookup("LEXIO_PLAYER_NAME").unwrap_or(defaults.player_name),
            },
            player_count: pick(overrides.player_count, &lookup, "LEXIO_PLAYERS", defaults.player_count)?,
            ai_difficulty: pick(
                overrides.difficulty,
                &lookup,
                "LEXIO_DIFFICULTY",
                defaults.ai_difficulty,
            )?,
            max_rounds: pick(overrides.max_rounds, &lookup, "LEXIO_ROUNDS", defaults.max_rounds)?,
            opening: defaults.opening,
        };

        let table = TableConfig {
            think_time_min_ms: pick(
                overrides.think_min_ms,
                &lookup,
                "LEXIO_THINK_MIN_MS",
                table_defaults.think_time_min_ms,
            )?,
            think_time_max_ms: pick(
                overrides.think_max_ms,
                &lookup,
                "LEXIO_THINK_MAX_MS",
                table_defaults.think_time_max_ms,
            )?,
            ..table_defaults
        };

        let config = Self { game, table };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.table.validate()
    }
}

/// Flag value, else parsed environment variable, else the default
fn pick<T: FromStr>(
    flag: Option<T>,
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    if let Some(value) = flag {
        return Ok(value);
    }
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}
