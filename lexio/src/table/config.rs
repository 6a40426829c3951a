//! Game and table configuration models.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};
use thiserror::Error;

use crate::game::constants::{
    DEFAULT_MAX_ROUNDS, DEFAULT_PLAYER_COUNT, DEFAULT_THINK_TIME_MAX_MS,
    DEFAULT_THINK_TIME_MIN_MS, MAX_PLAYERS, MIN_PLAYERS,
};

/// Configuration errors
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("player name must not be empty")]
    EmptyPlayerName,

    #[error("player count must be between 2 and 5, got {0}")]
    InvalidPlayerCount(usize),

    #[error("a game needs at least one round")]
    NoRounds,

    #[error("think time range is inverted: {min_ms}ms > {max_ms}ms")]
    InvalidThinkTime { min_ms: u64, max_ms: u64 },

    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidProbability { name: &'static str, value: String },
}

/// Bot difficulty presets
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Easy,   // Random legal plays, passes often
    #[default]
    Medium, // Sheds weak cards and 2s first
    Hard,   // Reads opponents' hand sizes and penalty risk
}

impl std::fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotDifficulty::Easy => write!(f, "easy"),
            BotDifficulty::Medium => write!(f, "medium"),
            BotDifficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for BotDifficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Who leads the first trick of a round
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpeningRule {
    /// The first active seat, starting from the human at seat 0.
    #[default]
    FirstSeat,
    /// Whoever holds the cloud 3, the weakest card in every deck.
    LowestCard,
}

/// Options for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Display name of the human seat
    pub player_name: String,

    /// Total seats, human included (2-5)
    pub player_count: usize,

    /// Difficulty of every computer seat
    pub ai_difficulty: BotDifficulty,

    /// Rounds before the game ends
    pub max_rounds: u32,

    /// Opening seat selection
    #[serde(default)]
    pub opening: OpeningRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            player_count: DEFAULT_PLAYER_COUNT,
            ai_difficulty: BotDifficulty::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            opening: OpeningRule::default(),
        }
    }
}

impl GameConfig {
    pub fn new(
        player_name: &str,
        player_count: usize,
        ai_difficulty: BotDifficulty,
        max_rounds: u32,
    ) -> Self {
        Self {
            player_name: player_name.to_string(),
            player_count,
            ai_difficulty,
            max_rounds,
            opening: OpeningRule::default(),
        }
    }

    pub fn with_opening(mut self, opening: OpeningRule) -> Self {
        self.opening = opening;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_name.trim().is_empty() {
            return Err(ConfigError::EmptyPlayerName);
        }

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::InvalidPlayerCount(self.player_count));
        }

        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }

        Ok(())
    }
}

/// Table runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Shortest simulated thinking time of a computer seat
    pub think_time_min_ms: u64,

    /// Longest simulated thinking time of a computer seat
    pub think_time_max_ms: u64,

    /// Capacity of the table's message inbox
    pub inbox_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            think_time_min_ms: DEFAULT_THINK_TIME_MIN_MS,
            think_time_max_ms: DEFAULT_THINK_TIME_MAX_MS,
            inbox_capacity: 100,
        }
    }
}

impl TableConfig {
    /// Bots act as soon as it is their turn.
    pub fn instant() -> Self {
        Self {
            think_time_min_ms: 0,
            think_time_max_ms: 0,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.think_time_min_ms > self.think_time_max_ms {
            return Err(ConfigError::InvalidThinkTime {
                min_ms: self.think_time_min_ms,
                max_ms: self.think_time_max_ms,
            });
        }
        Ok(())
    }

    /// Random thinking time within the configured range
    pub fn think_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let max = self.think_time_max_ms.max(self.think_time_min_ms);
        Duration::from_millis(rng.random_range(self.think_time_min_ms..=max))
    }
}
