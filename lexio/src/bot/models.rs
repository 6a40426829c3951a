//! Bot player models and statistics.

use super::decision::{BotDecisionConfig, Decision, DecisionStrategy, Strategy};
use crate::game::entities::{GameState, PlayerId};
use crate::table::config::BotDifficulty;
use rand::RngCore;

/// Bot player configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Seat identifier ("ai-1", "ai-2", ...)
    pub id: PlayerId,

    /// Bot display name
    pub name: String,

    /// Difficulty preset
    pub difficulty: BotDifficulty,
}

/// Bot statistics tracker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotStats {
    /// Turns the bot was asked to act on
    pub turns: u32,

    /// Turns that ended in a play
    pub plays: u32,

    /// Turns that ended in a pass
    pub passes: u32,

    /// Plays the engine rejected and replaced with a pass
    pub fallbacks: u32,

    /// Cards shed over all plays
    pub cards_played: u32,
}

impl BotStats {
    /// Fraction of turns passed
    pub fn pass_rate(&self) -> f32 {
        if self.turns == 0 {
            0.0
        } else {
            self.passes as f32 / self.turns as f32
        }
    }

    /// Average cards shed per play
    pub fn cards_per_play(&self) -> f32 {
        if self.plays == 0 {
            0.0
        } else {
            self.cards_played as f32 / self.plays as f32
        }
    }
}

/// Bot player state
#[derive(Debug, Clone)]
pub struct BotPlayer {
    pub config: BotConfig,

    /// Chosen once from the difficulty
    pub strategy: Strategy,

    pub stats: BotStats,
}

impl BotPlayer {
    /// Create a new bot player
    pub fn new(config: BotConfig, thresholds: BotDecisionConfig) -> Self {
        let strategy = Strategy::from_difficulty(config.difficulty, thresholds);
        Self {
            config,
            strategy,
            stats: BotStats::default(),
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.config.id
    }

    /// Ask the strategy for this bot's next action
    pub fn decide(&self, state: &GameState, rng: &mut dyn RngCore) -> Decision {
        self.strategy.decide(state, &self.config.id, rng)
    }

    /// Record the outcome of a turn as the engine applied it
    pub fn record_decision(&mut self, decision: &Decision) {
        self.stats.turns += 1;
        match decision {
            Decision::Play { cards, .. } => {
                self.stats.plays += 1;
                self.stats.cards_played += cards.len() as u32;
            }
            Decision::Pass => self.stats.passes += 1,
        }
    }

    /// Record a rejected play that was replaced with a pass
    pub fn record_fallback(&mut self) {
        self.stats.fallbacks += 1;
    }
}
