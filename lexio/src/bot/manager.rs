//! Bot manager for the computer seats of one table.

use super::decision::{BotDecisionConfig, Decision};
use super::models::{BotConfig, BotPlayer};
use crate::game::entities::{GameState, Player, PlayerId};
use crate::table::config::BotDifficulty;
use rand::RngCore;
use std::collections::HashMap;

/// Bot manager for a single table
#[derive(Debug, Clone, Default)]
pub struct BotManager {
    /// Thresholds handed to every seated bot
    thresholds: BotDecisionConfig,

    /// Seated bots (player id -> BotPlayer)
    bots: HashMap<PlayerId, BotPlayer>,
}

impl BotManager {
    pub fn new(thresholds: BotDecisionConfig) -> Self {
        Self {
            thresholds,
            bots: HashMap::new(),
        }
    }

    /// Seat a bot for every computer player at the table
    ///
    /// Replaces whatever bots were seated before.
    ///
    /// # Returns
    ///
    /// * `usize` - Number of bots seated
    pub fn seat_bots(&mut self, players: &[Player], difficulty: BotDifficulty) -> usize {
        self.bots.clear();
        for player in players.iter().filter(|p| p.is_ai) {
            let config = BotConfig {
                id: player.id.clone(),
                name: player.name.clone(),
                difficulty,
            };
            self.bots
                .insert(player.id.clone(), BotPlayer::new(config, self.thresholds.clone()));
            log::debug!("Seated bot {} ({})", player.id, difficulty);
        }
        self.bots.len()
    }

    /// Remove all bots
    pub fn clear(&mut self) {
        self.bots.clear();
    }

    pub fn get_bot(&self, id: &PlayerId) -> Option<&BotPlayer> {
        self.bots.get(id)
    }

    pub fn is_bot(&self, id: &PlayerId) -> bool {
        self.bots.contains_key(id)
    }

    /// Get current bot count
    pub fn bot_count(&self) -> usize {
        self.bots.len()
    }

    /// Ask the bot seated as `id` for its next action
    ///
    /// # Returns
    ///
    /// * `Option<Decision>` - `None` if no bot sits at that id
    pub fn decide(
        &self,
        id: &PlayerId,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Option<Decision> {
        self.bots.get(id).map(|bot| bot.decide(state, rng))
    }

    /// Update bot statistics
    pub fn update_bot_stats<F>(&mut self, id: &PlayerId, updater: F) -> bool
    where
        F: FnOnce(&mut BotPlayer),
    {
        match self.bots.get_mut(id) {
            Some(bot) => {
                updater(bot);
                true
            }
            None => false,
        }
    }
}
