//! Lexio game state machine.
//!
//! [`GameEngine`] owns the only mutable [`GameState`] of a game. Commands run
//! to completion one at a time and either commit fully or are rejected
//! without touching the state. Computer seats never act on their own: after
//! a commit that leaves a bot to move, the engine records a
//! [`ScheduledTurn`] tagged with the current epoch and the driver decides
//! when to run it.

use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;
use thiserror::Error;

use super::{
    entities::{Card, Command, Deck, GameState, ParseCardError, Phase, Play, PlayType, Player, PlayerId},
    functional,
};
use crate::{
    bot::{BotDecisionConfig, BotManager, Decision},
    table::config::{BotDifficulty, ConfigError, GameConfig, OpeningRule},
};

/// Upper bound on bot turns run back to back by [`GameEngine::drain_bot_turns`].
pub const MAX_DRAINED_TURNS: usize = 10_000;

/// Reasons a command is rejected. A rejected command never changes state.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ActionError {
    #[error("can't {command} during {phase}")]
    PhaseViolation { command: &'static str, phase: Phase },
    #[error("not {0}'s turn")]
    OutOfTurn(PlayerId),
    #[error("{0} is not in hand")]
    CardNotInHand(Card),
    #[error("{0} was selected twice")]
    DuplicateCard(Card),
    #[error("cards don't form a valid play")]
    InvalidCombination,
    #[error(transparent)]
    InvalidCard(ParseCardError),
    #[error("table expects a {expected}, got a {got}")]
    TypeMismatch { expected: PlayType, got: PlayType },
    #[error("{0} doesn't beat the table")]
    TooWeak(PlayType),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("scheduled turn is stale")]
    StaleTurn,
    #[error("no player `{0}` at the table")]
    UnknownPlayer(PlayerId),
    #[error("no active seat left to act")]
    InternalStateError,
}

/// Handle returned by [`GameEngine::subscribe`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubscriptionId(u64);

/// Observer of committed state changes.
pub type Listener = Box<dyn FnMut(&GameState) + Send>;

/// A bot turn waiting to be run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduledTurn {
    /// Engine epoch when the turn was scheduled
    pub epoch: u64,
    pub seat: usize,
    pub player: PlayerId,
}

pub struct GameEngine {
    state: GameState,
    opening: OpeningRule,
    bots: BotManager,
    rng: StdRng,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
    /// Bumped on every round start and every reset.
    epoch: u64,
    scheduled: Option<ScheduledTurn>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Engine in the initial waiting snapshot, seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Engine whose shuffles and bot draws are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: GameState::default(),
            opening: OpeningRule::default(),
            bots: BotManager::new(BotDecisionConfig::default()),
            rng,
            listeners: BTreeMap::new(),
            next_subscription: 0,
            epoch: 0,
            scheduled: None,
        }
    }

    /// Replace the default bot thresholds. Applies from the next game.
    pub fn set_bot_thresholds(&mut self, thresholds: BotDecisionConfig) -> Result<(), ConfigError> {
        thresholds.validate()?;
        self.bots = BotManager::new(thresholds);
        Ok(())
    }

    /// Seat one human and `player_count - 1` bots and deal the first round.
    pub fn start_game(&mut self, config: &GameConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let players: Vec<Player> = std::iter::once(Player::human(&config.player_name))
            .chain((1..config.player_count).map(Player::bot))
            .collect();
        self.state = GameState {
            players,
            player_count: config.player_count,
            max_rounds: config.max_rounds,
            max_number: functional::max_number(config.player_count),
            ..GameState::default()
        };
        self.opening = config.opening;
        self.bots.seat_bots(&self.state.players, config.ai_difficulty);

        info!(
            "Starting game for {} with {} players ({} bots, {} rounds)",
            config.player_name, config.player_count, config.ai_difficulty, config.max_rounds
        );
        self.start_round();
        Ok(())
    }

    /// Replace the whole state, e.g. to resume a game or set up a scenario.
    /// Computer seats get fresh bots of `difficulty`.
    pub fn load_state(&mut self, state: GameState, difficulty: BotDifficulty) {
        self.state = state;
        self.bots.seat_bots(&self.state.players, difficulty);
        self.epoch += 1;
        self.schedule_bot_turn();
    }

    /// Apply a command on behalf of whoever is to act.
    pub fn handle(&mut self, command: Command) -> Result<(), ActionError> {
        debug!("{} {command}", self.acting_id());
        let result = match (command, self.state.phase) {
            (Command::NewGame, _) => {
                self.new_game();
                Ok(())
            }
            (Command::Play { cards, .. }, Phase::Playing) => self.play(&cards),
            (Command::Pass, Phase::Playing) => self.pass(),
            (Command::NewRound, Phase::RoundEnd) => {
                self.new_round();
                Ok(())
            }
            (command, phase) => Err(ActionError::PhaseViolation {
                command: command.name(),
                phase,
            }),
        };
        if let Err(err) = &result {
            debug!("Rejected: {err}");
        }
        result
    }

    /// Apply a command sent by `player`. Plays and passes are only accepted
    /// from a seated player whose turn it is. `NewRound` and `NewGame` may
    /// come from anyone, also while nobody is seated.
    pub fn handle_for(&mut self, player: &PlayerId, command: Command) -> Result<(), ActionError> {
        let acts_in_turn = matches!(command, Command::Play { .. } | Command::Pass);
        if acts_in_turn && self.state.player(player).is_none() {
            return Err(ActionError::UnknownPlayer(player.clone()));
        }
        if acts_in_turn
            && self.state.phase == Phase::Playing
            && self.state.acting_player().map(|p| &p.id) != Some(player)
        {
            return Err(ActionError::OutOfTurn(player.clone()));
        }
        self.handle(command)
    }

    fn play(&mut self, cards: &[Card]) -> Result<(), ActionError> {
        let seat = self.state.current_player;
        let player = self
            .state
            .players
            .get(seat)
            .ok_or(ActionError::InternalStateError)?;

        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(ActionError::DuplicateCard(*card));
            }
            if !player.holds(card) {
                return Err(ActionError::CardNotInHand(*card));
            }
        }

        let classification = functional::classify(cards).ok_or(ActionError::InvalidCombination)?;
        if let Some(last) = &self.state.last_play {
            if classification.play_type != last.play_type {
                return Err(ActionError::TypeMismatch {
                    expected: last.play_type,
                    got: classification.play_type,
                });
            }
            if !functional::is_legal_against(&classification, Some(last)) {
                return Err(ActionError::TooWeak(classification.play_type));
            }
        }

        let goes_out = player.hand.len() == cards.len();
        let next = if goes_out {
            None
        } else {
            Some(self.next_seat()?)
        };

        let player = &mut self.state.players[seat];
        player.hand.retain(|card| !cards.contains(card));
        let play = Play {
            play_type: classification.play_type,
            cards: cards.to_vec(),
            player: player.id.clone(),
            strength: classification.strength,
        };
        debug!("{} plays {play}", player.name);
        self.state.last_play = Some(play);

        match next {
            Some(next) => {
                self.state.current_player = next;
                self.commit();
            }
            None => self.end_round(),
        }
        Ok(())
    }

    fn pass(&mut self) -> Result<(), ActionError> {
        let next = self.next_seat()?;
        let closes = self
            .state
            .last_play
            .as_ref()
            .is_some_and(|last| last.player == self.state.players[next].id);
        if closes {
            debug!("Trick returns to {}, table opens", self.state.players[next].id);
            self.state.last_play = None;
        }
        self.state.current_player = next;
        self.commit();
        Ok(())
    }

    fn new_round(&mut self) {
        if self.state.round >= self.state.max_rounds {
            self.end_game();
        } else {
            self.state.round += 1;
            self.start_round();
        }
    }

    /// Back to the initial waiting snapshot.
    fn new_game(&mut self) {
        info!("Resetting game");
        self.state = GameState::default();
        self.bots.clear();
        self.scheduled = None;
        self.epoch += 1;
        self.notify();
    }

    fn start_round(&mut self) {
        let mut deck = Deck::new(self.state.player_count);
        deck.shuffle(&mut self.rng);
        let hands = deck.deal(self.state.players.len());
        for (player, hand) in self.state.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        self.state.deck.clear();

        let first_active = self.state.players.iter().position(|p| p.is_active);
        let opener = match self.opening {
            OpeningRule::FirstSeat => first_active,
            OpeningRule::LowestCard => {
                functional::seat_with_lowest_card(&self.state.players).or(first_active)
            }
        };
        self.state.current_player = opener.unwrap_or_default();
        self.state.last_play = None;
        self.state.phase = Phase::Playing;
        self.epoch += 1;

        info!(
            "Round {}/{} dealt, {} opens",
            self.state.round,
            self.state.max_rounds,
            self.acting_id()
        );
        self.commit();
    }

    fn end_round(&mut self) {
        let scores: Vec<i64> = (0..self.state.players.len())
            .map(|seat| functional::round_score(&self.state.players, seat))
            .collect();
        for (player, score) in self.state.players.iter_mut().zip(scores) {
            player.coins += score;
            info!("{} scores {score} ({} coins)", player.name, player.coins);
            if player.is_active && player.coins <= 0 {
                player.is_active = false;
                info!("{} is eliminated", player.name);
            }
        }
        self.scheduled = None;

        if self.state.active_count() <= 1 {
            self.end_game();
        } else {
            self.state.phase = Phase::RoundEnd;
            info!("Round {} over", self.state.round);
            self.notify();
        }
    }

    fn end_game(&mut self) {
        let winner = self
            .state
            .players
            .iter()
            .enumerate()
            .reduce(|best, seat| if seat.1.coins > best.1.coins { seat } else { best })
            .map(|(seat, _)| seat);

        if let Some(seat) = winner {
            let player = &mut self.state.players[seat];
            player.is_winner = true;
            info!("{} wins with {} coins", player.name, player.coins);
            self.state.winner = Some(player.id.clone());
        }
        self.state.phase = Phase::GameEnd;
        self.scheduled = None;
        self.notify();
    }

    fn next_seat(&self) -> Result<usize, ActionError> {
        self.state.next_active_seat().ok_or_else(|| {
            error!("No active seat after seat {}", self.state.current_player);
            ActionError::InternalStateError
        })
    }

    fn acting_id(&self) -> String {
        self.state
            .acting_player()
            .map_or_else(|| "nobody".to_string(), |p| p.id.to_string())
    }

    fn commit(&mut self) {
        self.notify();
        self.schedule_bot_turn();
    }

    fn schedule_bot_turn(&mut self) {
        self.scheduled = match self.state.acting_player() {
            Some(player)
                if self.state.phase == Phase::Playing
                    && player.is_active
                    && self.bots.is_bot(&player.id) =>
            {
                debug!("Scheduling {} (epoch {})", player.id, self.epoch);
                Some(ScheduledTurn {
                    epoch: self.epoch,
                    seat: self.state.current_player,
                    player: player.id.clone(),
                })
            }
            _ => None,
        };
    }

    /// Hand the pending bot turn to the driver.
    pub fn take_scheduled_turn(&mut self) -> Option<ScheduledTurn> {
        self.scheduled.take()
    }

    pub fn scheduled_turn(&self) -> Option<&ScheduledTurn> {
        self.scheduled.as_ref()
    }

    /// Let the bot of a scheduled turn act.
    ///
    /// The turn is discarded when the game moved on since it was scheduled.
    /// A bot play the engine rejects is replaced with a pass.
    pub fn run_scheduled_turn(&mut self, turn: ScheduledTurn) -> Result<Decision, ActionError> {
        let still_due = turn.epoch == self.epoch
            && self.state.phase == Phase::Playing
            && self.state.current_player == turn.seat
            && self.state.acting_player().map(|p| &p.id) == Some(&turn.player);
        if !still_due {
            warn!(
                "Dropping stale turn of {} (epoch {}, now {})",
                turn.player, turn.epoch, self.epoch
            );
            return Err(ActionError::StaleTurn);
        }

        let decision = self
            .bots
            .decide(&turn.player, &self.state, &mut self.rng)
            .unwrap_or(Decision::Pass);
        debug!("{} decides {decision:?}", turn.player);

        let decision = match self.handle(decision.clone().into()) {
            Ok(()) => decision,
            Err(err) => {
                warn!("{} tried an illegal play ({err}), passing", turn.player);
                self.bots
                    .update_bot_stats(&turn.player, |bot| bot.record_fallback());
                self.handle(Command::Pass)?;
                Decision::Pass
            }
        };
        self.bots
            .update_bot_stats(&turn.player, |bot| bot.record_decision(&decision));
        Ok(decision)
    }

    /// Run bot turns immediately until a human must act or the round stops.
    ///
    /// # Returns
    ///
    /// * `usize` - Number of bot turns run
    pub fn drain_bot_turns(&mut self) -> usize {
        let mut turns = 0;
        while turns < MAX_DRAINED_TURNS {
            let Some(turn) = self.take_scheduled_turn() else {
                break;
            };
            if let Err(err) = self.run_scheduled_turn(turn) {
                error!("Bot turn failed: {err}");
                break;
            }
            turns += 1;
        }
        turns
    }

    /// Register a listener called after every committed change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Returns false if the listener was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn notify(&mut self) {
        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.state.player(id)
    }

    /// True while cards are being played.
    pub fn is_active(&self) -> bool {
        self.state.phase == Phase::Playing
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.acting_player()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn bots(&self) -> &BotManager {
        &self.bots
    }
}
