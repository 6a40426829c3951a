//! Bot decision-making logic with difficulty-based behavior.
//!
//! Every tier works from the same list of legal candidates: all singles,
//! pairs and triples in the hand plus every five-card combination that
//! classifies, filtered against the play on the table. The tiers only
//! differ in when they pass and which candidate they pick.

use enum_dispatch::enum_dispatch;
use rand::{Rng, RngCore, seq::IndexedRandom};

use crate::game::{
    constants::FIVE_CARD_PLAY,
    entities::{Card, Command, GameState, Play, Player, PlayerId, PlayType},
    functional,
};
use crate::table::config::{BotDifficulty, ConfigError};

/// Configuration for bot decision-making thresholds.
///
/// All probabilities are in range [0.0, 1.0].
///
/// # Examples
///
/// ```
/// use lexio::bot::decision::BotDecisionConfig;
///
/// let config = BotDecisionConfig::default();
/// assert_eq!(config.easy_pass_probability, 0.3);
/// assert_eq!(config.medium_pass_probability, 0.2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BotDecisionConfig {
    /// Chance an easy bot passes even with legal plays available.
    pub easy_pass_probability: f64,

    /// Chance a medium bot passes in the normal case.
    pub medium_pass_probability: f64,

    /// Chance a medium bot passes while holding many 2s or few cards.
    pub medium_pressured_pass_probability: f64,

    /// Number of 2s that makes a bot want to shed them.
    ///
    /// **Effect**: holding this many 2s doubles the penalty at least twice
    pub aggressive_two_count: usize,

    /// Hand size at or below which a medium bot considers itself in the
    /// endgame.
    pub medium_endgame_hand_size: usize,

    /// Hand size at or below which a hard bot considers itself in the
    /// endgame.
    pub hard_endgame_hand_size: usize,

    /// Opponent hand size at or below which a hard bot considers the round
    /// nearly over.
    pub hard_endgame_opponent_hand_size: usize,

    /// Opponent hand size at or below which a hard bot holds back.
    pub hard_conservative_opponent_hand_size: usize,

    /// Own hand size above which a hard bot holds back.
    pub hard_conservative_hand_size: usize,

    /// A hard bot sheds 2s when their penalty exceeds hand size times this.
    pub hard_penalty_risk_factor: i64,
}

impl Default for BotDecisionConfig {
    fn default() -> Self {
        Self {
            easy_pass_probability: 0.3,
            medium_pass_probability: 0.2,
            medium_pressured_pass_probability: 0.1,
            aggressive_two_count: 2,
            medium_endgame_hand_size: 5,
            hard_endgame_hand_size: 4,
            hard_endgame_opponent_hand_size: 2,
            hard_conservative_opponent_hand_size: 3,
            hard_conservative_hand_size: 5,
            hard_penalty_risk_factor: 3,
        }
    }
}

impl BotDecisionConfig {
    /// Validate configuration
    ///
    /// Every pass probability must lie in [0.0, 1.0].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("easy_pass_probability", self.easy_pass_probability),
            ("medium_pass_probability", self.medium_pass_probability),
            (
                "medium_pressured_pass_probability",
                self.medium_pressured_pass_probability,
            ),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability {
                    name,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// What a bot chose to do.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Play { cards: Vec<Card>, play_type: PlayType },
    Pass,
}

impl Decision {
    fn play(candidate: &Play) -> Self {
        Self::Play {
            cards: candidate.cards.clone(),
            play_type: candidate.play_type,
        }
    }
}

impl From<Decision> for Command {
    fn from(value: Decision) -> Self {
        match value {
            Decision::Play { cards, play_type } => Command::Play { cards, play_type },
            Decision::Pass => Command::Pass,
        }
    }
}

/// Context for bot decision making
///
/// Resolves the acting player and its legal candidates once so each tier
/// only has to choose.
#[derive(Debug, Clone)]
pub struct BotDecisionContext<'a> {
    pub state: &'a GameState,
    pub player: &'a Player,
    pub candidates: Vec<Play>,
}

impl<'a> BotDecisionContext<'a> {
    /// Returns `None` when the player is not seated in `state`.
    pub fn new(state: &'a GameState, player_id: &PlayerId) -> Option<Self> {
        let player = state.player(player_id)?;
        let candidates = legal_plays(&player.hand, state.last_play.as_ref(), player_id);
        Some(Self {
            state,
            player,
            candidates,
        })
    }

    pub fn twos_held(&self) -> usize {
        self.player.twos().count()
    }

    /// Smallest hand among the other active seats, if there are any.
    pub fn min_opponent_hand(&self) -> Option<usize> {
        self.state
            .players
            .iter()
            .filter(|p| p.id != self.player.id && p.is_active)
            .map(|p| p.hand.len())
            .min()
    }

    fn weakest(&self) -> Option<&Play> {
        weakest(self.candidates.iter())
    }

    fn weakest_with_two(&self) -> Option<&Play> {
        weakest(self.candidates.iter().filter(|play| play.contains_two()))
    }

    /// First candidate among those shedding the most cards.
    fn largest(&self) -> Option<&Play> {
        self.candidates
            .iter()
            .reduce(|best, play| if play.cards.len() > best.cards.len() { play } else { best })
    }
}

/// First candidate with the lowest strength.
fn weakest<'p>(plays: impl Iterator<Item = &'p Play>) -> Option<&'p Play> {
    plays.min_by_key(|play| play.strength)
}

/// Every legal play in `hand` given what is on the table.
pub fn legal_plays(hand: &[Card], last_play: Option<&Play>, player: &PlayerId) -> Vec<Play> {
    candidate_sets(hand)
        .into_iter()
        .filter_map(|cards| {
            let classification = functional::classify(&cards)?;
            functional::is_legal_against(&classification, last_play).then(|| Play {
                play_type: classification.play_type,
                cards,
                player: player.clone(),
                strength: classification.strength,
            })
        })
        .collect()
}

/// Singles, same-number pairs and triples, then every classifiable
/// five-card subset.
fn candidate_sets(hand: &[Card]) -> Vec<Vec<Card>> {
    let mut sets: Vec<Vec<Card>> = hand.iter().map(|&card| vec![card]).collect();

    for (i, a) in hand.iter().enumerate() {
        for (j, b) in hand.iter().enumerate().skip(i + 1) {
            if a.0 != b.0 {
                continue;
            }
            sets.push(vec![*a, *b]);
            for c in hand.iter().skip(j + 1) {
                if c.0 == a.0 {
                    sets.push(vec![*a, *b, *c]);
                }
            }
        }
    }

    sets.extend(
        combinations(hand.len(), FIVE_CARD_PLAY)
            .into_iter()
            .map(|indices| indices.into_iter().map(|i| hand[i]).collect::<Vec<_>>())
            .filter(|cards| {
                functional::classify(cards).is_some_and(|c| c.play_type.is_five_card())
            }),
    );

    sets
}

/// All `k`-element index subsets of `0..n` in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k == 0 || k > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.clone());

        // Rightmost index that can still move right
        let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            return result;
        };
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

/// A difficulty tier's policy.
#[enum_dispatch]
pub trait DecisionStrategy {
    /// Picks an action for `player`. Never fails: an unknown player or a
    /// hand with no legal play yields [`Decision::Pass`].
    fn decide(&self, state: &GameState, player: &PlayerId, rng: &mut dyn RngCore) -> Decision;
}

/// Passes often, otherwise plays a uniformly random legal candidate.
#[derive(Debug, Clone, Default)]
pub struct EasyStrategy {
    pub config: BotDecisionConfig,
}

impl DecisionStrategy for EasyStrategy {
    fn decide(&self, state: &GameState, player: &PlayerId, rng: &mut dyn RngCore) -> Decision {
        let Some(ctx) = BotDecisionContext::new(state, player) else {
            return Decision::Pass;
        };
        if ctx.candidates.is_empty() || rng.random_bool(self.config.easy_pass_probability) {
            return Decision::Pass;
        }
        ctx.candidates
            .choose(rng)
            .map_or(Decision::Pass, Decision::play)
    }
}

/// Sheds 2s and weak cards first.
#[derive(Debug, Clone, Default)]
pub struct MediumStrategy {
    pub config: BotDecisionConfig,
}

impl DecisionStrategy for MediumStrategy {
    fn decide(&self, state: &GameState, player: &PlayerId, rng: &mut dyn RngCore) -> Decision {
        let Some(ctx) = BotDecisionContext::new(state, player) else {
            return Decision::Pass;
        };
        if ctx.candidates.is_empty() {
            return Decision::Pass;
        }

        let aggressive = ctx.twos_held() >= self.config.aggressive_two_count;
        let endgame = ctx.player.hand.len() <= self.config.medium_endgame_hand_size;
        let pass_probability = if aggressive || endgame {
            self.config.medium_pressured_pass_probability
        } else {
            self.config.medium_pass_probability
        };
        if rng.random_bool(pass_probability) {
            return Decision::Pass;
        }

        ctx.weakest_with_two()
            .or_else(|| ctx.weakest())
            .map_or(Decision::Pass, Decision::play)
    }
}

/// Reads the table: holds back while opponents are close to going out,
/// dumps 2s when their penalty gets heavy and empties the hand fast in the
/// endgame.
#[derive(Debug, Clone, Default)]
pub struct HardStrategy {
    pub config: BotDecisionConfig,
}

/// What a hard bot concluded about the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableReading {
    pub min_opponent_hand: usize,
    pub penalty_risk: i64,
    pub conservative: bool,
    pub aggressive: bool,
    pub endgame: bool,
}

impl TableReading {
    pub fn should_pass(&self) -> bool {
        self.conservative && !self.aggressive && !self.endgame
    }
}

impl HardStrategy {
    pub fn read_table(&self, ctx: &BotDecisionContext<'_>) -> TableReading {
        let config = &self.config;
        let hand_size = ctx.player.hand.len();
        // No opponents left means nothing to be wary of.
        let min_opponent_hand = ctx.min_opponent_hand().unwrap_or(usize::MAX);
        let twos: Vec<Card> = ctx.player.twos().copied().collect();
        let penalty_risk = functional::penalty(&twos);

        TableReading {
            min_opponent_hand,
            penalty_risk,
            conservative: min_opponent_hand <= config.hard_conservative_opponent_hand_size
                && hand_size > config.hard_conservative_hand_size,
            aggressive: twos.len() >= config.aggressive_two_count
                || penalty_risk > hand_size as i64 * config.hard_penalty_risk_factor,
            endgame: hand_size <= config.hard_endgame_hand_size
                || min_opponent_hand <= config.hard_endgame_opponent_hand_size,
        }
    }
}

impl DecisionStrategy for HardStrategy {
    fn decide(&self, state: &GameState, player: &PlayerId, _rng: &mut dyn RngCore) -> Decision {
        let Some(ctx) = BotDecisionContext::new(state, player) else {
            return Decision::Pass;
        };
        if ctx.candidates.is_empty() {
            return Decision::Pass;
        }

        let reading = self.read_table(&ctx);
        if reading.should_pass() {
            return Decision::Pass;
        }

        let choice = match ctx.weakest_with_two() {
            Some(play) if reading.aggressive => Some(play),
            _ if reading.endgame => ctx.largest(),
            _ => ctx.weakest(),
        };
        choice.map_or(Decision::Pass, Decision::play)
    }
}

/// One strategy per difficulty tier, chosen once when a bot is seated.
#[enum_dispatch(DecisionStrategy)]
#[derive(Debug, Clone)]
pub enum Strategy {
    Easy(EasyStrategy),
    Medium(MediumStrategy),
    Hard(HardStrategy),
}

impl Strategy {
    /// Get the strategy for a given difficulty
    pub fn from_difficulty(difficulty: BotDifficulty, config: BotDecisionConfig) -> Self {
        match difficulty {
            BotDifficulty::Easy => EasyStrategy { config }.into(),
            BotDifficulty::Medium => MediumStrategy { config }.into(),
            BotDifficulty::Hard => HardStrategy { config }.into(),
        }
    }
}
