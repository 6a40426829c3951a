use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{self},
    str::FromStr,
};
use thiserror::Error;

use super::{
    constants::{self, STARTING_COINS},
    functional,
    state_machine::ActionError,
};

/// The four suits, weakest first.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Cloud,
    Star,
    Moon,
    Sun,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Cloud, Suit::Star, Suit::Moon, Suit::Sun];

    /// Single-letter shorthand accepted when parsing cards.
    pub fn initial(self) -> char {
        match self {
            Self::Cloud => 'c',
            Self::Star => 's',
            Self::Moon => 'm',
            Self::Sun => 'u',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Cloud => "cloud",
            Self::Star => "star",
            Self::Moon => "moon",
            Self::Sun => "sun",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Suit {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suit = match s.to_ascii_lowercase().as_str() {
            "cloud" | "c" => Self::Cloud,
            "star" | "s" => Self::Star,
            "moon" | "m" => Self::Moon,
            "sun" | "u" => Self::Sun,
            _ => return Err(ParseCardError::UnknownSuit(s.to_string())),
        };
        Ok(suit)
    }
}

/// A card's face number, 1 up to 15 in the five-player deck.
pub type Value = u8;

/// A card is a number (1 up to the deck's maximum) and a suit.
///
/// Cards order by game strength rather than by number: 3 is the weakest
/// rank, then ascending up to the deck's maximum, then 1, then 2. Equal
/// ranks order by suit. No two distinct cards compare equal.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    pub fn number(&self) -> Value {
        self.0
    }

    pub fn suit(&self) -> Suit {
        self.1
    }

    /// Stable identity of the card within a deck, e.g. `cloud-3`.
    pub fn id(&self) -> String {
        self.to_string()
    }

    pub fn is_two(&self) -> bool {
        self.0 == 2
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        functional::compare_cards(self, other)
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.1, self.0)
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseCardError {
    #[error("unknown suit `{0}`")]
    UnknownSuit(String),
    #[error("invalid card number `{0}`")]
    InvalidNumber(String),
    #[error("can't read `{0}` as a card")]
    Malformed(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Accepts `cloud-3`, `c-3` and `c3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (suit, number) = match s.split_once('-') {
            Some(parts) => parts,
            None => {
                let split = s
                    .find(|c: char| c.is_ascii_digit())
                    .ok_or_else(|| ParseCardError::Malformed(s.to_string()))?;
                s.split_at(split)
            }
        };
        let suit: Suit = suit.parse()?;
        let number: Value = number
            .parse()
            .map_err(|_| ParseCardError::InvalidNumber(number.to_string()))?;
        if number == 0 || number > constants::MAX_NUMBER {
            return Err(ParseCardError::InvalidNumber(number.to_string()));
        }
        Ok(Self(number, suit))
    }
}

/// Play types, weakest first. A play only ever answers a play of the same
/// type.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayType {
    Single,
    Pair,
    Triple,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl PlayType {
    /// Position in the fixed type order, starting at 1.
    pub fn order(self) -> u64 {
        match self {
            Self::Single => 1,
            Self::Pair => 2,
            Self::Triple => 3,
            Self::Straight => 4,
            Self::Flush => 5,
            Self::FullHouse => 6,
            Self::FourOfAKind => 7,
            Self::StraightFlush => 8,
        }
    }

    pub fn is_five_card(self) -> bool {
        self.order() >= Self::Straight.order()
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Single => "single",
            Self::Pair => "pair",
            Self::Triple => "triple",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Result of classifying a set of cards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Classification {
    pub play_type: PlayType,
    pub strength: u64,
}

/// A classified set of cards on the table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    pub play_type: PlayType,
    pub cards: Vec<Card>,
    pub player: PlayerId,
    pub strength: u64,
}

impl Play {
    /// Whether `self` may be played on top of `previous`.
    pub fn beats(&self, previous: &Play) -> bool {
        self.play_type == previous.play_type && self.strength > previous.strength
    }

    pub fn contains_two(&self) -> bool {
        self.cards.iter().any(Card::is_two)
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "{} [{}]", self.play_type, cards.join(" "))
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn human() -> Self {
        Self("human".to_string())
    }

    /// Id of the `n`th computer seat, counting from 1.
    pub fn bot(n: usize) -> Self {
        Self(format!("ai-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cards in the order they were dealt.
    pub hand: Vec<Card>,
    pub coins: i64,
    pub is_ai: bool,
    /// False once the seat is eliminated.
    pub is_active: bool,
    pub is_winner: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, is_ai: bool) -> Self {
        let name: String = name
            .trim()
            .chars()
            .take(constants::MAX_PLAYER_NAME_LENGTH)
            .collect();
        Self {
            id,
            name,
            hand: Vec::new(),
            coins: STARTING_COINS,
            is_ai,
            is_active: true,
            is_winner: false,
        }
    }

    pub fn human(name: &str) -> Self {
        Self::new(PlayerId::human(), name, false)
    }

    pub fn bot(n: usize) -> Self {
        Self::new(PlayerId::bot(n), &format!("AI {n}"), true)
    }

    pub fn holds(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    pub fn twos(&self) -> impl Iterator<Item = &Card> {
        self.hand.iter().filter(|card| card.is_two())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} coins, {} cards)", self.name, self.coins, self.hand.len())
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Waiting,
    Playing,
    RoundEnd,
    GameEnd,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::RoundEnd => "round end",
            Self::GameEnd => "game end",
        };
        write!(f, "{repr}")
    }
}

/// A full deck for a given table size: every suit paired with every number
/// from 1 to the table's maximum.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(player_count: usize) -> Self {
        let max_number = functional::max_number(player_count);
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| (1..=max_number).map(move |number| Card(number, suit)))
            .collect();
        Self { cards }
    }

    /// Unbiased in-place permutation (Fisher-Yates).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals one card at a time to each seat in turn.
    pub fn deal(self, seats: usize) -> Vec<Vec<Card>> {
        let mut hands = vec![Vec::with_capacity(self.cards.len() / seats.max(1) + 1); seats];
        if seats == 0 {
            return hands;
        }
        for (i, card) in self.cards.into_iter().enumerate() {
            hands[i % seats].push(card);
        }
        hands
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Canonical state of one game. Snapshots handed to observers are clones of
/// this value.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Seats in turn order.
    pub players: Vec<Player>,
    pub current_player: usize,
    /// Undealt cards. Always empty once a round is dealt.
    pub deck: Vec<Card>,
    /// `None` while the table is open.
    pub last_play: Option<Play>,
    pub phase: Phase,
    pub round: u32,
    pub max_rounds: u32,
    pub player_count: usize,
    pub max_number: Value,
    pub winner: Option<PlayerId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            current_player: 0,
            deck: Vec::new(),
            last_play: None,
            phase: Phase::Waiting,
            round: 1,
            max_rounds: constants::DEFAULT_MAX_ROUNDS,
            player_count: constants::DEFAULT_PLAYER_COUNT,
            max_number: functional::max_number(constants::DEFAULT_PLAYER_COUNT),
            winner: None,
        }
    }
}

impl GameState {
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    pub fn acting_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }

    /// First active seat strictly after the current one, wrapping around.
    /// Returns `None` when no seat is active.
    pub fn next_active_seat(&self) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (self.current_player + step) % n)
            .find(|&seat| self.players[seat].is_active)
    }
}

/// A player's intended action.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    Play {
        cards: Vec<Card>,
        /// Informational. The engine classifies the cards itself.
        play_type: PlayType,
    },
    Pass,
    NewRound,
    NewGame,
}

impl Command {
    /// Builds a play command, declaring whatever type the cards classify as.
    pub fn play(cards: Vec<Card>) -> Result<Self, ActionError> {
        let classification = functional::classify(&cards).ok_or(ActionError::InvalidCombination)?;
        Ok(Self::Play {
            cards,
            play_type: classification.play_type,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Play { .. } => "play",
            Self::Pass => "pass",
            Self::NewRound => "start a new round",
            Self::NewGame => "start a new game",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Play { cards, play_type } => {
                let cards: Vec<String> = cards.iter().map(Card::to_string).collect();
                write!(f, "plays {play_type} [{}]", cards.join(" "))
            }
            Self::Pass => write!(f, "passes"),
            Self::NewRound => write!(f, "starts a new round"),
            Self::NewGame => write!(f, "starts a new game"),
        }
    }
}

impl FromStr for Command {
    type Err = ActionError;

    /// Text form used by terminal front-ends: `play c3 s3`, `pass`,
    /// `round`, `new`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        match verb.as_str() {
            "play" | "p" => {
                let cards = words
                    .map(str::parse::<Card>)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(ActionError::InvalidCard)?;
                Self::play(cards)
            }
            "pass" => Ok(Self::Pass),
            "round" | "next" | "new-round" => Ok(Self::NewRound),
            "new" | "new-game" => Ok(Self::NewGame),
            _ => Err(ActionError::UnknownCommand(s.trim().to_string())),
        }
    }
}
