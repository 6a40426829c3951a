//! Parsing of terminal input into game commands.

use lexio::{ActionError, Card, Command};
use std::fmt;

/// What the user typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A command for the engine
    Game(Command),
    /// Reprint the table
    Status,
    Help,
    Quit,
}

/// Errors that can occur during input parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `play` without any cards.
    NoCards,
    /// Card index outside the displayed hand.
    IndexOutOfRange { index: usize, hand_size: usize },
    /// Card text or command the engine can't read.
    Invalid(ActionError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCards => write!(f, "Name the cards to play (e.g., 'play 1 2' or 'play c3 s3')"),
            Self::IndexOutOfRange { index, hand_size } => {
                write!(f, "No card #{index}, your hand has {hand_size} cards")
            }
            Self::Invalid(ActionError::UnknownCommand(cmd)) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of input.
///
/// Cards in a `play` command are either 1-based positions in `hand` as it
/// is displayed, or card names such as `cloud-3` or `c3`.
///
/// # Examples
///
/// ```
/// use lexio::{Card, Command, PlayType, Suit};
/// use lexio_cli::commands::{Input, parse_input};
///
/// let hand = [Card(3, Suit::Cloud), Card(3, Suit::Star)];
/// assert_eq!(parse_input("pass", &hand), Ok(Input::Game(Command::Pass)));
/// assert_eq!(
///     parse_input("play 1 2", &hand),
///     Ok(Input::Game(Command::Play {
///         cards: hand.to_vec(),
///         play_type: PlayType::Pair,
///     }))
/// );
/// ```
pub fn parse_input(input: &str, hand: &[Card]) -> Result<Input, ParseError> {
    let trimmed = input.trim();
    let mut words = trimmed.split_ascii_whitespace();

    match words.next().map(str::to_ascii_lowercase).as_deref() {
        None | Some("status" | "s" | "table") => Ok(Input::Status),
        Some("help" | "h" | "?") => Ok(Input::Help),
        Some("quit" | "q" | "exit") => Ok(Input::Quit),
        Some("play" | "p") => {
            let cards = words
                .map(|word| parse_card(word, hand))
                .collect::<Result<Vec<_>, _>>()?;
            if cards.is_empty() {
                return Err(ParseError::NoCards);
            }
            Command::play(cards).map(Input::Game).map_err(ParseError::Invalid)
        }
        Some(_) => trimmed
            .parse::<Command>()
            .map(Input::Game)
            .map_err(ParseError::Invalid),
    }
}

fn parse_card(word: &str, hand: &[Card]) -> Result<Card, ParseError> {
    match word.parse::<usize>() {
        Ok(index) => index
            .checked_sub(1)
            .and_then(|i| hand.get(i))
            .copied()
            .ok_or(ParseError::IndexOutOfRange {
                index,
                hand_size: hand.len(),
            }),
        Err(_) => word
            .parse::<Card>()
            .map_err(|e| ParseError::Invalid(ActionError::InvalidCard(e))),
    }
}
