//! # Lexio
//!
//! A turn-based shedding card game for 2 to 5 players: one human and up to
//! four computer opponents.
//!
//! Every player is dealt the whole deck round-robin and tries to empty their
//! hand first. The first player to act on an open table may lead any valid
//! play; everyone after must beat it with a stronger play of the same type or
//! pass. When the trick passes all the way back to whoever made the last
//! play, the table opens again. A round ends as soon as one hand is empty and
//! everyone is charged for the cards they still hold, with each remaining 2
//! doubling the charge.
//!
//! ## Architecture
//!
//! The game moves through four phases:
//!
//! - **Waiting**: No game has been started
//! - **Playing**: Cards are being played
//! - **RoundEnd**: Scores are settled, waiting for the next round
//! - **GameEnd**: A winner is declared
//!
//! ## Core Modules
//!
//! - [`game`]: Entities, rule functions and the state machine
//! - [`bot`]: Difficulty-tiered computer opponents
//! - [`table`]: Async actor adding bot thinking time and channel subscriptions
//!
//! ## Example
//!
//! ```
//! use lexio::{GameConfig, GameEngine, Phase};
//!
//! let mut engine = GameEngine::with_seed(42);
//! engine.start_game(&GameConfig::default()).unwrap();
//! assert_eq!(engine.phase(), Phase::Playing);
//! ```

/// Computer opponents and their decision strategies.
pub mod bot;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    ActionError, GameEngine, ScheduledTurn, SubscriptionId,
    constants,
    entities::{self, Card, Command, GameState, Phase, Play, PlayType, Player, PlayerId, Suit},
    functional,
};

/// Async table actor and configuration.
pub mod table;
pub use table::{BotDifficulty, ConfigError, GameConfig, OpeningRule, TableConfig};
