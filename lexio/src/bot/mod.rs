//! Computer opponents with difficulty presets.
//!
//! This module implements:
//! - Legal play enumeration for a hand against the table
//! - Three decision strategies dispatched through [`Strategy`]
//! - BotPlayer: an individual bot with statistics tracking
//! - BotManager: the bots seated at one table
//!
//! ## Difficulty Presets
//!
//! ### Easy
//! - Passes 30% of the time even when it could play
//! - Otherwise plays a random legal candidate
//!
//! ### Medium
//! - Passes 20% of the time, 10% when holding two or more 2s or five or
//!   fewer cards
//! - Sheds the weakest play containing a 2, else the weakest play
//!
//! ### Hard
//! - Holds back while an opponent is close to going out and its own hand is
//!   still large
//! - Dumps 2s once their penalty outweighs the hand
//! - Empties the hand as fast as possible in the endgame
//!
//! ## Example
//!
//! ```
//! use lexio::bot::{BotManager, Decision};
//! use lexio::game::entities::{Player, PlayerId};
//! use lexio::table::config::BotDifficulty;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let players = vec![Player::human("alice"), Player::bot(1)];
//! let mut manager = BotManager::default();
//! manager.seat_bots(&players, BotDifficulty::Hard);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let state = lexio::game::entities::GameState::default();
//! // An empty table gives the bot nothing to play.
//! assert_eq!(
//!     manager.decide(&PlayerId::bot(1), &state, &mut rng),
//!     Some(Decision::Pass)
//! );
//! ```

pub mod decision;
pub mod manager;
pub mod models;

pub use decision::{BotDecisionConfig, Decision, DecisionStrategy, Strategy, legal_plays};
pub use manager::BotManager;
pub use models::{BotConfig, BotPlayer, BotStats};
