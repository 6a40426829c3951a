//! Table module running one game behind an async actor.
//!
//! This module implements:
//! - TableActor: async actor owning a single [`GameEngine`](crate::game::GameEngine)
//! - Bot thinking time as cancellable delayed tasks
//! - Message-based communication with tokio channels
//! - Game and table configuration
//!
//! ## Architecture
//!
//! The table runs in its own Tokio task with an mpsc message inbox. Commands
//! are applied one at a time. When a bot is to act, the actor spawns a task
//! that sleeps for the bot's thinking time and then posts the turn back into
//! the inbox. Turns that went stale in the meantime are dropped by the engine.
//!
//! ## Example
//!
//! ```no_run
//! use lexio::game::{GameEngine, entities::{Command, PlayerId}};
//! use lexio::table::{GameConfig, TableActor, TableConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = TableActor::new(TableConfig::default(), GameEngine::new());
//!     tokio::spawn(actor.run());
//!
//!     handle.start_game(GameConfig::default()).await.unwrap();
//!     handle.submit(PlayerId::human(), Command::Pass).await.unwrap();
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use config::{BotDifficulty, ConfigError, GameConfig, OpeningRule, TableConfig};
pub use messages::{StateChangeNotification, TableError, TableMessage};
