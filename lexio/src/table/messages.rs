//! Table actor message types.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::config::{ConfigError, GameConfig};
use crate::game::{
    ActionError, ScheduledTurn,
    entities::{Command, GameState, Player, PlayerId},
};

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Seat a new game and deal its first round
    StartGame {
        config: GameConfig,
        response: oneshot::Sender<Result<(), ConfigError>>,
    },

    /// Player command (play, pass, new round, new game)
    Command {
        player: PlayerId,
        command: Command,
        response: oneshot::Sender<Result<(), ActionError>>,
    },

    /// Get a snapshot of the game state
    GetState {
        response: oneshot::Sender<GameState>,
    },

    /// Get a snapshot of one player
    GetPlayer {
        player: PlayerId,
        response: oneshot::Sender<Option<Player>>,
    },

    /// Whether cards are being played
    IsActive { response: oneshot::Sender<bool> },

    /// Subscribe to state change notifications
    Subscribe {
        subscriber_id: u64,
        sender: mpsc::Sender<StateChangeNotification>,
    },

    /// Unsubscribe from state change notifications
    Unsubscribe { subscriber_id: u64 },

    /// Internal: a bot's thinking time is over
    BotTurn(ScheduledTurn),

    /// Stop the table
    Close { response: oneshot::Sender<()> },
}

/// Notification sent when table state changes
#[derive(Debug, Clone)]
pub enum StateChangeNotification {
    /// Snapshot taken right after the change was committed
    StateChanged(Box<GameState>),
}

/// Errors surfaced by a [`TableHandle`](super::TableHandle)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("table is closed")]
    Closed,

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TableError {
    /// Check if the command was rejected by the game rather than the table
    pub fn is_rejection(&self) -> bool {
        matches!(self, TableError::Action(_))
    }
}
