//! Lexio game engine: entities, rule functions and the state machine.
//!
//! This module provides:
//! - Cards, decks, plays, players and the game state snapshot
//! - Pure rule functions for ordering, classification and scoring
//! - The command-driven state machine with observer registration

// Submodules
pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;

pub use state_machine::{ActionError, GameEngine, Listener, ScheduledTurn, SubscriptionId};
