//! Plain-text rendering of game snapshots.

use lexio::{Card, GameState, Phase, Player};
use std::fmt::Write;

/// Hand in the order it is shown, weakest card first. Card positions typed
/// by the user refer to this order.
pub fn sorted_hand(player: &Player) -> Vec<Card> {
    let mut hand = player.hand.clone();
    hand.sort();
    hand
}

/// One line listing the hand with 1-based positions
pub fn render_hand(hand: &[Card]) -> String {
    hand.iter()
        .enumerate()
        .map(|(i, card)| format!("{}:{card}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Seats, the play on the table and whose turn it is
pub fn render_table(state: &GameState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Round {}/{} ({}) ---", state.round, state.max_rounds, state.phase);

    for (seat, player) in state.players.iter().enumerate() {
        let marker = if state.phase == Phase::Playing && seat == state.current_player {
            ">"
        } else {
            " "
        };
        let status = match (player.is_active, player.is_winner) {
            (_, true) => " [winner]",
            (false, _) => " [out]",
            _ => "",
        };
        let _ = writeln!(
            out,
            "{marker} {:<12} {:>4} coins  {:>2} cards{status}",
            player.name,
            player.coins,
            player.hand.len()
        );
    }

    match &state.last_play {
        Some(play) => {
            let by = state
                .player(&play.player)
                .map_or(play.player.as_str(), |p| p.name.as_str());
            let _ = writeln!(out, "Table: {play} by {by}");
        }
        None if state.phase == Phase::Playing => {
            let _ = writeln!(out, "Table: open");
        }
        None => {}
    }
    out
}

/// Prompt line for the human seat at `seat`
pub fn render_prompt(state: &GameState, seat: usize) -> Option<String> {
    match state.phase {
        Phase::Playing if state.current_player == seat => {
            let player = state.players.get(seat)?;
            Some(format!(
                "Your hand: {}\nYour move (play <cards> | pass):",
                render_hand(&sorted_hand(player))
            ))
        }
        Phase::RoundEnd => Some("Round over. Type 'round' for the next one.".to_string()),
        Phase::GameEnd => Some("Game over. Type 'new' to play again or 'quit'.".to_string()),
        _ => None,
    }
}
