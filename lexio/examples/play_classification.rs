//! Play Classification Example
//!
//! Shows how card combinations are classified, compared and penalized.

use lexio::entities::{Card, Suit};
use lexio::functional::{classify, is_legal_against, penalty};
use lexio::{Command, Play, PlayerId};

fn describe(cards: &[Card]) {
    let names: Vec<String> = cards.iter().map(Card::to_string).collect();
    match classify(cards) {
        Some(c) => println!("{:<40} {} (strength {})", names.join(" "), c.play_type, c.strength),
        None => println!("{:<40} not a valid play", names.join(" ")),
    }
}

fn main() {
    println!("=== Lexio Play Classification Example ===\n");

    // Example 1: Classify combinations
    println!("Example 1: Classifying combinations");
    describe(&[Card(2, Suit::Sun)]);
    describe(&[Card(7, Suit::Cloud), Card(7, Suit::Moon)]);
    describe(&[Card(7, Suit::Cloud), Card(8, Suit::Moon)]);
    describe(&[
        Card(9, Suit::Star),
        Card(9, Suit::Moon),
        Card(9, Suit::Cloud),
    ]);
    describe(&[
        Card(3, Suit::Cloud),
        Card(4, Suit::Moon),
        Card(5, Suit::Star),
        Card(6, Suit::Sun),
        Card(7, Suit::Cloud),
    ]);
    describe(&[
        Card(3, Suit::Star),
        Card(8, Suit::Star),
        Card(5, Suit::Star),
        Card(11, Suit::Star),
        Card(1, Suit::Star),
    ]);
    describe(&[
        Card(4, Suit::Cloud),
        Card(4, Suit::Moon),
        Card(4, Suit::Sun),
        Card(6, Suit::Star),
        Card(6, Suit::Sun),
    ]);

    // Example 2: Beating the table
    println!("\nExample 2: Beating the play on the table");
    let pair = vec![Card(5, Suit::Sun), Card(5, Suit::Star)];
    let on_table = classify(&pair).map(|c| Play {
        play_type: c.play_type,
        cards: pair.clone(),
        player: PlayerId::bot(1),
        strength: c.strength,
    });
    if let Some(table) = &on_table {
        println!("On the table: {table}");
        for cards in [
            vec![Card(5, Suit::Cloud), Card(5, Suit::Moon)],
            vec![Card(6, Suit::Cloud), Card(6, Suit::Moon)],
            vec![Card(2, Suit::Cloud)],
        ] {
            let names: Vec<String> = cards.iter().map(Card::to_string).collect();
            let legal = classify(&cards).is_some_and(|c| is_legal_against(&c, Some(table)));
            println!("  {:<24} {}", names.join(" "), if legal { "beats it" } else { "does not" });
        }
    }

    // Example 3: Penalties for cards left in hand
    println!("\nExample 3: Penalties");
    let hands = [
        vec![Card(3, Suit::Cloud), Card(9, Suit::Moon)],
        vec![Card(3, Suit::Cloud), Card(2, Suit::Moon)],
        vec![Card(2, Suit::Cloud), Card(2, Suit::Moon), Card(2, Suit::Sun)],
    ];
    for hand in &hands {
        let names: Vec<String> = hand.iter().map(Card::to_string).collect();
        println!("  {:<32} penalty {}", names.join(" "), penalty(hand));
    }

    // Example 4: Parsing commands
    println!("\nExample 4: Parsing commands");
    for text in ["play c3 m3", "pass", "round", "fold"] {
        match text.parse::<Command>() {
            Ok(command) => println!("  {text:<12} -> {command}"),
            Err(e) => println!("  {text:<12} -> error: {e}"),
        }
    }
}
