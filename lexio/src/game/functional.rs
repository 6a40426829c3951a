//! Pure rule functions: card ordering, play classification and scoring.
//!
//! Nothing in here holds state. The state machine and the bots both build
//! on these functions so that legality is decided in exactly one place.

use std::cmp::Ordering;

use super::{
    constants::{
        CARD_STRENGTH_WEIGHT, FALLBACK_MAX_NUMBER, FIVE_CARD_PLAY, PLAY_TYPE_WEIGHT,
        RANK_ONE_STRENGTH, RANK_TWO_STRENGTH,
    },
    entities::{Card, Classification, Play, Player, PlayType, Suit, Value},
};

/// Highest card number in a deck for the given table size.
#[must_use]
pub fn max_number(player_count: usize) -> Value {
    match player_count {
        2 => 5,
        3 => 9,
        4 => 13,
        5 => 15,
        _ => FALLBACK_MAX_NUMBER,
    }
}

/// Rank strength: 3 is weakest, then ascending numbers, then 1, then 2.
#[must_use]
pub fn card_strength(card: &Card) -> u32 {
    match card.0 {
        2 => RANK_TWO_STRENGTH,
        1 => RANK_ONE_STRENGTH,
        n => u32::from(n),
    }
}

#[must_use]
pub fn suit_strength(suit: Suit) -> u32 {
    match suit {
        Suit::Cloud => 1,
        Suit::Star => 2,
        Suit::Moon => 3,
        Suit::Sun => 4,
    }
}

/// Total order on cards by rank strength, then suit strength.
#[must_use]
pub fn compare_cards(a: &Card, b: &Card) -> Ordering {
    card_strength(a)
        .cmp(&card_strength(b))
        .then_with(|| suit_strength(a.1).cmp(&suit_strength(b.1)))
}

/// Classifies a set of cards into a play type and strength.
///
/// Only sets of 1, 2, 3 or 5 cards can form a play. The input order does not
/// matter.
#[must_use]
pub fn classify(cards: &[Card]) -> Option<Classification> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(compare_cards);

    let play_type = match sorted.as_slice() {
        [_] => PlayType::Single,
        [a, b] if a.0 == b.0 => PlayType::Pair,
        [a, b, c] if a.0 == b.0 && b.0 == c.0 => PlayType::Triple,
        five if five.len() == FIVE_CARD_PLAY => classify_five(five)?,
        _ => return None,
    };

    Some(Classification {
        play_type,
        strength: play_strength(play_type, &sorted)?,
    })
}

fn classify_five(cards: &[Card]) -> Option<PlayType> {
    let is_flush = cards.iter().all(|card| card.1 == cards[0].1);
    let is_straight = is_straight(cards);

    if is_flush && is_straight {
        return Some(PlayType::StraightFlush);
    }

    let counts = number_counts(cards);
    match counts.as_slice() {
        [4, ..] => Some(PlayType::FourOfAKind),
        [3, 2] => Some(PlayType::FullHouse),
        _ if is_flush => Some(PlayType::Flush),
        _ if is_straight => Some(PlayType::Straight),
        _ => None,
    }
}

/// Five numbers forming one run with no gaps, compared by face value.
///
/// Rank 1 is only part of a run as the low end (1-2-3-4-5). It never wraps
/// around after the deck's highest number.
fn is_straight(cards: &[Card]) -> bool {
    let mut numbers: Vec<Value> = cards.iter().map(|card| card.0).collect();
    numbers.sort_unstable();
    numbers.windows(2).all(|pair| pair[1] == pair[0] + 1)
}

/// How often each number occurs, largest count first.
fn number_counts(cards: &[Card]) -> Vec<usize> {
    let mut counts: Vec<usize> = Vec::with_capacity(cards.len());
    let mut numbers: Vec<Value> = cards.iter().map(|card| card.0).collect();
    numbers.sort_unstable();
    for chunk in numbers.chunk_by(|a, b| a == b) {
        counts.push(chunk.len());
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts
}

/// Type weight plus the strength of the best card in the set.
fn play_strength(play_type: PlayType, cards: &[Card]) -> Option<u64> {
    let highest = cards.iter().max_by(|a, b| compare_cards(a, b))?;
    Some(
        play_type.order() * PLAY_TYPE_WEIGHT
            + u64::from(card_strength(highest)) * CARD_STRENGTH_WEIGHT
            + u64::from(suit_strength(highest.1)),
    )
}

/// Orders two plays of the same type by strength.
///
/// Plays of different types carry no ordering information, so this returns
/// `Ordering::Equal` for them. Legality checks must compare types first.
#[must_use]
pub fn compare_plays(a: &Play, b: &Play) -> Ordering {
    if a.play_type != b.play_type {
        return Ordering::Equal;
    }
    a.strength.cmp(&b.strength)
}

/// Whether `candidate` may be played given what is on the table.
#[must_use]
pub fn is_legal_against(candidate: &Classification, last_play: Option<&Play>) -> bool {
    match last_play {
        None => true,
        Some(last) => {
            candidate.play_type == last.play_type && candidate.strength > last.strength
        }
    }
}

/// Remaining-hand penalty: card count doubled once for every 2 still held.
#[must_use]
pub fn penalty(cards: &[Card]) -> i64 {
    let twos = cards.iter().filter(|card| card.is_two()).count() as u32;
    (cards.len() as i64) << twos
}

/// Coins the seat at `index` earns at the end of a round.
///
/// Seats are ranked by ascending hand penalty, ties keeping seat order. The
/// best seat collects every other seat's penalty, the worst collects nothing
/// and a middle seat collects the penalty gap to each seat ranked below it.
#[must_use]
pub fn round_score(players: &[Player], index: usize) -> i64 {
    if index >= players.len() {
        return 0;
    }

    let mut ranked: Vec<(usize, i64)> = players
        .iter()
        .enumerate()
        .map(|(seat, player)| (seat, penalty(&player.hand)))
        .collect();
    ranked.sort_by_key(|&(_, penalty)| penalty);

    let Some(rank) = ranked.iter().position(|&(seat, _)| seat == index) else {
        return 0;
    };
    let own = ranked[rank].1;

    if rank == 0 {
        ranked[1..].iter().map(|&(_, penalty)| penalty).sum()
    } else if rank == ranked.len() - 1 {
        0
    } else {
        ranked[rank + 1..]
            .iter()
            .map(|&(_, penalty)| (penalty - own).max(0))
            .sum()
    }
}

/// Seat holding the weakest card of the deck (the cloud 3), if dealt.
#[must_use]
pub fn seat_with_lowest_card(players: &[Player]) -> Option<usize> {
    let lowest = Card(3, Suit::Cloud);
    players
        .iter()
        .position(|player| player.is_active && player.holds(&lowest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::PlayerId;

    fn cards(pairs: &[(Value, Suit)]) -> Vec<Card> {
        pairs.iter().map(|&(n, s)| Card(n, s)).collect()
    }

    fn player_with(hand: Vec<Card>) -> Player {
        let mut player = Player::bot(1);
        player.hand = hand;
        player
    }

    fn hand_of_size(n: usize) -> Vec<Card> {
        (0..n).map(|i| Card(3 + i as Value, Suit::Moon)).collect()
    }

    // === Strength Tests ===

    #[test]
    fn test_card_strength_ordering() {
        assert_eq!(card_strength(&Card(3, Suit::Cloud)), 3);
        assert_eq!(card_strength(&Card(15, Suit::Cloud)), 15);
        assert_eq!(card_strength(&Card(1, Suit::Cloud)), 99);
        assert_eq!(card_strength(&Card(2, Suit::Cloud)), 100);
    }

    #[test]
    fn test_suit_strength_order() {
        assert!(suit_strength(Suit::Cloud) < suit_strength(Suit::Star));
        assert!(suit_strength(Suit::Star) < suit_strength(Suit::Moon));
        assert!(suit_strength(Suit::Moon) < suit_strength(Suit::Sun));
    }

    #[test]
    fn test_compare_cards_tie_breaks_on_suit() {
        assert_eq!(
            compare_cards(&Card(7, Suit::Sun), &Card(7, Suit::Cloud)),
            Ordering::Greater
        );
        assert_eq!(
            compare_cards(&Card(1, Suit::Cloud), &Card(13, Suit::Sun)),
            Ordering::Greater
        );
        assert_eq!(
            compare_cards(&Card(2, Suit::Cloud), &Card(1, Suit::Sun)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_max_number_per_player_count() {
        assert_eq!(max_number(2), 5);
        assert_eq!(max_number(3), 9);
        assert_eq!(max_number(4), 13);
        assert_eq!(max_number(5), 15);
        assert_eq!(max_number(7), 9);
    }

    // === Classification Tests ===

    #[test]
    fn test_classify_single_pair_triple() {
        let single = classify(&cards(&[(5, Suit::Star)])).unwrap();
        assert_eq!(single.play_type, PlayType::Single);
        assert_eq!(single.strength, 1_005_002);

        let pair = classify(&cards(&[(9, Suit::Sun), (9, Suit::Cloud)])).unwrap();
        assert_eq!(pair.play_type, PlayType::Pair);
        assert_eq!(pair.strength, 2_009_004);

        let triple = classify(&cards(&[(2, Suit::Cloud), (2, Suit::Moon), (2, Suit::Star)]))
            .unwrap();
        assert_eq!(triple.play_type, PlayType::Triple);
        assert_eq!(triple.strength, 3_100_003);
    }

    #[test]
    fn test_classify_rejects_mismatched_ranks() {
        assert!(classify(&cards(&[(9, Suit::Sun), (8, Suit::Sun)])).is_none());
        assert!(classify(&cards(&[(9, Suit::Sun), (9, Suit::Moon), (8, Suit::Sun)])).is_none());
    }

    #[test]
    fn test_classify_rejects_bad_sizes() {
        assert!(classify(&[]).is_none());
        let four = cards(&[
            (4, Suit::Cloud),
            (4, Suit::Star),
            (4, Suit::Moon),
            (4, Suit::Sun),
        ]);
        assert!(classify(&four).is_none());
        assert!(classify(&hand_of_size(6)).is_none());
    }

    #[test]
    fn test_classify_straight() {
        let run = cards(&[
            (7, Suit::Cloud),
            (5, Suit::Star),
            (6, Suit::Moon),
            (8, Suit::Sun),
            (9, Suit::Cloud),
        ]);
        let classification = classify(&run).unwrap();
        assert_eq!(classification.play_type, PlayType::Straight);
        assert_eq!(classification.strength, 4_009_001);
    }

    #[test]
    fn test_classify_low_straight_uses_one_and_two() {
        // Face values 1..5 are a run. The 2 is the best card.
        let run = cards(&[
            (1, Suit::Cloud),
            (2, Suit::Star),
            (3, Suit::Moon),
            (4, Suit::Sun),
            (5, Suit::Cloud),
        ]);
        let classification = classify(&run).unwrap();
        assert_eq!(classification.play_type, PlayType::Straight);
        assert_eq!(classification.strength, 4_100_002);
    }

    #[test]
    fn test_classify_one_does_not_wrap_above_top() {
        let wrapped = cards(&[
            (6, Suit::Cloud),
            (7, Suit::Star),
            (8, Suit::Moon),
            (9, Suit::Sun),
            (1, Suit::Cloud),
        ]);
        assert!(classify(&wrapped).is_none());
    }

    #[test]
    fn test_classify_flush_and_straight_flush() {
        let flush = cards(&[
            (3, Suit::Moon),
            (5, Suit::Moon),
            (9, Suit::Moon),
            (11, Suit::Moon),
            (12, Suit::Moon),
        ]);
        assert_eq!(classify(&flush).unwrap().play_type, PlayType::Flush);

        let straight_flush = cards(&[
            (3, Suit::Star),
            (4, Suit::Star),
            (5, Suit::Star),
            (6, Suit::Star),
            (7, Suit::Star),
        ]);
        assert_eq!(
            classify(&straight_flush).unwrap().play_type,
            PlayType::StraightFlush
        );
    }

    #[test]
    fn test_classify_full_house_and_four_of_a_kind() {
        let full_house = cards(&[
            (4, Suit::Cloud),
            (4, Suit::Star),
            (4, Suit::Moon),
            (7, Suit::Sun),
            (7, Suit::Cloud),
        ]);
        let classification = classify(&full_house).unwrap();
        assert_eq!(classification.play_type, PlayType::FullHouse);
        // Highest card is the 7 of sun, not part of the triple.
        assert_eq!(classification.strength, 6_007_004);

        let quads = cards(&[
            (9, Suit::Cloud),
            (9, Suit::Star),
            (9, Suit::Moon),
            (9, Suit::Sun),
            (3, Suit::Cloud),
        ]);
        assert_eq!(classify(&quads).unwrap().play_type, PlayType::FourOfAKind);
    }

    #[test]
    fn test_classify_rejects_two_pair_five() {
        let junk = cards(&[
            (4, Suit::Cloud),
            (4, Suit::Star),
            (7, Suit::Moon),
            (7, Suit::Sun),
            (9, Suit::Cloud),
        ]);
        assert!(classify(&junk).is_none());
    }

    #[test]
    fn test_classify_order_invariant() {
        let mut run = cards(&[
            (9, Suit::Cloud),
            (5, Suit::Star),
            (7, Suit::Moon),
            (8, Suit::Sun),
            (6, Suit::Cloud),
        ]);
        let first = classify(&run);
        run.reverse();
        assert_eq!(classify(&run), first);
    }

    #[test]
    fn test_flush_outranks_any_straight() {
        let weak_flush = cards(&[
            (3, Suit::Cloud),
            (4, Suit::Cloud),
            (5, Suit::Cloud),
            (6, Suit::Cloud),
            (8, Suit::Cloud),
        ]);
        let strong_straight = cards(&[
            (1, Suit::Sun),
            (2, Suit::Sun),
            (3, Suit::Moon),
            (4, Suit::Sun),
            (5, Suit::Sun),
        ]);
        let flush = classify(&weak_flush).unwrap();
        let straight = classify(&strong_straight).unwrap();
        assert!(flush.strength > straight.strength);
    }

    // === Play Comparison Tests ===

    #[test]
    fn test_compare_plays_only_within_type() {
        let make = |play_type, strength| Play {
            play_type,
            cards: Vec::new(),
            player: PlayerId::human(),
            strength,
        };
        assert_eq!(
            compare_plays(&make(PlayType::Pair, 10), &make(PlayType::Pair, 5)),
            Ordering::Greater
        );
        assert_eq!(
            compare_plays(&make(PlayType::Triple, 10), &make(PlayType::Pair, 5)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_is_legal_against() {
        let last = Play {
            play_type: PlayType::Pair,
            cards: cards(&[(5, Suit::Cloud), (5, Suit::Star)]),
            player: PlayerId::human(),
            strength: 2_005_002,
        };
        let higher_pair = classify(&cards(&[(6, Suit::Cloud), (6, Suit::Star)])).unwrap();
        let lower_pair = classify(&cards(&[(4, Suit::Cloud), (4, Suit::Star)])).unwrap();
        let triple =
            classify(&cards(&[(2, Suit::Cloud), (2, Suit::Star), (2, Suit::Sun)])).unwrap();

        assert!(is_legal_against(&higher_pair, Some(&last)));
        assert!(!is_legal_against(&lower_pair, Some(&last)));
        assert!(!is_legal_against(&triple, Some(&last)));
        assert!(is_legal_against(&lower_pair, None));
    }

    // === Scoring Tests ===

    #[test]
    fn test_penalty() {
        assert_eq!(penalty(&[]), 0);
        assert_eq!(penalty(&cards(&[(2, Suit::Cloud), (3, Suit::Star)])), 4);
        assert_eq!(penalty(&hand_of_size(5)), 5);
        let four_twos = cards(&[
            (2, Suit::Cloud),
            (2, Suit::Star),
            (2, Suit::Moon),
            (2, Suit::Sun),
            (3, Suit::Cloud),
            (4, Suit::Cloud),
        ]);
        assert_eq!(penalty(&four_twos), 96);
    }

    #[test]
    fn test_round_score_three_players() {
        // Penalties [5, 0, 2] by seat, so ranks are seat 1, seat 2, seat 0.
        let players = vec![
            player_with(hand_of_size(5)),
            player_with(Vec::new()),
            player_with(hand_of_size(2)),
        ];
        assert_eq!(round_score(&players, 1), 7);
        assert_eq!(round_score(&players, 2), 3);
        assert_eq!(round_score(&players, 0), 0);
    }

    #[test]
    fn test_round_score_middle_rank_ignores_better_seats() {
        let players = vec![
            player_with(Vec::new()),
            player_with(hand_of_size(3)),
            player_with(hand_of_size(4)),
            player_with(hand_of_size(8)),
        ];
        assert_eq!(round_score(&players, 0), 15);
        assert_eq!(round_score(&players, 1), 1 + 5);
        assert_eq!(round_score(&players, 2), 4);
        assert_eq!(round_score(&players, 3), 0);
    }

    #[test]
    fn test_round_score_out_of_range() {
        let players = vec![player_with(Vec::new())];
        assert_eq!(round_score(&players, 3), 0);
    }

    #[test]
    fn test_seat_with_lowest_card() {
        let mut players = vec![
            player_with(hand_of_size(2)),
            player_with(cards(&[(3, Suit::Cloud)])),
        ];
        assert_eq!(seat_with_lowest_card(&players), Some(1));
        players[1].is_active = false;
        assert_eq!(seat_with_lowest_card(&players), None);
    }
}
