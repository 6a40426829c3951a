use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lexio::{
    BotDifficulty, Card, Command, GameConfig, GameEngine, Phase, PlayerId, Suit,
    bot::legal_plays,
    entities::Deck,
    functional::{classify, penalty},
};
use rand::{SeedableRng, rngs::StdRng};
use std::hint::black_box;

/// Helper to deal a hand the size a seat gets at the given table size
fn dealt_hand(player_count: usize) -> Vec<Card> {
    let mut deck = Deck::new(player_count);
    deck.shuffle(&mut StdRng::seed_from_u64(7));
    deck.deal(player_count).swap_remove(0)
}

/// Benchmark classifying a single card
fn bench_classify_single(c: &mut Criterion) {
    let cards = vec![Card(2, Suit::Sun)];

    c.bench_function("classify_single", |b| {
        b.iter(|| classify(black_box(&cards)));
    });
}

/// Benchmark classifying five-card plays
fn bench_classify_five(c: &mut Criterion) {
    let straight_flush = vec![
        Card(5, Suit::Moon),
        Card(3, Suit::Moon),
        Card(7, Suit::Moon),
        Card(4, Suit::Moon),
        Card(6, Suit::Moon),
    ];
    let full_house = vec![
        Card(9, Suit::Cloud),
        Card(9, Suit::Star),
        Card(9, Suit::Sun),
        Card(1, Suit::Star),
        Card(1, Suit::Moon),
    ];
    let nothing = vec![
        Card(3, Suit::Cloud),
        Card(5, Suit::Star),
        Card(9, Suit::Sun),
        Card(11, Suit::Star),
        Card(2, Suit::Moon),
    ];

    let mut group = c.benchmark_group("classify_five");
    for (name, cards) in [
        ("straight_flush", &straight_flush),
        ("full_house", &full_house),
        ("invalid", &nothing),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), cards, |b, cards| {
            b.iter(|| classify(black_box(cards)));
        });
    }
    group.finish();
}

/// Benchmark enumerating legal plays for a freshly dealt hand
fn bench_legal_plays(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_plays");
    for player_count in 2..=5 {
        let hand = dealt_hand(player_count);
        group.bench_with_input(
            BenchmarkId::new("open_table", format!("{player_count}p_{}cards", hand.len())),
            &hand,
            |b, hand| {
                b.iter(|| legal_plays(black_box(hand), None, &PlayerId::bot(1)));
            },
        );
    }
    group.finish();
}

/// Benchmark the remaining-hand penalty
fn bench_penalty(c: &mut Criterion) {
    let hand = dealt_hand(3);

    c.bench_function("penalty_12_cards", |b| {
        b.iter(|| penalty(black_box(&hand)));
    });
}

/// Benchmark dealing a shuffled deck
fn bench_deal(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("shuffle_and_deal_5p", |b| {
        b.iter(|| {
            let mut deck = Deck::new(5);
            deck.shuffle(&mut rng);
            deck.deal(5)
        });
    });
}

/// Benchmark a whole round with every seat played by the engine
fn bench_full_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_round");
    for difficulty in [BotDifficulty::Easy, BotDifficulty::Medium, BotDifficulty::Hard] {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &difficulty,
            |b, &difficulty| {
                b.iter(|| {
                    let mut engine = GameEngine::with_seed(11);
                    engine
                        .start_game(&GameConfig::new("bench", 4, difficulty, 1))
                        .unwrap();
                    while engine.phase() == Phase::Playing {
                        engine.drain_bot_turns();
                        if engine.phase() != Phase::Playing {
                            break;
                        }
                        let state = engine.state();
                        let human = &state.players[0];
                        let command = legal_plays(&human.hand, state.last_play.as_ref(), &human.id)
                            .into_iter()
                            .min_by_key(|play| play.strength)
                            .map_or(Command::Pass, |play| Command::Play {
                                cards: play.cards,
                                play_type: play.play_type,
                            });
                        engine.handle(command).unwrap();
                    }
                    engine
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_classify_single,
    bench_classify_five,
    bench_legal_plays,
    bench_penalty,
    bench_deal,
    bench_full_round,
);
criterion_main!(benches);
