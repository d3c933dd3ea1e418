//! Тесты случайности:
//! - детерминированность DeterministicRng;
//! - различие seed → различие тасовок;
//! - деривация RngSeed по контексту игры;
//! - отсутствие повторов карт после тасовки.

use blackjack_engine::domain::deck::Deck;
use blackjack_engine::engine::RandomSource;
use blackjack_engine::infra::{DeterministicRng, RngSeed, SystemRng};

#[test]
fn deterministic_rng_same_seed_same_shuffle() {
    let mut r1 = DeterministicRng::from_seed(123);
    let mut r2 = DeterministicRng::from_seed(123);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();
    r1.shuffle(&mut a);
    r2.shuffle(&mut b);

    assert_eq!(a, b, "Same seed must produce identical shuffle");
}

#[test]
fn deterministic_rng_different_seeds_different_shuffle() {
    let mut r1 = DeterministicRng::from_seed(111);
    let mut r2 = DeterministicRng::from_seed(222);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();
    r1.shuffle(&mut a);
    r2.shuffle(&mut b);

    assert_ne!(a, b, "Different seeds must diverge");
}

#[test]
fn shuffled_deck_keeps_all_52_cards() {
    let mut deck = Deck::standard_52();
    let mut rng = DeterministicRng::from_seed(7);
    rng.shuffle(&mut deck.cards);

    assert_eq!(deck.len(), 52);
    let mut seen = std::collections::HashSet::new();
    for c in &deck.cards {
        assert!(seen.insert((c.rank, c.suit)), "duplicate card after shuffle");
    }
}

#[test]
fn system_rng_keeps_all_52_cards() {
    let mut deck = Deck::standard_52();
    let mut rng = SystemRng;
    rng.shuffle(&mut deck.cards);

    let mut seen = std::collections::HashSet::new();
    for c in &deck.cards {
        assert!(seen.insert((c.rank, c.suit)));
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn rng_seed_derive_is_deterministic() {
    let base = RngSeed::from_u64(42);
    let a = base.derive(0, 0);
    let b = base.derive(0, 0);
    assert_eq!(a, b);
}

#[test]
fn rng_seed_derive_separates_games() {
    let base = RngSeed::from_u64(42);
    let g0 = base.derive(0, 0);
    let g1 = base.derive(0, 1);
    let l1 = base.derive(1, 0);

    assert_ne!(g0, g1, "different game ids must derive different seeds");
    assert_ne!(g0, l1, "different lobby ids must derive different seeds");
    assert_ne!(g0.bytes, base.bytes, "derived seed must differ from base");
}

#[test]
fn rng_seed_to_rng_reproduces_shuffle() {
    let seed = RngSeed::from_u64(9).derive(3, 5);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();
    seed.to_rng().shuffle(&mut a);
    seed.to_rng().shuffle(&mut b);

    assert_eq!(a, b, "one derived seed — one deck order");
}

#[test]
fn rng_seed_from_bytes_round_trip() {
    let mut bytes = [0u8; 32];
    bytes[0] = 1;
    bytes[31] = 255;
    let seed = RngSeed::from_bytes(bytes);
    assert_eq!(seed.bytes, bytes);
}
