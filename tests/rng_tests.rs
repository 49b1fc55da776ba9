//! RNG tests for durak-engine
//!
//! Эти тесты проверяют:
//! - детерминированность DeterministicRng
//! - различие seed → различие колод
//! - корректную работу shuffle() (перестановка без потерь)
//! - равномерность перестановок
//! - ConfiguredRng: seed из конфига даёт тот же поток, что и DeterministicRng

use std::collections::HashMap;

use durak_engine::domain::deck::Deck;
use durak_engine::engine::RandomSource;
use durak_engine::infra::{ConfiguredRng, DeterministicRng, SystemRng};

fn make_u64_seed(a: u64) -> [u8; 32] {
    let mut s = [0u8; 32];
    s[..8].copy_from_slice(&a.to_le_bytes());
    s
}

fn fresh_deck() -> Deck {
    let mut next = 0;
    Deck::durak_36(|| {
        next += 1;
        next
    })
}

//
// TEST 1 – same seed, same shuffle
//
#[test]
fn deterministic_rng_same_seed_same_shuffle() {
    let mut r1 = DeterministicRng::from_seed(make_u64_seed(123));
    let mut r2 = DeterministicRng::from_seed(make_u64_seed(123));

    let mut a = fresh_deck();
    let mut b = fresh_deck();

    r1.shuffle(&mut a.cards);
    r2.shuffle(&mut b.cards);

    assert_eq!(a, b, "Same seed must produce identical shuffle");
}

//
// TEST 2 – different seeds produce different shuffle
//
#[test]
fn deterministic_rng_different_seed_different_shuffle() {
    let mut r1 = DeterministicRng::from_u64(1);
    let mut r2 = DeterministicRng::from_u64(2);

    let mut a = fresh_deck();
    let mut b = fresh_deck();

    r1.shuffle(&mut a.cards);
    r2.shuffle(&mut b.cards);

    assert_ne!(a, b);
}

//
// TEST 3 – shuffle is a permutation
//
#[test]
fn shuffle_keeps_all_cards() {
    let mut rng = SystemRng;
    let mut deck = fresh_deck();
    rng.shuffle(&mut deck.cards);

    let mut ids: Vec<u64> = deck.cards.iter().map(|c| c.id).collect();
    ids.sort();
    assert_eq!(ids, (1..=36).collect::<Vec<u64>>());
}

//
// TEST 4 – empty and single-element slices
//
#[test]
fn shuffle_handles_tiny_slices() {
    let mut rng = DeterministicRng::from_u64(9);
    let mut empty: Vec<u8> = Vec::new();
    rng.shuffle(&mut empty);
    assert!(empty.is_empty());

    let mut one = vec![42];
    rng.shuffle(&mut one);
    assert_eq!(one, vec![42]);
}

//
// TEST 5 – pick_index stays in range
//
#[test]
fn pick_index_in_range() {
    let mut rng = DeterministicRng::from_u64(5);
    let mut seen = [false; 2];
    for _ in 0..1_000 {
        let i = rng.pick_index(2);
        assert!(i < 2);
        seen[i] = true;
    }
    assert!(seen[0] && seen[1], "оба исхода должны встречаться");

    let mut sys = SystemRng;
    for _ in 0..100 {
        assert!(sys.pick_index(7) < 7);
    }
}

//
// TEST 6 – uniformity over permutations of 3 elements
//
#[test]
fn shuffle_is_roughly_uniform() {
    let mut rng = DeterministicRng::from_u64(2024);
    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();

    for _ in 0..6_000 {
        let mut v = [0u8, 1, 2];
        rng.shuffle(&mut v);
        *counts.entry(v).or_default() += 1;
    }

    assert_eq!(counts.len(), 6, "все 6 перестановок должны встречаться");
    for (perm, n) in counts {
        assert!((800..=1_200).contains(&n), "{perm:?}: {n}");
    }
}

//
// TEST 7 – ConfiguredRng
//
#[test]
fn configured_rng_with_seed_is_deterministic() {
    let mut seeded = ConfiguredRng::new(Some(77));
    let mut reference = DeterministicRng::from_u64(77);

    let mut a = fresh_deck();
    let mut b = fresh_deck();
    seeded.shuffle(&mut a.cards);
    reference.shuffle(&mut b.cards);
    assert_eq!(a, b);

    assert!(matches!(ConfiguredRng::new(None), ConfiguredRng::System(_)));
}
