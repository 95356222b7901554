//! Injectable randomness.
//!
//! Dice, shuffles and robber steals are the only nondeterminism in the engine.
//! They all go through [`Randomness`] so a match can be seeded for replays or
//! driven with scripted dice in tests.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::VecDeque;
use std::fmt;

/// Source of random numbers used by the engine.
///
/// Any [`RngCore`] works with `rand`'s slice helpers, so shuffles and random
/// picks go through `SliceRandom` directly. Only the dice are overridable.
pub trait Randomness: RngCore + fmt::Debug {
    /// Roll one six-sided die (1-6)
    fn roll_die(&mut self) -> u8 {
        self.gen_range(1..=6)
    }
}

/// Randomness backed by a seedable standard generator
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic generator for replays and tests
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, otherwise from entropy
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl Randomness for SeededRandom {}

/// Plays back queued die faces, falling back to a seeded generator once the
/// queue runs dry. Shuffles and picks always use the seeded generator.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    dice: VecDeque<u8>,
    fallback: SeededRandom,
}

impl ScriptedRandom {
    /// Queue the given die faces (each must be 1-6)
    pub fn new(dice: impl IntoIterator<Item = u8>) -> Self {
        let dice: VecDeque<u8> = dice.into_iter().collect();
        assert!(
            dice.iter().all(|d| (1..=6).contains(d)),
            "scripted die faces must be between 1 and 6"
        );
        Self {
            dice,
            fallback: SeededRandom::new(0),
        }
    }

    /// Use `seed` for everything that is not a scripted die
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.fallback = SeededRandom::new(seed);
        self
    }

    /// Queue more die faces after construction
    pub fn push_dice(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.dice.extend(faces);
    }
}

impl RngCore for ScriptedRandom {
    fn next_u32(&mut self) -> u32 {
        self.fallback.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.fallback.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fallback.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fallback.try_fill_bytes(dest)
    }
}

impl Randomness for ScriptedRandom {
    fn roll_die(&mut self) -> u8 {
        self.dice
            .pop_front()
            .unwrap_or_else(|| self.fallback.roll_die())
    }
}
