//! # Random Draws
//!
//! The single seam every random decision in the engine goes through.

use crate::GenerationConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random draws made during generation.
///
/// Leader picks, relationship picks, the simple-fill monster pick and distance
/// dice all call into this trait. It is implemented for every [`rand::Rng`],
/// so a seeded [`StdRng`] gives reproducible results; tests may also script
/// exact draws with their own implementation.
pub trait RandomSource {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Rolls one die, returning a value in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.gen_range(1..=sides.max(1))
    }
}

/// Picks one element uniformly at random, or `None` for an empty slice.
///
/// No draw is consumed when the slice is empty.
pub fn choose<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(rng.pick_index(items.len()))
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}
