//! # Generation Module
//!
//! Everything that turns reference data and a few random draws into content:
//! the creature catalog, the monster filter, the roster strategies, the
//! end-to-end encounter generator and the distance roller.
//!
//! Generators share the [`Generator`] trait and read their knobs from a
//! [`GenerationConfig`]; the random source is passed in separately so callers
//! control reproducibility.

pub mod catalog;
pub mod distance;
pub mod encounters;
pub mod filter;
pub mod selection;

pub use catalog::*;
pub use distance::*;
pub use encounters::*;
pub use filter::*;
pub use selection::*;

use crate::{RandomSource, WaylayResult};
use serde::{Deserialize, Serialize};

/// How the encounter generator assembles a roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Leader/follower fill when the picked leader has subordinates, simple fill otherwise
    #[default]
    Auto,
    /// Always repeat a single creature
    Simple,
    /// Always build around a leader
    LeaderFollower,
}

impl std::str::FromStr for SelectionStrategy {
    type Err = crate::WaylayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "auto" => Ok(SelectionStrategy::Auto),
            "simple" => Ok(SelectionStrategy::Simple),
            "leader_follower" | "leader" => Ok(SelectionStrategy::LeaderFollower),
            other => Err(crate::WaylayError::InvalidInput(format!(
                "unknown selection strategy '{}'",
                other
            ))),
        }
    }
}

/// Configuration for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Roster assembly strategy
    pub strategy: SelectionStrategy,
}

impl GenerationConfig {
    /// Creates a configuration with the automatic strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::{GenerationConfig, SelectionStrategy};
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.strategy, SelectionStrategy::Auto);
    /// assert_eq!(config, GenerationConfig::default());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            strategy: SelectionStrategy::Auto,
        }
    }

    /// Creates a configuration for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(seed)
    }

    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for content generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate<R>(&self, config: &GenerationConfig, rng: &mut R) -> WaylayResult<T>
    where
        R: RandomSource + ?Sized;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> WaylayResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}
