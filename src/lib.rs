//! # Waylay
//!
//! Balanced combat encounters and travel encounter odds for tabletop play.
//!
//! ## Architecture Overview
//!
//! Waylay is a purely computational engine. Callers hand it reference data and
//! receive rosters or probability figures back; nothing is persisted and no
//! I/O happens outside of the explicit loaders.
//!
//! - **Tables**: typed lookup tables (CR/XP, XP thresholds, group multipliers,
//!   encounter odds, distance dice), overridable from JSON
//! - **Budget**: party statistics, the XP window for a difficulty and the
//!   group-size multiplier engine
//! - **Generation**: catalog filtering, the simple and leader/follower fills,
//!   the end-to-end encounter generator and the distance roller
//! - **Probability**: per-roll encounter odds and the binomial distribution over
//!   a sequence of travel rolls
//!
//! Every random draw goes through [`RandomSource`], so a seeded
//! [`rand::rngs::StdRng`] makes generation reproducible.

pub mod budget;
pub mod context;
pub mod generation;
pub mod probability;
pub mod tables;
pub mod utils;

pub use budget::*;
pub use context::*;
pub use generation::*;
pub use probability::*;
pub use tables::*;
pub use utils::*;

/// Core error type for the Waylay engine.
#[derive(thiserror::Error, Debug)]
pub enum WaylayError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Party description is invalid
    #[error("Invalid party: {0}")]
    InvalidParty(String),

    /// Caller supplied a value that cannot be parsed or used
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generation produced a roster that breaks its invariants
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Waylay codebase.
pub type WaylayResult<T> = Result<T, WaylayError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine-wide constants.
pub mod config {
    /// Largest monster count the multiplier table has a column for
    pub const MAX_MONSTER_COUNT: u32 = 15;

    /// Largest party size the multiplier table has a row for
    pub const MAX_PARTY_SIZE: u32 = 6;

    /// Highest encounter count reported by a probability distribution
    pub const MAX_DISTRIBUTION_COUNT: u32 = 20;

    /// Upper bound factor applied to the lower bound of the last difficulty tier
    pub const ABSURD_UPPER_FACTOR: u32 = 100;

    /// Lowest and highest character level accepted in a party
    pub const MIN_CHARACTER_LEVEL: u32 = 1;
    pub const MAX_CHARACTER_LEVEL: u32 = 20;

    /// Distance dice used when no table entry applies (2d6 x 10 feet)
    pub const FALLBACK_DISTANCE_DICE: u32 = 2;
    pub const FALLBACK_DISTANCE_SIDES: u32 = 6;
    pub const FALLBACK_DISTANCE_MULTIPLIER: u32 = 10;
}
