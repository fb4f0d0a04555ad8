//! # Budget Module
//!
//! Turns a party and a difficulty into an XP window, and a group of creatures
//! into the adjusted XP that is measured against it.

pub mod bounds;
pub mod multiplier;
pub mod party;

pub use bounds::*;
pub use multiplier::*;
pub use party::*;
