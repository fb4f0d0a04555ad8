//! # Utilities Module
//!
//! Random draw helpers shared by the generation systems.

pub mod random;

pub use random::*;
