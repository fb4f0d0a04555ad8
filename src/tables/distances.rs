//! # Encounter Distance Dice
//!
//! Dice expressions for how far away an encounter starts, keyed by habitat.

use crate::config::{FALLBACK_DISTANCE_DICE, FALLBACK_DISTANCE_MULTIPLIER, FALLBACK_DISTANCE_SIDES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A dice expression of the form `NdS x M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceDice {
    pub number_of_dice: u32,
    pub number_of_sides: u32,
    pub multiplier: u32,
}

impl DistanceDice {
    pub const fn new(number_of_dice: u32, number_of_sides: u32, multiplier: u32) -> Self {
        Self {
            number_of_dice,
            number_of_sides,
            multiplier,
        }
    }

    /// Dice used when nothing in the table applies.
    pub const fn fallback() -> Self {
        Self::new(
            FALLBACK_DISTANCE_DICE,
            FALLBACK_DISTANCE_SIDES,
            FALLBACK_DISTANCE_MULTIPLIER,
        )
    }

    /// Smallest and largest value these dice can produce.
    pub fn range(&self) -> (u32, u32) {
        let low = self.number_of_dice.saturating_mul(self.multiplier);
        let high = self
            .number_of_dice
            .saturating_mul(self.number_of_sides.max(1))
            .saturating_mul(self.multiplier);
        (low, high)
    }
}

impl fmt::Display for DistanceDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d{} x {}",
            self.number_of_dice, self.number_of_sides, self.multiplier
        )
    }
}

/// Distance dice keyed by habitat name ("Forest", "Open Water", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceTable {
    entries: HashMap<String, DistanceDice>,
}

impl DistanceTable {
    pub fn new(entries: HashMap<String, DistanceDice>) -> Self {
        Self { entries }
    }

    /// Dice for a habitat; names match exactly first, then ignoring ASCII case.
    pub fn get(&self, habitat: &str) -> Option<DistanceDice> {
        self.entries.get(habitat).copied().or_else(|| {
            self.entries
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(habitat))
                .map(|(_, dice)| *dice)
        })
    }
}

impl Default for DistanceTable {
    /// Sighting distances in feet by terrain.
    fn default() -> Self {
        const ROWS: [(&str, DistanceDice); 13] = [
            ("Arctic", DistanceDice::new(6, 6, 10)),
            ("Desert", DistanceDice::new(6, 6, 10)),
            ("Grassland", DistanceDice::new(6, 6, 10)),
            ("Coastal", DistanceDice::new(6, 6, 10)),
            ("Forest", DistanceDice::new(2, 8, 10)),
            ("Swamp", DistanceDice::new(2, 8, 10)),
            ("Hill", DistanceDice::new(2, 10, 10)),
            ("Mountain", DistanceDice::new(4, 10, 10)),
            ("Jungle", DistanceDice::new(2, 6, 10)),
            ("Underdark", DistanceDice::new(2, 6, 10)),
            ("Underwater", DistanceDice::new(2, 6, 5)),
            ("Open Water", DistanceDice::new(6, 6, 10)),
            ("Waterborne", DistanceDice::new(8, 6, 10)),
        ];

        Self::new(
            ROWS.iter()
                .map(|&(habitat, dice)| (habitat.to_string(), dice))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let table = DistanceTable::default();
        assert_eq!(table.get("Forest"), Some(DistanceDice::new(2, 8, 10)));
        assert_eq!(table.get("open water"), Some(DistanceDice::new(6, 6, 10)));
        assert_eq!(table.get("Urban"), None);
    }

    #[test]
    fn test_fallback_dice() {
        let dice = DistanceDice::fallback();
        assert_eq!(dice.to_string(), "2d6 x 10");
        assert_eq!(dice.range(), (20, 120));
    }
}
