//! # Tables Module
//!
//! Typed lookup tables the engine reads from.
//!
//! Every table has a canonical default. A JSON document may replace any subset
//! of them; tables it leaves out keep their defaults, which is how per-group
//! house rules (different encounter odds, gentler roads) are layered on.

pub mod challenge;
pub mod distances;
pub mod multipliers;
pub mod odds;
pub mod thresholds;

pub use challenge::*;
pub use distances::*;
pub use multipliers::*;
pub use odds::*;
pub use thresholds::*;

use crate::WaylayResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Every lookup table the engine needs, bundled together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub challenge_ratings: ChallengeRatingTable,
    pub xp_thresholds: ThresholdTable,
    pub multipliers: MultiplierTable,
    pub encounter_probabilities: BiomeOddsTable,
    pub road_modifiers: RoadModifiers,
    pub pace_modifiers: PaceModifiers,
    pub distances: DistanceTable,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            challenge_ratings: ChallengeRatingTable::default(),
            xp_thresholds: ThresholdTable::default(),
            multipliers: MultiplierTable::default(),
            encounter_probabilities: BiomeOddsTable::default(),
            road_modifiers: default_road_modifiers(),
            pace_modifiers: default_pace_modifiers(),
            distances: DistanceTable::default(),
        }
    }
}

impl Tables {
    /// Parses tables from JSON, keeping defaults for any table left out.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::{Road, Tables, TimeOfDay};
    ///
    /// let json = r#"{
    ///     "road_modifiers": {
    ///         "highway": {
    ///             "day":   {"non_combat": 0.0, "combat": -0.9, "hazard": 0.0, "percent_type": 0},
    ///             "night": {"non_combat": 0.0, "combat": -0.5, "hazard": 0.0, "percent_type": 0}
    ///         }
    ///     }
    /// }"#;
    /// let tables = Tables::from_json_str(json).unwrap();
    /// assert_eq!(tables.road_modifiers[&Road::Highway].get(TimeOfDay::Day).combat, -0.9);
    /// assert_eq!(tables.challenge_ratings.xp_for(1.0), 200);
    /// ```
    pub fn from_json_str(json: &str) -> WaylayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads tables from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> WaylayResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading tables from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// XP for a challenge rating, using this bundle's CR table.
    pub fn xp_for(&self, cr: f64) -> u32 {
        self.challenge_ratings.xp_for(cr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Road, TravelPace};

    #[test]
    fn test_empty_document_is_default() {
        let tables = Tables::from_json_str("{}").unwrap();
        assert_eq!(tables, Tables::default());
    }

    #[test]
    fn test_partial_override_keeps_other_tables() {
        let json = r#"{"multipliers": [{"party_size": 4, "number_of_monsters": 1, "multiplier": 9.0}]}"#;
        let tables = Tables::from_json_str(json).unwrap();
        assert_eq!(tables.multipliers.multiplier(4, 1), 9.0);
        assert_eq!(tables.multipliers.multiplier(4, 2), 1.0);
        assert_eq!(tables.road_modifiers.len(), Road::ALL.len());
        assert_eq!(tables.pace_modifiers.len(), TravelPace::ALL.len());
    }

    #[test]
    fn test_round_trip_through_json() {
        let tables = Tables::default();
        let json = serde_json::to_string(&tables).unwrap();
        let back = Tables::from_json_str(&json).unwrap();
        assert_eq!(back, tables);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tables::from_json_str("{\"multipliers\": 3}").is_err());
    }
}
