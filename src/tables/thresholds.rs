//! # XP Thresholds
//!
//! Per-character XP thresholds for each difficulty tier, by character level.

use crate::{WaylayError, WaylayResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested encounter difficulty, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Trivial,
    Easy,
    Medium,
    Hard,
    Deadly,
    Absurd,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Trivial,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Deadly,
        Difficulty::Absurd,
    ];

    /// The next harder tier, or `None` for the last one.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::Difficulty;
    ///
    /// assert_eq!(Difficulty::Medium.next(), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::Absurd.next(), None);
    /// ```
    pub fn next(self) -> Option<Difficulty> {
        let index = Self::ALL.iter().position(|&d| d == self)?;
        Self::ALL.get(index + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Trivial => "trivial",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Deadly => "deadly",
            Difficulty::Absurd => "absurd",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = WaylayError;

    fn from_str(s: &str) -> WaylayResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WaylayError::InvalidInput(format!("unknown difficulty: {}", s)))
    }
}

/// Thresholds for one character level. Override tables may leave tiers out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRow {
    pub char_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trivial: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadly: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absurd: Option<u32>,
}

impl ThresholdRow {
    /// Creates a fully populated row; tiers in [`Difficulty::ALL`] order.
    pub fn new(char_level: u32, tiers: [u32; 6]) -> Self {
        let [trivial, easy, medium, hard, deadly, absurd] = tiers;
        Self {
            char_level,
            trivial: Some(trivial),
            easy: Some(easy),
            medium: Some(medium),
            hard: Some(hard),
            deadly: Some(deadly),
            absurd: Some(absurd),
        }
    }

    /// Per-character threshold for a tier, if the row defines it.
    pub fn threshold(&self, difficulty: Difficulty) -> Option<u32> {
        match difficulty {
            Difficulty::Trivial => self.trivial,
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Deadly => self.deadly,
            Difficulty::Absurd => self.absurd,
        }
    }
}

/// Threshold rows indexed by character level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    rows: Vec<ThresholdRow>,
}

impl ThresholdTable {
    /// Creates a table from per-level rows.
    pub fn new(rows: Vec<ThresholdRow>) -> Self {
        Self { rows }
    }

    /// Rows of the table.
    pub fn rows(&self) -> &[ThresholdRow] {
        &self.rows
    }

    /// Row for the floor of `average_level`, or the lowest defined level.
    pub fn row_for_level(&self, average_level: f64) -> Option<&ThresholdRow> {
        let level = average_level.floor();
        self.rows
            .iter()
            .find(|row| f64::from(row.char_level) == level)
            .or_else(|| self.rows.iter().min_by_key(|row| row.char_level))
    }
}

impl Default for ThresholdTable {
    /// Canonical thresholds for levels 1 to 20.
    fn default() -> Self {
        const ROWS: [[u32; 6]; 20] = [
            [8, 25, 50, 75, 100, 125],
            [17, 50, 100, 150, 200, 250],
            [25, 75, 150, 225, 400, 575],
            [42, 125, 250, 375, 500, 625],
            [83, 250, 500, 750, 1_100, 1_450],
            [100, 300, 600, 900, 1_400, 1_900],
            [117, 350, 750, 1_100, 1_700, 2_300],
            [150, 450, 900, 1_400, 2_100, 2_800],
            [183, 550, 1_100, 1_600, 2_400, 3_200],
            [200, 600, 1_200, 1_900, 2_800, 3_700],
            [267, 800, 1_600, 2_400, 3_600, 4_800],
            [333, 1_000, 2_000, 3_000, 4_500, 6_000],
            [367, 1_100, 2_200, 3_400, 5_100, 6_800],
            [417, 1_250, 2_500, 3_800, 5_700, 7_600],
            [467, 1_400, 2_800, 4_300, 6_400, 8_500],
            [533, 1_600, 3_200, 4_800, 7_200, 9_600],
            [667, 2_000, 3_900, 5_900, 8_800, 11_700],
            [700, 2_100, 4_200, 6_300, 9_500, 12_700],
            [800, 2_400, 4_900, 7_300, 10_900, 14_500],
            [933, 2_800, 5_700, 8_500, 12_700, 16_900],
        ];

        Self::new(
            ROWS.iter()
                .zip(1u32..)
                .map(|(tiers, level)| ThresholdRow::new(level, *tiers))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_order() {
        let mut sorted = Difficulty::ALL;
        sorted.sort();
        assert_eq!(sorted, Difficulty::ALL);
        assert_eq!(Difficulty::Trivial.next(), Some(Difficulty::Easy));
        assert_eq!(Difficulty::Deadly.next(), Some(Difficulty::Absurd));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("legendary".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_row_lookup_floors_level() {
        let table = ThresholdTable::default();
        assert_eq!(table.row_for_level(5.75).unwrap().char_level, 5);
        assert_eq!(table.row_for_level(20.0).unwrap().char_level, 20);
    }

    #[test]
    fn test_row_lookup_falls_back_to_lowest_level() {
        let table = ThresholdTable::default();
        assert_eq!(table.row_for_level(0.5).unwrap().char_level, 1);
        assert_eq!(table.row_for_level(27.0).unwrap().char_level, 1);
        assert!(ThresholdTable::new(Vec::new()).row_for_level(3.0).is_none());
    }

    #[test]
    fn test_partial_row_deserializes() {
        let row: ThresholdRow = serde_json::from_str(r#"{"char_level": 3, "medium": 150}"#).unwrap();
        assert_eq!(row.threshold(Difficulty::Medium), Some(150));
        assert_eq!(row.threshold(Difficulty::Hard), None);
    }
}
