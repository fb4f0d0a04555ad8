//! # Group Multipliers
//!
//! Encounter multipliers indexed by party size and number of monsters.

use crate::config::MAX_MONSTER_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cell of the multiplier table as it appears in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierEntry {
    pub party_size: u32,
    pub number_of_monsters: u32,
    pub multiplier: f64,
}

/// Multiplier lookup keyed by `(party_size, number_of_monsters)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<MultiplierEntry>", into = "Vec<MultiplierEntry>")]
pub struct MultiplierTable {
    cells: HashMap<(u32, u32), f64>,
}

impl MultiplierTable {
    pub fn new(entries: impl IntoIterator<Item = MultiplierEntry>) -> Self {
        Self {
            cells: entries
                .into_iter()
                .map(|e| ((e.party_size, e.number_of_monsters), e.multiplier))
                .collect(),
        }
    }

    /// Raw cell lookup without clamping or defaults.
    pub fn lookup(&self, party_size: u32, number_of_monsters: u32) -> Option<f64> {
        self.cells.get(&(party_size, number_of_monsters)).copied()
    }

    /// Multiplier for a party facing `monster_count` monsters.
    ///
    /// The count is clamped to `1..=15`, so an empty roster reads the
    /// single-monster column. Missing cells yield `1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::MultiplierTable;
    ///
    /// let table = MultiplierTable::default();
    /// assert_eq!(table.multiplier(4, 2), 1.5);
    /// assert_eq!(table.multiplier(4, 40), 4.0);
    /// assert_eq!(table.multiplier(9, 3), 1.0);
    /// ```
    pub fn multiplier(&self, party_size: u32, monster_count: u32) -> f64 {
        let count = monster_count.clamp(1, MAX_MONSTER_COUNT);
        self.lookup(party_size, count).unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<MultiplierEntry>> for MultiplierTable {
    fn from(entries: Vec<MultiplierEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<MultiplierTable> for Vec<MultiplierEntry> {
    fn from(table: MultiplierTable) -> Self {
        let mut entries: Vec<MultiplierEntry> = table
            .cells
            .into_iter()
            .map(|((party_size, number_of_monsters), multiplier)| MultiplierEntry {
                party_size,
                number_of_monsters,
                multiplier,
            })
            .collect();
        entries.sort_by_key(|e| (e.party_size, e.number_of_monsters));
        entries
    }
}

impl Default for MultiplierTable {
    /// Canonical multipliers for parties of one to six characters.
    fn default() -> Self {
        // Columns are monster counts 1 through 15
        const SMALL_PARTY: [f64; 15] = [
            1.5, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 5.0,
        ];
        const STANDARD_PARTY: [f64; 15] = [
            1.0, 1.5, 2.0, 2.0, 2.0, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0,
        ];
        const LARGE_PARTY: [f64; 15] = [
            0.5, 1.0, 1.5, 1.5, 1.5, 1.5, 2.0, 2.0, 2.0, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0,
        ];

        let rows: [(u32, &[f64; 15]); 6] = [
            (1, &SMALL_PARTY),
            (2, &SMALL_PARTY),
            (3, &STANDARD_PARTY),
            (4, &STANDARD_PARTY),
            (5, &STANDARD_PARTY),
            (6, &LARGE_PARTY),
        ];

        Self::new(rows.iter().flat_map(|&(party_size, columns)| {
            columns
                .iter()
                .zip(1u32..)
                .map(move |(&multiplier, number_of_monsters)| MultiplierEntry {
                    party_size,
                    number_of_monsters,
                    multiplier,
                })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table_is_complete() {
        let table = MultiplierTable::default();
        assert_eq!(table.len(), 90);
        for party_size in 1..=6 {
            for count in 1..=15 {
                assert!(
                    table.lookup(party_size, count).is_some(),
                    "missing cell ({}, {})",
                    party_size,
                    count
                );
            }
        }
    }

    #[test]
    fn test_canonical_values() {
        let table = MultiplierTable::default();
        assert_eq!(table.multiplier(1, 1), 1.5);
        assert_eq!(table.multiplier(2, 15), 5.0);
        assert_eq!(table.multiplier(3, 7), 2.5);
        assert_eq!(table.multiplier(5, 11), 3.0);
        assert_eq!(table.multiplier(6, 1), 0.5);
        assert_eq!(table.multiplier(6, 15), 3.0);
    }

    #[test]
    fn test_count_is_clamped() {
        let table = MultiplierTable::default();
        assert_eq!(table.multiplier(4, 0), table.multiplier(4, 1));
        assert_eq!(table.multiplier(4, 99), table.multiplier(4, 15));
    }

    #[test]
    fn test_missing_cell_defaults_to_one() {
        let table = MultiplierTable::new(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.multiplier(4, 4), 1.0);
        assert_eq!(MultiplierTable::default().multiplier(0, 3), 1.0);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"[{"party_size": 4, "number_of_monsters": 2, "multiplier": 1.75}]"#;
        let table: MultiplierTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.multiplier(4, 2), 1.75);

        let back = serde_json::to_value(&table).unwrap();
        assert_eq!(back[0]["number_of_monsters"], 2);
    }
}
