//! # Adjusted XP
//!
//! Scales raw creature XP by the group-size multiplier, which is what budget
//! bounds are compared against.

use crate::MultiplierTable;
use serde::{Deserialize, Serialize};

/// Raw and adjusted XP of a group of creatures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct XpTally {
    /// Sum of creature XP before the multiplier
    pub total_xp: u64,
    /// `total_xp` times the group multiplier
    pub adjusted_xp: f64,
    /// Number of creatures counted
    pub creature_count: u32,
}

/// Adjusted XP of a flat list of per-creature XP values.
///
/// # Examples
///
/// ```
/// use waylay::{adjusted_xp_from_list, MultiplierTable};
///
/// let table = MultiplierTable::default();
/// assert_eq!(adjusted_xp_from_list(&table, 4, &[200, 200]), 600.0);
/// assert_eq!(adjusted_xp_from_list(&table, 4, &[]), 0.0);
/// ```
pub fn adjusted_xp_from_list(table: &MultiplierTable, party_size: u32, xp_values: &[u32]) -> f64 {
    let total: u64 = xp_values.iter().map(|&xp| u64::from(xp)).sum();
    let count = u32::try_from(xp_values.len()).unwrap_or(u32::MAX);
    total as f64 * table.multiplier(party_size, count)
}

/// Adjusted XP of `(quantity, xp)` groups; also reports the raw total.
///
/// # Examples
///
/// ```
/// use waylay::{adjusted_xp_of_creatures, MultiplierTable};
///
/// let table = MultiplierTable::default();
/// let tally = adjusted_xp_of_creatures(&table, 4, &[(1, 1_100), (3, 200)]);
/// assert_eq!(tally.total_xp, 1_700);
/// assert_eq!(tally.creature_count, 4);
/// assert_eq!(tally.adjusted_xp, 3_400.0);
/// ```
pub fn adjusted_xp_of_creatures(
    table: &MultiplierTable,
    party_size: u32,
    groups: &[(u32, u32)],
) -> XpTally {
    let (creature_count, total_xp) = groups.iter().fold(
        (0u32, 0u64),
        |(count, total), &(quantity, xp)| {
            (
                count.saturating_add(quantity),
                total + u64::from(quantity) * u64::from(xp),
            )
        },
    );

    XpTally {
        total_xp,
        adjusted_xp: total_xp as f64 * table.multiplier(party_size, creature_count),
        creature_count,
    }
}

/// A growing list of creature XP values with its running sum.
///
/// Equivalent to calling [`adjusted_xp_from_list`] on the list after every
/// change, without re-summing it each time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XpPool {
    values: Vec<u32>,
    total: u64,
}

impl XpPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool holding the given XP values.
    pub fn with_values(values: impl IntoIterator<Item = u32>) -> Self {
        let mut pool = Self::new();
        for xp in values {
            pool.push(xp);
        }
        pool
    }

    /// Adds one creature's XP.
    pub fn push(&mut self, xp: u32) {
        self.values.push(xp);
        self.total += u64::from(xp);
    }

    /// Removes the most recently added XP value.
    pub fn pop(&mut self) -> Option<u32> {
        let xp = self.values.pop()?;
        self.total -= u64::from(xp);
        Some(xp)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// XP values in insertion order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Sum of the pool times the multiplier for its size.
    pub fn adjusted_xp(&self, table: &MultiplierTable, party_size: u32) -> f64 {
        let count = u32::try_from(self.values.len()).unwrap_or(u32::MAX);
        self.total as f64 * table.multiplier(party_size, count)
    }
}
