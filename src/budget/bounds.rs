//! # XP Budget
//!
//! The adjusted-XP window an encounter of a given difficulty should land in.

use crate::config::ABSURD_UPPER_FACTOR;
use crate::{Difficulty, ThresholdTable};
use serde::{Deserialize, Serialize};

/// Acceptable adjusted-XP range, inclusive at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpBudget {
    pub lower_bound: u32,
    pub upper_bound: u32,
}

impl XpBudget {
    pub fn new(lower_bound: u32, upper_bound: u32) -> Self {
        Self {
            lower_bound,
            upper_bound: upper_bound.max(lower_bound),
        }
    }

    /// Whether an adjusted XP figure falls inside the window.
    pub fn contains(&self, adjusted_xp: f64) -> bool {
        adjusted_xp >= f64::from(self.lower_bound) && adjusted_xp <= f64::from(self.upper_bound)
    }

    /// Whether an adjusted XP figure goes past the top of the window.
    pub fn exceeded_by(&self, adjusted_xp: f64) -> bool {
        adjusted_xp > f64::from(self.upper_bound)
    }
}

/// Computes the XP window for a party and difficulty.
///
/// The lower bound is this tier's per-character threshold times the party size
/// (medium when the row lacks the tier). The upper bound is the next tier's
/// threshold times the party size (deadly when the row lacks it). The last
/// tier has no successor, so its upper bound is a hundred times its lower one.
///
/// # Examples
///
/// ```
/// use waylay::{compute_xp_bounds, Difficulty, ThresholdTable};
///
/// let table = ThresholdTable::default();
/// let budget = compute_xp_bounds(&table, 5.0, 4, Difficulty::Medium);
/// assert_eq!(budget.lower_bound, 2_000);
/// assert_eq!(budget.upper_bound, 3_000);
/// ```
pub fn compute_xp_bounds(
    thresholds: &ThresholdTable,
    average_level: f64,
    party_size: u32,
    difficulty: Difficulty,
) -> XpBudget {
    let Some(row) = thresholds.row_for_level(average_level) else {
        log::warn!("No XP threshold rows defined; budget is empty");
        return XpBudget::default();
    };

    let per_character = row
        .threshold(difficulty)
        .or_else(|| row.threshold(Difficulty::Medium))
        .unwrap_or(0);
    let lower_bound = per_character.saturating_mul(party_size);

    let upper_bound = match difficulty.next() {
        None => lower_bound.saturating_mul(ABSURD_UPPER_FACTOR),
        Some(next) => row
            .threshold(next)
            .or_else(|| row.threshold(Difficulty::Deadly))
            .map_or(lower_bound, |t| t.saturating_mul(party_size)),
    };

    log::debug!(
        "XP budget for level {:.2} x{} at {}: [{}, {}]",
        average_level,
        party_size,
        difficulty,
        lower_bound,
        upper_bound
    );

    XpBudget::new(lower_bound, upper_bound)
}
