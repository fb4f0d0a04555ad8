//! # Probability Module
//!
//! Per-roll encounter odds for a travel context, and the distribution of
//! encounter counts over a sequence of rolls.

pub mod binomial;
pub mod distribution;

pub use binomial::*;
pub use distribution::*;

use crate::{EncounterContext, EncounterOdds, Tables};
use serde::{Deserialize, Serialize};

/// Chance of each encounter type on a single roll, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySet {
    pub combat: f64,
    pub non_combat: f64,
    pub hazard: f64,
    /// Chance of any encounter: the sum of the three, capped at 1
    pub total: f64,
}

impl ProbabilitySet {
    fn from_odds(odds: EncounterOdds) -> Self {
        let odds = odds.clamped();
        Self {
            combat: odds.combat,
            non_combat: odds.non_combat,
            hazard: odds.hazard,
            total: (odds.combat + odds.non_combat + odds.hazard).min(1.0),
        }
    }
}

/// Computes the per-roll encounter odds for a travel context.
///
/// Base odds come from the biome at the context's time of day (day when
/// absent). The road modifier applies first, then the pace modifier on the
/// road-adjusted values; the results are clamped afterwards. A missing biome
/// row gives zero everywhere, and a missing modifier row leaves odds alone.
///
/// # Examples
///
/// ```
/// use waylay::{calculate_encounter_probabilities, EncounterContext, Road, Tables};
///
/// let tables = Tables::default();
/// let open = EncounterContext::new().with_biome("tundra");
/// let paved = open.clone().with_road(Road::Highway);
///
/// let wild = calculate_encounter_probabilities(&tables, &open);
/// let safe = calculate_encounter_probabilities(&tables, &paved);
/// assert!(safe.combat < wild.combat);
/// assert_eq!(calculate_encounter_probabilities(&tables, &EncounterContext::new()).total, 0.0);
/// ```
pub fn calculate_encounter_probabilities(tables: &Tables, context: &EncounterContext) -> ProbabilitySet {
    let time_of_day = context.resolved_time_of_day();

    let Some(biome) = context.biome.as_deref() else {
        log::debug!("No biome given; encounter odds are zero");
        return ProbabilitySet::default();
    };
    let Some(base) = tables.encounter_probabilities.get(biome) else {
        log::warn!("No encounter odds for biome '{}'", biome);
        return ProbabilitySet::default();
    };

    let mut odds = *base.get(time_of_day);
    if let Some(modifier) = context
        .road
        .and_then(|road| tables.road_modifiers.get(&road))
    {
        odds = modifier.get(time_of_day).apply(odds);
    }
    if let Some(modifier) = context
        .travel_pace
        .and_then(|pace| tables.pace_modifiers.get(&pace))
    {
        odds = modifier.get(time_of_day).apply(odds);
    }

    let set = ProbabilitySet::from_odds(odds);
    log::debug!(
        "Odds in {} at {}: combat {:.3}, non-combat {:.3}, hazard {:.3}, any {:.3}",
        biome,
        time_of_day,
        set.combat,
        set.non_combat,
        set.hazard,
        set.total
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BiomeOddsTable, DayNight, Modifier, Road, TimeOfDay, TravelPace};
    use std::collections::HashMap;

    fn single_biome(odds: EncounterOdds) -> Tables {
        let mut biomes = HashMap::new();
        biomes.insert("marsh".to_string(), DayNight::new(odds, odds));
        Tables {
            encounter_probabilities: BiomeOddsTable::new(biomes),
            ..Tables::default()
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_night_reads_night_column() {
        let tables = Tables::default();
        let night = EncounterContext::new()
            .with_biome("tundra")
            .with_time_of_day(TimeOfDay::Night);
        assert_eq!(calculate_encounter_probabilities(&tables, &night).combat, 0.24);
    }

    #[test]
    fn test_road_then_pace_compose() {
        let mut tables = single_biome(EncounterOdds::new(0.2, 0.1, 0.1));
        tables
            .road_modifiers
            .insert(Road::Highway, DayNight::both(Modifier::relative(-0.5, 0.0, 0.0)));
        tables
            .pace_modifiers
            .insert(TravelPace::Fast, DayNight::both(Modifier::absolute(0.1, 0.0, 0.0)));

        let context = EncounterContext::new()
            .with_biome("marsh")
            .with_road(Road::Highway)
            .with_travel_pace(TravelPace::Fast);
        let set = calculate_encounter_probabilities(&tables, &context);
        // 0.2 halved to 0.1, then +0.1
        assert!(close(set.combat, 0.2));
        assert!(close(set.total, 0.4));
    }

    #[test]
    fn test_clamping_and_total_cap() {
        let mut tables = single_biome(EncounterOdds::new(0.6, 0.5, 0.05));
        tables
            .road_modifiers
            .insert(Road::Byway, DayNight::both(Modifier::absolute(0.7, 0.0, -0.2)));
        let context = EncounterContext::new().with_biome("marsh").with_road(Road::Byway);
        let set = calculate_encounter_probabilities(&tables, &context);
        assert_eq!(set.combat, 1.0);
        assert_eq!(set.hazard, 0.0);
        assert_eq!(set.total, 1.0);
    }

    #[test]
    fn test_unknown_biome_is_zero() {
        let tables = Tables::default();
        let context = EncounterContext::new().with_biome("astral sea").with_road(Road::Highway);
        assert_eq!(calculate_encounter_probabilities(&tables, &context), ProbabilitySet::default());
    }

    #[test]
    fn test_missing_modifier_row_is_neutral() {
        let mut tables = single_biome(EncounterOdds::new(0.2, 0.1, 0.1));
        tables.pace_modifiers.clear();
        let context = EncounterContext::new()
            .with_biome("Marsh")
            .with_travel_pace(TravelPace::Slow);
        let set = calculate_encounter_probabilities(&tables, &context);
        assert_eq!(set.combat, 0.2);
    }
}
