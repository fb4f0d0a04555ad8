//! # Encounter Count Distribution
//!
//! Aggregates per-roll odds over a journey into "how many encounters"
//! figures for each encounter type.
//!
//! Every roll's odds are averaged and the journey is modelled as one binomial
//! per stream at that mean. When rolls have different odds this is an
//! approximation, not the exact mixture.

use super::{calc_prob_at_least, calculate_encounter_probabilities, prob_none, ProbabilitySet};
use crate::config::MAX_DISTRIBUTION_COUNT;
use crate::{EncounterContext, Tables};
use serde::{Deserialize, Serialize};

/// A leg of travel: a context rolled `quantity` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelInstance {
    #[serde(flatten)]
    pub context: EncounterContext,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl TravelInstance {
    pub fn new(context: EncounterContext, quantity: u32) -> Self {
        Self { context, quantity }
    }
}

/// Probability attached to an encounter count.
///
/// At `count == 0` this is the chance of no encounter at all; above zero it
/// is the chance of at least `count` encounters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountProbability {
    pub count: u32,
    pub probability: f64,
}

/// Encounter-count distributions for a whole journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDistribution {
    pub total_rolls: u32,
    /// Encounters of any type
    pub cumulative: Vec<CountProbability>,
    pub combat: Vec<CountProbability>,
    pub non_combat: Vec<CountProbability>,
    pub hazard: Vec<CountProbability>,
}

/// Series for `k = 0..=min(n, 20)` under `Binomial(n, p)`.
fn count_series(p: f64, n: u32) -> Vec<CountProbability> {
    (0..=n.min(MAX_DISTRIBUTION_COUNT))
        .map(|count| CountProbability {
            count,
            probability: if count == 0 {
                prob_none(p, n)
            } else {
                calc_prob_at_least(p, count, n)
            },
        })
        .collect()
}

/// Computes the encounter-count distribution over a list of travel legs.
///
/// # Examples
///
/// ```
/// use waylay::{calculate_encounter_probability_distribution, EncounterContext, Tables, TravelInstance};
///
/// let tables = Tables::default();
/// let journey = [TravelInstance::new(EncounterContext::new().with_biome("tundra"), 4)];
/// let distribution = calculate_encounter_probability_distribution(&journey, &tables);
/// assert_eq!(distribution.total_rolls, 4);
/// assert_eq!(distribution.cumulative.len(), 5);
/// ```
pub fn calculate_encounter_probability_distribution(
    instances: &[TravelInstance],
    tables: &Tables,
) -> EncounterDistribution {
    let mut total_rolls = 0u32;
    let mut sums = ProbabilitySet::default();
    for instance in instances {
        let set = calculate_encounter_probabilities(tables, &instance.context);
        let weight = f64::from(instance.quantity);
        sums.combat += set.combat * weight;
        sums.non_combat += set.non_combat * weight;
        sums.hazard += set.hazard * weight;
        sums.total += set.total * weight;
        total_rolls = total_rolls.saturating_add(instance.quantity);
    }

    let mean = |sum: f64| {
        if total_rolls == 0 {
            0.0
        } else {
            sum / f64::from(total_rolls)
        }
    };
    log::debug!(
        "{} rolls over {} legs, mean chance of any encounter {:.3}",
        total_rolls,
        instances.len(),
        mean(sums.total)
    );

    EncounterDistribution {
        total_rolls,
        cumulative: count_series(mean(sums.total), total_rolls),
        combat: count_series(mean(sums.combat), total_rolls),
        non_combat: count_series(mean(sums.non_combat), total_rolls),
        hazard: count_series(mean(sums.hazard), total_rolls),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BiomeOddsTable, DayNight, EncounterOdds};
    use std::collections::HashMap;

    fn tables_with(biome: &str, odds: EncounterOdds) -> Tables {
        let mut biomes = HashMap::new();
        biomes.insert(biome.to_string(), DayNight::both(odds));
        Tables {
            encounter_probabilities: BiomeOddsTable::new(biomes),
            ..Tables::default()
        }
    }

    fn leg(biome: &str, quantity: u32) -> TravelInstance {
        TravelInstance::new(EncounterContext::new().with_biome(biome), quantity)
    }

    #[test]
    fn test_single_roll_sanity() {
        let tables = tables_with("steppe", EncounterOdds::new(0.5, 0.0, 0.0));
        let distribution = calculate_encounter_probability_distribution(&[leg("steppe", 1)], &tables);
        assert_eq!(
            distribution.cumulative,
            vec![
                CountProbability { count: 0, probability: 0.5 },
                CountProbability { count: 1, probability: 0.5 },
            ]
        );
        assert_eq!(distribution.hazard[0].probability, 1.0);
        assert_eq!(distribution.hazard[1].probability, 0.0);
    }

    #[test]
    fn test_empty_journey() {
        let distribution = calculate_encounter_probability_distribution(&[], &Tables::default());
        let certain = vec![CountProbability { count: 0, probability: 1.0 }];
        assert_eq!(distribution.total_rolls, 0);
        assert_eq!(distribution.cumulative, certain);
        assert_eq!(distribution.combat, certain);
        assert_eq!(distribution.non_combat, certain);
        assert_eq!(distribution.hazard, certain);
    }

    #[test]
    fn test_mean_across_legs() {
        let mut biomes = HashMap::new();
        biomes.insert("steppe".to_string(), DayNight::both(EncounterOdds::new(0.4, 0.0, 0.0)));
        biomes.insert("glacier".to_string(), DayNight::both(EncounterOdds::new(0.1, 0.0, 0.0)));
        let tables = Tables {
            encounter_probabilities: BiomeOddsTable::new(biomes),
            ..Tables::default()
        };

        // One roll at 0.4 and one at 0.1 behave like two rolls at 0.25
        let journey = [leg("steppe", 1), leg("glacier", 1)];
        let distribution = calculate_encounter_probability_distribution(&journey, &tables);
        assert!((distribution.combat[0].probability - 0.5625).abs() < 1e-12);
        assert!((distribution.combat[2].probability - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn test_series_stops_at_twenty() {
        let tables = tables_with("steppe", EncounterOdds::new(0.1, 0.1, 0.1));
        let distribution = calculate_encounter_probability_distribution(&[leg("steppe", 50)], &tables);
        assert_eq!(distribution.total_rolls, 50);
        assert_eq!(distribution.cumulative.len(), 21);
        assert_eq!(distribution.cumulative.last().map(|c| c.count), Some(20));
    }

    #[test]
    fn test_instance_json_defaults_quantity() {
        let instance: TravelInstance =
            serde_json::from_str(r#"{"biome": "tundra", "time_of_day": "night"}"#).unwrap();
        assert_eq!(instance.quantity, 1);
        assert_eq!(instance.context.biome.as_deref(), Some("tundra"));
    }
}
