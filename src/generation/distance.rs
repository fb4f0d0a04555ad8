//! # Encounter Distance
//!
//! How far away an encounter starts, rolled from dice keyed by habitat.

use crate::{
    map_biome_to_habitat, DistanceDice, DistanceTable, EncounterContext, GenerationConfig, Generator,
    RandomSource, TravelMedium, WaylayError, WaylayResult,
};

/// Distance-table keys tried, in order, when travelling by sea.
const SEA_KEYS: [&str; 2] = ["Waterborne", "Open Water"];

/// Chooses the dice for a biome and travel medium.
///
/// Sea travel reads the waterborne entries first, with or without a biome.
/// Otherwise the biome's habitat is looked up, and anything unresolved
/// (including a missing biome) falls back to 2d6 x 10.
///
/// # Examples
///
/// ```
/// use waylay::{resolve_distance_dice, DistanceDice, DistanceTable, TravelMedium};
///
/// let table = DistanceTable::default();
/// assert_eq!(resolve_distance_dice(&table, Some("tundra"), None), DistanceDice::new(6, 6, 10));
/// assert_eq!(resolve_distance_dice(&table, None, None), DistanceDice::fallback());
/// assert_eq!(
///     resolve_distance_dice(&table, None, Some(TravelMedium::Sea)),
///     DistanceDice::new(8, 6, 10)
/// );
/// ```
pub fn resolve_distance_dice(
    table: &DistanceTable,
    biome: Option<&str>,
    travel_medium: Option<TravelMedium>,
) -> DistanceDice {
    if travel_medium == Some(TravelMedium::Sea) {
        if let Some(dice) = SEA_KEYS.iter().find_map(|key| table.get(key)) {
            return dice;
        }
    }

    let Some(biome) = biome else {
        return DistanceDice::fallback();
    };
    let habitat = map_biome_to_habitat(biome);
    table.get(habitat).unwrap_or_else(|| {
        log::warn!("No distance dice for habitat {}; using {}", habitat, DistanceDice::fallback());
        DistanceDice::fallback()
    })
}

/// Rolls a set of distance dice: the sum of the dice times the multiplier.
pub fn roll_dice<R>(dice: DistanceDice, rng: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    let sum = (0..dice.number_of_dice)
        .map(|_| rng.roll_die(dice.number_of_sides))
        .fold(0u32, |acc, roll| acc.saturating_add(roll));
    sum.saturating_mul(dice.multiplier)
}

/// Rolls the distance in feet at which an encounter begins.
pub fn roll_encounter_distance<R>(
    table: &DistanceTable,
    biome: Option<&str>,
    travel_medium: Option<TravelMedium>,
    rng: &mut R,
) -> u32
where
    R: RandomSource + ?Sized,
{
    let dice = resolve_distance_dice(table, biome, travel_medium);
    let distance = roll_dice(dice, rng);
    log::debug!("Encounter distance {} ft from {}", distance, dice);
    distance
}

/// Rolls encounter distances for a travel context.
pub struct DistanceRoller<'a> {
    table: &'a DistanceTable,
    context: &'a EncounterContext,
}

impl<'a> DistanceRoller<'a> {
    pub fn new(table: &'a DistanceTable, context: &'a EncounterContext) -> Self {
        Self { table, context }
    }

    pub fn dice(&self) -> DistanceDice {
        resolve_distance_dice(self.table, self.context.biome.as_deref(), self.context.travel_medium)
    }
}

impl Generator<u32> for DistanceRoller<'_> {
    fn generate<R>(&self, config: &GenerationConfig, rng: &mut R) -> WaylayResult<u32>
    where
        R: RandomSource + ?Sized,
    {
        let distance = roll_dice(self.dice(), rng);
        self.validate(&distance, config)?;
        Ok(distance)
    }

    fn validate(&self, content: &u32, _config: &GenerationConfig) -> WaylayResult<()> {
        let (low, high) = self.dice().range();
        if (low..=high).contains(content) {
            Ok(())
        } else {
            Err(WaylayError::GenerationFailed(format!(
                "distance {} outside {}..={}",
                content, low, high
            )))
        }
    }

    fn generator_type(&self) -> &'static str {
        "DistanceRoller"
    }
}
