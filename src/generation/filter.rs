//! # Monster Filter
//!
//! Narrows the catalog to creatures usable for a budget and a travel context.

use crate::{Catalog, ChallengeRatingTable, CreatureStat, EncounterContext, TimeOfDay, TravelMedium};

/// Maps a free-form biome name to one of the catalog's habitat names.
///
/// Matching is by substring, ignoring case, and the first rule that applies
/// wins. Unrecognised biomes map to `"Forest"`.
///
/// # Examples
///
/// ```
/// use waylay::map_biome_to_habitat;
///
/// assert_eq!(map_biome_to_habitat("Tundra"), "Arctic");
/// assert_eq!(map_biome_to_habitat("deserts & xeric shrublands"), "Desert");
/// assert_eq!(map_biome_to_habitat("mangroves"), "Swamp");
/// assert_eq!(map_biome_to_habitat("lava fields"), "Forest");
/// ```
pub fn map_biome_to_habitat(biome: &str) -> &'static str {
    const RULES: &[(&[&str], &str)] = &[
        (&["tundra", "boreal", "taiga", "rock and ice"], "Arctic"),
        (&["desert", "xeric"], "Desert"),
        (&["forest"], "Forest"),
        (&["grassland", "savanna"], "Grassland"),
        (&["montane", "mountain"], "Mountain"),
        (&["mangrove"], "Swamp"),
        (&["flooded"], "Coastal"),
        (&["mediterranean"], "Forest"),
    ];

    let biome = biome.to_lowercase();
    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| biome.contains(needle)))
        .map_or("Forest", |&(_, habitat)| habitat)
}

/// Context values the filter narrows by. Absent values skip their stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria<'a> {
    pub habitat: Option<&'a str>,
    pub biome: Option<&'a str>,
    pub time_of_day: Option<TimeOfDay>,
    pub travel_medium: Option<TravelMedium>,
}

impl<'a> FilterCriteria<'a> {
    /// Derives criteria from a travel context; the habitat comes from the biome.
    pub fn from_context(context: &'a EncounterContext) -> Self {
        let biome = context.biome.as_deref();
        Self {
            habitat: biome.map(map_biome_to_habitat),
            biome,
            time_of_day: context.time_of_day,
            travel_medium: context.travel_medium,
        }
    }

    fn matches_habitat(&self, creature: &CreatureStat, habitat: &str) -> bool {
        creature.habitat.iter().any(|tag| tag.contains(habitat))
            || self.biome.map_or(false, |biome| {
                creature.biomes.iter().any(|tag| tag.eq_ignore_ascii_case(biome))
            })
    }
}

fn matches_time(creature: &CreatureStat, time_of_day: TimeOfDay) -> bool {
    creature.time_of_day.is_empty()
        || creature
            .time_of_day
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(time_of_day.as_str()) || tag.eq_ignore_ascii_case("all"))
}

fn matches_medium(creature: &CreatureStat, medium: TravelMedium) -> bool {
    creature.travel_medium.is_empty()
        || creature
            .travel_medium
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(medium.catalog_tag()))
}

/// Filters the catalog for an encounter.
///
/// Stages run in order: XP within `upper_bound`, habitat or biome, time of
/// day, travel medium. A stage only runs on a non-empty result, and if any
/// stage empties the set the XP-only result is returned instead. The pool is
/// therefore empty only when no creature fits the budget at all.
pub fn filter_monsters<'c>(
    catalog: &'c Catalog,
    challenge_ratings: &ChallengeRatingTable,
    upper_bound: u32,
    criteria: &FilterCriteria<'_>,
) -> Vec<&'c CreatureStat> {
    let affordable: Vec<&CreatureStat> = catalog
        .iter()
        .filter(|c| challenge_ratings.xp_for(c.challenge_rating) <= upper_bound)
        .collect();
    log::debug!(
        "{} of {} creatures fit an upper bound of {} XP",
        affordable.len(),
        catalog.len(),
        upper_bound
    );

    let mut pool = affordable.clone();
    if let Some(habitat) = criteria.habitat {
        narrow(&mut pool, "habitat", |c| criteria.matches_habitat(c, habitat));
    }
    if let Some(time_of_day) = criteria.time_of_day {
        narrow(&mut pool, "time of day", |c| matches_time(c, time_of_day));
    }
    if let Some(medium) = criteria.travel_medium {
        narrow(&mut pool, "travel medium", |c| matches_medium(c, medium));
    }

    if pool.is_empty() && !affordable.is_empty() {
        log::warn!("Context filters left no creatures; using the XP-filtered pool");
        return affordable;
    }
    pool
}

fn narrow<F>(pool: &mut Vec<&CreatureStat>, stage: &str, keep: F)
where
    F: Fn(&CreatureStat) -> bool,
{
    if pool.is_empty() {
        return;
    }
    pool.retain(|c| keep(c));
    log::trace!("{} creatures left after the {} stage", pool.len(), stage);
}
