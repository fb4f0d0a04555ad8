//! # Encounter Odds Tables
//!
//! Base per-roll encounter chances by biome and time of day, plus the road and
//! pace modifiers layered on top of them.

use crate::{Road, TimeOfDay, TravelPace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A value that differs between day and night.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayNight<T> {
    pub day: T,
    pub night: T,
}

impl<T> DayNight<T> {
    pub fn new(day: T, night: T) -> Self {
        Self { day, night }
    }

    pub fn get(&self, time_of_day: TimeOfDay) -> &T {
        match time_of_day {
            TimeOfDay::Day => &self.day,
            TimeOfDay::Night => &self.night,
        }
    }
}

impl<T: Clone> DayNight<T> {
    /// Same value at any time of day.
    pub fn both(value: T) -> Self {
        Self::new(value.clone(), value)
    }
}

/// Per-roll chance of each encounter type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterOdds {
    pub non_combat: f64,
    pub combat: f64,
    pub hazard: f64,
}

impl EncounterOdds {
    pub fn new(combat: f64, non_combat: f64, hazard: f64) -> Self {
        Self {
            non_combat,
            combat,
            hazard,
        }
    }

    /// Clamps every chance into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            non_combat: clamp_probability(self.non_combat),
            combat: clamp_probability(self.combat),
            hazard: clamp_probability(self.hazard),
        }
    }
}

/// Clamps into `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// How a modifier's deltas combine with the odds they adjust.
///
/// Stored in JSON as `percent_type`: `0` is relative, anything else absolute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ModifierKind {
    /// `p += p * delta`
    #[default]
    Relative,
    /// `p += delta`
    Absolute,
}

impl From<u8> for ModifierKind {
    fn from(percent_type: u8) -> Self {
        match percent_type {
            0 => ModifierKind::Relative,
            _ => ModifierKind::Absolute,
        }
    }
}

impl From<ModifierKind> for u8 {
    fn from(kind: ModifierKind) -> Self {
        match kind {
            ModifierKind::Relative => 0,
            ModifierKind::Absolute => 1,
        }
    }
}

/// Adjustment applied to encounter odds by a road or a travel pace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub non_combat: f64,
    pub combat: f64,
    pub hazard: f64,
    #[serde(rename = "percent_type", default)]
    pub kind: ModifierKind,
}

impl Modifier {
    pub fn relative(combat: f64, non_combat: f64, hazard: f64) -> Self {
        Self {
            non_combat,
            combat,
            hazard,
            kind: ModifierKind::Relative,
        }
    }

    pub fn absolute(combat: f64, non_combat: f64, hazard: f64) -> Self {
        Self {
            kind: ModifierKind::Absolute,
            ..Self::relative(combat, non_combat, hazard)
        }
    }

    /// Applies the deltas without clamping.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::{EncounterOdds, Modifier};
    ///
    /// let odds = EncounterOdds::new(0.2, 0.1, 0.05);
    /// let halved = Modifier::relative(-0.5, 0.0, 0.0).apply(odds);
    /// assert!((halved.combat - 0.1).abs() < 1e-12);
    ///
    /// let bumped = Modifier::absolute(0.1, 0.0, 0.0).apply(odds);
    /// assert!((bumped.combat - 0.3).abs() < 1e-12);
    /// ```
    pub fn apply(&self, odds: EncounterOdds) -> EncounterOdds {
        let adjust = |p: f64, delta: f64| match self.kind {
            ModifierKind::Relative => p + p * delta,
            ModifierKind::Absolute => p + delta,
        };

        EncounterOdds {
            non_combat: adjust(odds.non_combat, self.non_combat),
            combat: adjust(odds.combat, self.combat),
            hazard: adjust(odds.hazard, self.hazard),
        }
    }
}

/// Base odds keyed by biome name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeOddsTable {
    biomes: HashMap<String, DayNight<EncounterOdds>>,
}

impl BiomeOddsTable {
    pub fn new(biomes: HashMap<String, DayNight<EncounterOdds>>) -> Self {
        Self { biomes }
    }

    /// Odds for a biome; names match exactly first, then ignoring ASCII case.
    pub fn get(&self, biome: &str) -> Option<&DayNight<EncounterOdds>> {
        self.biomes.get(biome).or_else(|| {
            self.biomes
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(biome))
                .map(|(_, odds)| odds)
        })
    }

    pub fn biomes(&self) -> impl Iterator<Item = &str> {
        self.biomes.keys().map(String::as_str)
    }
}

impl Default for BiomeOddsTable {
    /// Canonical base odds for the fifteen terrestrial biomes.
    fn default() -> Self {
        // (biome, day (non-combat, combat, hazard), night (non-combat, combat, hazard))
        const ROWS: [(&str, [f64; 3], [f64; 3]); 15] = [
            ("boreal forests/taiga", [0.03, 0.21, 0.05], [0.03, 0.24, 0.05]),
            ("deserts & xeric shrublands", [0.06, 0.18, 0.05], [0.04, 0.24, 0.05]),
            ("flooded grasslands & savannas", [0.05, 0.21, 0.05], [0.02, 0.24, 0.05]),
            ("mangroves", [0.03, 0.24, 0.05], [0.0, 0.27, 0.05]),
            (
                "mediterranean forests, woodlands, & scrub",
                [0.06, 0.18, 0.05],
                [0.0, 0.24, 0.05],
            ),
            ("montane grasslands & shrublands", [0.03, 0.24, 0.05], [0.0, 0.27, 0.05]),
            ("rock and ice", [0.03, 0.21, 0.05], [0.03, 0.24, 0.05]),
            ("temperate broadleaf & mixed forests", [0.03, 0.21, 0.05], [0.03, 0.24, 0.05]),
            ("temperate conifer forests", [0.03, 0.21, 0.05], [0.03, 0.24, 0.05]),
            (
                "temperate grasslands, savannas, & shrublands",
                [0.06, 0.18, 0.05],
                [0.03, 0.24, 0.05],
            ),
            (
                "tropical & subtropical coniferous forests",
                [0.02, 0.24, 0.05],
                [0.0, 0.27, 0.05],
            ),
            (
                "tropical & subtropical dry broadleaf forests",
                [0.02, 0.24, 0.05],
                [0.0, 0.27, 0.05],
            ),
            (
                "tropical & subtropical grasslands, savannas & shrublands",
                [0.06, 0.18, 0.05],
                [0.03, 0.24, 0.05],
            ),
            (
                "tropical & subtropical moist broadleaf forests",
                [0.02, 0.24, 0.05],
                [0.0, 0.27, 0.05],
            ),
            ("tundra", [0.03, 0.21, 0.05], [0.03, 0.24, 0.05]),
        ];

        let odds = |[non_combat, combat, hazard]: [f64; 3]| EncounterOdds {
            non_combat,
            combat,
            hazard,
        };

        Self::new(
            ROWS.iter()
                .map(|&(biome, day, night)| (biome.to_string(), DayNight::new(odds(day), odds(night))))
                .collect(),
        )
    }
}

/// Road modifiers keyed by road kind.
pub type RoadModifiers = HashMap<Road, DayNight<Modifier>>;

/// Pace modifiers keyed by travel pace.
pub type PaceModifiers = HashMap<TravelPace, DayNight<Modifier>>;

/// Canonical road modifiers; all relative and identical by day and night.
pub fn default_road_modifiers() -> RoadModifiers {
    [
        (Road::Highway, Modifier::relative(-0.35, 0.2, -0.2)),
        (Road::Byway, Modifier::relative(-0.25, 0.1, -0.1)),
        (Road::Royalway, Modifier::relative(-0.5, 0.15, -0.2)),
        (Road::Bridleway, Modifier::relative(-0.1, 0.05, -0.05)),
        (Road::NoRoad, Modifier::relative(0.0, 0.0, 0.0)),
    ]
    .into_iter()
    .map(|(road, modifier)| (road, DayNight::both(modifier)))
    .collect()
}

/// Canonical pace modifiers; all relative and identical by day and night.
pub fn default_pace_modifiers() -> PaceModifiers {
    [
        (TravelPace::Slow, Modifier::relative(-0.2, 0.2, -0.2)),
        (TravelPace::Normal, Modifier::relative(0.0, 0.0, 0.0)),
        (TravelPace::Fast, Modifier::relative(0.2, -0.2, 0.2)),
    ]
    .into_iter()
    .map(|(pace, modifier)| (pace, DayNight::both(modifier)))
    .collect()
}
