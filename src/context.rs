//! # Travel Context
//!
//! The environmental values an encounter is generated for: where the party is,
//! when, on what kind of road, how fast and by what means they travel.
//!
//! Callers resolve any "random" choice before handing a context to the engine,
//! so every field here is either a concrete value or absent.

use crate::{WaylayError, WaylayResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time of day an encounter roll happens at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    /// Tag used for this time in catalog entries.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }
}

/// How the party is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMedium {
    Ground,
    Air,
    Sea,
}

impl TravelMedium {
    /// Tag used for this medium in catalog entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::TravelMedium;
    ///
    /// assert_eq!(TravelMedium::Ground.catalog_tag(), "land");
    /// assert_eq!(TravelMedium::Sea.catalog_tag(), "water");
    /// ```
    pub fn catalog_tag(self) -> &'static str {
        match self {
            TravelMedium::Ground => "land",
            TravelMedium::Air => "air",
            TravelMedium::Sea => "water",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMedium::Ground => "ground",
            TravelMedium::Air => "air",
            TravelMedium::Sea => "sea",
        }
    }
}

/// Kind of road the party travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Road {
    #[serde(rename = "no road")]
    NoRoad,
    #[serde(rename = "highway")]
    Highway,
    #[serde(rename = "byway")]
    Byway,
    #[serde(rename = "royalway")]
    Royalway,
    #[serde(rename = "bridleway")]
    Bridleway,
}

impl Road {
    pub const ALL: [Road; 5] = [
        Road::NoRoad,
        Road::Highway,
        Road::Byway,
        Road::Royalway,
        Road::Bridleway,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Road::NoRoad => "no road",
            Road::Highway => "highway",
            Road::Byway => "byway",
            Road::Royalway => "royalway",
            Road::Bridleway => "bridleway",
        }
    }
}

/// Travel pace of the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelPace {
    Slow,
    Normal,
    Fast,
}

impl TravelPace {
    pub const ALL: [TravelPace; 3] = [TravelPace::Slow, TravelPace::Normal, TravelPace::Fast];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelPace::Slow => "slow",
            TravelPace::Normal => "normal",
            TravelPace::Fast => "fast",
        }
    }
}

macro_rules! impl_str_conversions {
    ($ty:ty, $what:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = WaylayError;

            fn from_str(s: &str) -> WaylayResult<Self> {
                let wanted = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| WaylayError::InvalidInput(format!("unknown {}: {}", $what, s)))
            }
        }
    };
}

impl_str_conversions!(TimeOfDay, "time of day", [TimeOfDay::Day, TimeOfDay::Night]);
impl_str_conversions!(
    TravelMedium,
    "travel medium",
    [TravelMedium::Ground, TravelMedium::Air, TravelMedium::Sea]
);
impl_str_conversions!(
    Road,
    "road",
    [
        Road::NoRoad,
        Road::Highway,
        Road::Byway,
        Road::Royalway,
        Road::Bridleway,
    ]
);
impl_str_conversions!(
    TravelPace,
    "travel pace",
    [TravelPace::Slow, TravelPace::Normal, TravelPace::Fast]
);

/// Environmental context of an encounter.
///
/// # Examples
///
/// ```
/// use waylay::{EncounterContext, Road, TimeOfDay};
///
/// let context = EncounterContext::new()
///     .with_biome("tundra")
///     .with_time_of_day(TimeOfDay::Night)
///     .with_road(Road::Highway);
/// assert_eq!(context.biome.as_deref(), Some("tundra"));
/// assert!(context.travel_pace.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterContext {
    /// Biome name, e.g. "temperate conifer forests"
    pub biome: Option<String>,
    pub time_of_day: Option<TimeOfDay>,
    pub road: Option<Road>,
    pub travel_pace: Option<TravelPace>,
    pub travel_medium: Option<TravelMedium>,
}

impl EncounterContext {
    /// Creates an empty context where every value is absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_biome(mut self, biome: impl Into<String>) -> Self {
        self.biome = Some(biome.into());
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    pub fn with_road(mut self, road: Road) -> Self {
        self.road = Some(road);
        self
    }

    pub fn with_travel_pace(mut self, travel_pace: TravelPace) -> Self {
        self.travel_pace = Some(travel_pace);
        self
    }

    pub fn with_travel_medium(mut self, travel_medium: TravelMedium) -> Self {
        self.travel_medium = Some(travel_medium);
        self
    }

    /// Time of day the probability tables are read at; absent means day.
    pub fn resolved_time_of_day(&self) -> TimeOfDay {
        self.time_of_day.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_values() {
        assert_eq!("Night".parse::<TimeOfDay>().unwrap(), TimeOfDay::Night);
        assert_eq!("no road".parse::<Road>().unwrap(), Road::NoRoad);
        assert_eq!(" fast ".parse::<TravelPace>().unwrap(), TravelPace::Fast);
        assert_eq!("SEA".parse::<TravelMedium>().unwrap(), TravelMedium::Sea);
        assert!("random".parse::<Road>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for road in Road::ALL {
            assert_eq!(road.to_string().parse::<Road>().unwrap(), road);
        }
        for pace in TravelPace::ALL {
            assert_eq!(pace.to_string().parse::<TravelPace>().unwrap(), pace);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Road::NoRoad).unwrap();
        assert_eq!(json, "\"no road\"");
        let medium: TravelMedium = serde_json::from_str("\"air\"").unwrap();
        assert_eq!(medium, TravelMedium::Air);
    }

    #[test]
    fn test_missing_time_resolves_to_day() {
        let context = EncounterContext::new();
        assert_eq!(context.resolved_time_of_day(), TimeOfDay::Day);
        let night = context.with_time_of_day(TimeOfDay::Night);
        assert_eq!(night.resolved_time_of_day(), TimeOfDay::Night);
    }
}
