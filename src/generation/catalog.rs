//! # Creature Catalog
//!
//! Read-only creature reference data. Relationships between creatures are
//! stored as names and resolved against the catalog when needed, so cycles
//! (a sergeant listing its own leader) are harmless.

use crate::{choose, RandomSource, WaylayResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Named relationship lists linking a creature to others in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationships {
    pub leaders: Vec<String>,
    pub lieutenants: Vec<String>,
    pub sergeants: Vec<String>,
    pub minions: Vec<String>,
    pub followers: Vec<String>,
}

/// Which relationship list to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    Leader,
    Lieutenant,
    Sergeant,
    Minion,
    Follower,
}

impl Relationships {
    pub fn names(&self, relationship: Relationship) -> &[String] {
        match relationship {
            Relationship::Leader => &self.leaders,
            Relationship::Lieutenant => &self.lieutenants,
            Relationship::Sergeant => &self.sergeants,
            Relationship::Minion => &self.minions,
            Relationship::Follower => &self.followers,
        }
    }

    /// Whether any list below the creature (lieutenants down to followers) is non-empty.
    pub fn has_subordinates(&self) -> bool {
        !(self.lieutenants.is_empty()
            && self.sergeants.is_empty()
            && self.minions.is_empty()
            && self.followers.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty() && !self.has_subordinates()
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureStat {
    pub name: String,
    #[serde(alias = "cr")]
    pub challenge_rating: f64,
    /// Display form of the rating, e.g. "1/4"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr_text: Option<String>,
    #[serde(default)]
    pub habitat: Vec<String>,
    #[serde(default, alias = "biome")]
    pub biomes: Vec<String>,
    #[serde(default)]
    pub time_of_day: Vec<String>,
    #[serde(default)]
    pub travel_medium: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub relationships: Relationships,
}

impl CreatureStat {
    /// Creates a creature with no tags and no relationships.
    pub fn new(name: impl Into<String>, challenge_rating: f64) -> Self {
        Self {
            name: name.into(),
            challenge_rating,
            cr_text: None,
            habitat: Vec::new(),
            biomes: Vec::new(),
            time_of_day: Vec::new(),
            travel_medium: Vec::new(),
            url: None,
            relationships: Relationships::default(),
        }
    }

    pub fn with_habitat(mut self, habitat: &[&str]) -> Self {
        self.habitat = to_strings(habitat);
        self
    }

    pub fn with_biomes(mut self, biomes: &[&str]) -> Self {
        self.biomes = to_strings(biomes);
        self
    }

    pub fn with_time_of_day(mut self, times: &[&str]) -> Self {
        self.time_of_day = to_strings(times);
        self
    }

    pub fn with_travel_medium(mut self, mediums: &[&str]) -> Self {
        self.travel_medium = to_strings(mediums);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship, names: &[&str]) -> Self {
        let list = match relationship {
            Relationship::Leader => &mut self.relationships.leaders,
            Relationship::Lieutenant => &mut self.relationships.lieutenants,
            Relationship::Sergeant => &mut self.relationships.sergeants,
            Relationship::Minion => &mut self.relationships.minions,
            Relationship::Follower => &mut self.relationships.followers,
        };
        *list = to_strings(names);
        self
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The creature catalog, indexed by lower-cased name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    creatures: Vec<CreatureStat>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(creatures: Vec<CreatureStat>) -> Self {
        let mut index = HashMap::with_capacity(creatures.len());
        for (i, creature) in creatures.iter().enumerate() {
            // The first entry with a given name wins
            index.entry(creature.name.to_lowercase()).or_insert(i);
        }
        Self { creatures, index }
    }

    /// Parses a JSON array of creatures.
    pub fn from_json_str(json: &str) -> WaylayResult<Self> {
        let creatures: Vec<CreatureStat> = serde_json::from_str(json)?;
        Ok(Self::new(creatures))
    }

    /// Reads a JSON array of creatures from a file.
    pub fn load(path: impl AsRef<Path>) -> WaylayResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading creature catalog from {}", path.display());
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        log::debug!("Loaded {} creatures", catalog.len());
        Ok(catalog)
    }

    pub fn creatures(&self) -> &[CreatureStat] {
        &self.creatures
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatureStat> {
        self.creatures.iter()
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Looks a creature up by name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::{Catalog, CreatureStat};
    ///
    /// let catalog = Catalog::new(vec![CreatureStat::new("Goblin Boss", 1.0)]);
    /// assert!(catalog.get("goblin boss").is_some());
    /// assert!(catalog.get("Hobgoblin").is_none());
    /// ```
    pub fn get(&self, name: &str) -> Option<&CreatureStat> {
        self.index
            .get(&name.to_lowercase())
            .and_then(|&i| self.creatures.get(i))
    }

    /// Picks one name from a creature's relationship list and resolves it.
    ///
    /// An empty list yields `None` without drawing. A name missing from the
    /// catalog also yields `None`.
    pub fn pick_relationship<R>(
        &self,
        creature: &CreatureStat,
        relationship: Relationship,
        rng: &mut R,
    ) -> Option<&CreatureStat>
    where
        R: RandomSource + ?Sized,
    {
        let name = choose(creature.relationships.names(relationship), rng)?;
        let resolved = self.get(name);
        if resolved.is_none() {
            log::warn!(
                "{} lists unknown creature '{}' as {:?}",
                creature.name,
                name,
                relationship
            );
        }
        resolved
    }
}

impl FromIterator<CreatureStat> for Catalog {
    fn from_iter<I: IntoIterator<Item = CreatureStat>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
