//! # Encounter Generation
//!
//! The end-to-end pipeline: party and difficulty to budget, budget and context
//! to a creature pool, pool to a roster.

use crate::config::MAX_MONSTER_COUNT;
use crate::{
    choose, compute_xp_bounds, filter_monsters, Catalog, CreatureSelector, CreatureStat, Difficulty,
    EncounterContext, FilterCriteria, GeneratedEncounter, GenerationConfig, Generator, PartyComposition,
    RandomSource, SelectionStrategy, Tables, WaylayError, WaylayResult,
};
use serde::{Deserialize, Serialize};

/// What to generate an encounter for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRequest {
    pub party: PartyComposition,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub context: EncounterContext,
}

impl EncounterRequest {
    pub fn new(party: PartyComposition, difficulty: Difficulty) -> Self {
        Self {
            party,
            difficulty,
            context: EncounterContext::default(),
        }
    }

    pub fn with_context(mut self, context: EncounterContext) -> Self {
        self.context = context;
        self
    }
}

/// Generates combat encounters from a catalog and a set of tables.
///
/// # Examples
///
/// ```
/// use waylay::{
///     create_rng, Catalog, CreatureStat, Difficulty, EncounterGenerator, EncounterRequest,
///     GenerationConfig, Generator, PartyComposition, Tables,
/// };
///
/// let catalog = Catalog::new(vec![CreatureStat::new("Young Remorhaz", 5.0)]);
/// let tables = Tables::default();
/// let request = EncounterRequest::new(PartyComposition::uniform(5, 4).unwrap(), Difficulty::Medium);
/// let generator = EncounterGenerator::new(&catalog, &tables, request);
///
/// let config = GenerationConfig::new(7);
/// let encounter = generator.generate(&config, &mut create_rng(&config)).unwrap();
/// assert_eq!(encounter.creature_count, 1);
/// assert_eq!(encounter.adjusted_xp, 1_800.0);
/// ```
pub struct EncounterGenerator<'a> {
    catalog: &'a Catalog,
    tables: &'a Tables,
    request: EncounterRequest,
}

impl<'a> EncounterGenerator<'a> {
    pub fn new(catalog: &'a Catalog, tables: &'a Tables, request: EncounterRequest) -> Self {
        Self {
            catalog,
            tables,
            request,
        }
    }

    pub fn request(&self) -> &EncounterRequest {
        &self.request
    }

    /// Picks the simple-fill monster, preferring creatures worth some XP.
    fn pick_simple_monster<R>(&self, pool: &[&'a CreatureStat], rng: &mut R) -> Option<&'a CreatureStat>
    where
        R: RandomSource + ?Sized,
    {
        let priced: Vec<&'a CreatureStat> = pool
            .iter()
            .copied()
            .filter(|c| self.tables.xp_for(c.challenge_rating) > 0)
            .collect();
        let candidates = if priced.is_empty() { pool } else { &priced[..] };
        choose(candidates, rng).copied()
    }
}

impl Generator<GeneratedEncounter> for EncounterGenerator<'_> {
    fn generate<R>(&self, config: &GenerationConfig, rng: &mut R) -> WaylayResult<GeneratedEncounter>
    where
        R: RandomSource + ?Sized,
    {
        let stats = self.request.party.stats();
        let budget = compute_xp_bounds(
            &self.tables.xp_thresholds,
            stats.average_level,
            stats.party_size,
            self.request.difficulty,
        );

        let criteria = FilterCriteria::from_context(&self.request.context);
        let pool = filter_monsters(self.catalog, &self.tables.challenge_ratings, budget.upper_bound, &criteria);
        if pool.is_empty() {
            log::warn!("No creature fits an upper bound of {} XP", budget.upper_bound);
            return Ok(GeneratedEncounter::empty(budget));
        }

        let selector = CreatureSelector::new(self.catalog, self.tables, budget, stats.party_size);
        let leader = match config.strategy {
            SelectionStrategy::Simple => None,
            SelectionStrategy::Auto => selector
                .get_leader(&pool, stats.average_level, rng)
                .filter(|leader| leader.relationships.has_subordinates()),
            SelectionStrategy::LeaderFollower => selector.get_leader(&pool, stats.average_level, rng),
        };

        let encounter = match leader {
            Some(leader) => selector.generate_leader_follower_encounter(leader, rng),
            None => match self.pick_simple_monster(&pool, rng) {
                Some(monster) => selector.generate_simple_encounter(monster),
                None => GeneratedEncounter::empty(budget),
            },
        };

        self.validate(&encounter, config)?;
        log::info!(
            "Generated {} creature(s) at {} adjusted XP for [{}, {}]",
            encounter.creature_count,
            encounter.adjusted_xp,
            budget.lower_bound,
            budget.upper_bound
        );
        Ok(encounter)
    }

    fn validate(&self, content: &GeneratedEncounter, config: &GenerationConfig) -> WaylayResult<()> {
        if let Some(entry) = content.creatures.iter().find(|e| e.quantity == 0) {
            return Err(WaylayError::GenerationFailed(format!(
                "{} has a quantity of zero",
                entry.name
            )));
        }

        let total_xp: u64 = content.creatures.iter().map(|e| e.total_xp()).sum();
        let creature_count: u32 = content.creatures.iter().map(|e| e.quantity).sum();
        if total_xp != content.total_xp || creature_count != content.creature_count {
            return Err(WaylayError::GenerationFailed(format!(
                "roster sums to {} XP over {} creatures but reports {} XP over {}",
                total_xp, creature_count, content.total_xp, content.creature_count
            )));
        }

        if config.strategy == SelectionStrategy::Simple
            && content.creatures.iter().any(|e| e.quantity > MAX_MONSTER_COUNT)
        {
            return Err(WaylayError::GenerationFailed(format!(
                "simple fill went past {} creatures",
                MAX_MONSTER_COUNT
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_rng, CreatureLabel, Relationship, TimeOfDay};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CreatureStat::new("Bandit Captain", 2.0)
                .with_habitat(&["Grassland", "Forest"])
                .with_relationship(Relationship::Follower, &["Bandit"]),
            CreatureStat::new("Bandit", 0.125).with_habitat(&["Grassland", "Forest"]),
            CreatureStat::new("Wolf", 0.25).with_habitat(&["Forest"]),
        ])
    }

    fn request(difficulty: Difficulty) -> EncounterRequest {
        EncounterRequest::new(PartyComposition::uniform(3, 4).unwrap(), difficulty)
    }

    #[test]
    fn test_simple_strategy() {
        let catalog = catalog();
        let tables = Tables::default();
        let generator = EncounterGenerator::new(&catalog, &tables, request(Difficulty::Medium));
        let config = GenerationConfig {
            strategy: SelectionStrategy::Simple,
            ..GenerationConfig::for_testing(9)
        };

        let encounter = generator.generate(&config, &mut create_rng(&config)).unwrap();
        assert_eq!(encounter.creatures.len(), 1);
        assert_eq!(encounter.creatures[0].label, CreatureLabel::Unlabeled);
        assert!(encounter.creature_count <= MAX_MONSTER_COUNT);
    }

    #[test]
    fn test_leader_strategy_labels_roster() {
        let catalog = catalog();
        let tables = Tables::default();
        let generator = EncounterGenerator::new(&catalog, &tables, request(Difficulty::Hard));
        let config = GenerationConfig {
            strategy: SelectionStrategy::LeaderFollower,
            ..GenerationConfig::for_testing(9)
        };

        // Level 3 x4, hard: [900, 1600]; band 2..=4 holds only the captain
        let encounter = generator.generate(&config, &mut create_rng(&config)).unwrap();
        assert_eq!(encounter.leader().map(|e| e.name.as_str()), Some("Bandit Captain"));
        assert!(encounter.creatures[1..]
            .iter()
            .all(|e| e.label == CreatureLabel::Follower));
    }

    #[test]
    fn test_auto_falls_back_to_simple() {
        let catalog = Catalog::new(vec![CreatureStat::new("Owlbear", 3.0)]);
        let tables = Tables::default();
        let generator = EncounterGenerator::new(&catalog, &tables, request(Difficulty::Medium));
        let config = GenerationConfig::for_testing(1);

        let encounter = generator.generate(&config, &mut create_rng(&config)).unwrap();
        assert_eq!(encounter.creatures[0].label, CreatureLabel::Unlabeled);
        assert_eq!(encounter.creatures[0].name, "Owlbear");
    }

    #[test]
    fn test_empty_pool_yields_empty_encounter() {
        let catalog = Catalog::new(vec![CreatureStat::new("Tarrasque", 30.0)]);
        let tables = Tables::default();
        let generator = EncounterGenerator::new(&catalog, &tables, request(Difficulty::Easy));
        let config = GenerationConfig::default();

        let encounter = generator.generate(&config, &mut create_rng(&config)).unwrap();
        assert!(encounter.is_empty());
        assert_eq!(encounter.budget.lower_bound, 300);
    }

    #[test]
    fn test_same_seed_same_roster() {
        let catalog = catalog();
        let tables = Tables::default();
        let context = EncounterContext::new()
            .with_biome("temperate broadleaf & mixed forests")
            .with_time_of_day(TimeOfDay::Night);
        let generator =
            EncounterGenerator::new(&catalog, &tables, request(Difficulty::Deadly).with_context(context));
        let config = GenerationConfig::for_testing(2024);

        let first = generator.generate(&config, &mut create_rng(&config)).unwrap();
        let second = generator.generate(&config, &mut create_rng(&config)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_rejects_inconsistent_totals() {
        let catalog = catalog();
        let tables = Tables::default();
        let generator = EncounterGenerator::new(&catalog, &tables, request(Difficulty::Medium));
        let config = GenerationConfig::default();

        let mut encounter = generator.generate(&config, &mut create_rng(&config)).unwrap();
        encounter.total_xp += 1;
        assert!(matches!(
            generator.validate(&encounter, &config),
            Err(WaylayError::GenerationFailed(_))
        ));
        assert_eq!(generator.generator_type(), "EncounterGenerator");
    }
}
