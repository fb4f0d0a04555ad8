//! # Creature Selection
//!
//! The two roster-building strategies and the leader pick that feeds the
//! hierarchical one.
//!
//! A simple fill repeats a single creature until the adjusted XP reaches the
//! budget window. A leader/follower fill starts from one leader and tops the
//! roster up with creatures drawn from the leader's relationship lists,
//! filling lieutenants first, then sergeants, minions and followers.

use crate::config::MAX_MONSTER_COUNT;
use crate::{
    adjusted_xp_of_creatures, choose, Catalog, CreatureStat, RandomSource, Relationship, Tables,
    XpBudget, XpPool,
};
use serde::{Deserialize, Serialize};

/// Role a roster line plays in the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureLabel {
    Leader,
    Lieutenant,
    Sergeant,
    Minion,
    Follower,
    /// A simple-fill line, which has no role
    #[serde(rename = "none")]
    Unlabeled,
}

impl CreatureLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            CreatureLabel::Leader => "leader",
            CreatureLabel::Lieutenant => "lieutenant",
            CreatureLabel::Sergeant => "sergeant",
            CreatureLabel::Minion => "minion",
            CreatureLabel::Follower => "follower",
            CreatureLabel::Unlabeled => "none",
        }
    }
}

/// One line of a generated roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedCreatureEntry {
    /// Catalog name of the creature
    pub name: String,
    /// Numeric challenge rating
    pub challenge_rating: f64,
    /// Display form of the rating, copied from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr_text: Option<String>,
    /// Reference link, copied from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Number of copies, always at least 1
    pub quantity: u32,
    /// Role in the encounter
    pub label: CreatureLabel,
    /// XP of a single copy
    pub xp_per_unit: u32,
}

impl SelectedCreatureEntry {
    pub fn new(creature: &CreatureStat, quantity: u32, label: CreatureLabel, xp_per_unit: u32) -> Self {
        Self {
            name: creature.name.clone(),
            challenge_rating: creature.challenge_rating,
            cr_text: creature.cr_text.clone(),
            url: creature.url.clone(),
            quantity,
            label,
            xp_per_unit,
        }
    }

    pub fn total_xp(&self) -> u64 {
        u64::from(self.quantity) * u64::from(self.xp_per_unit)
    }
}

/// A finished roster and its XP summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedEncounter {
    /// Roster lines, leader first when there is one
    pub creatures: Vec<SelectedCreatureEntry>,
    /// Window the roster was built for
    pub budget: XpBudget,
    /// Total XP times the group multiplier
    pub adjusted_xp: f64,
    /// Sum of every line's XP
    pub total_xp: u64,
    /// Raw XP each party member earns
    pub xp_per_pc: f64,
    /// Sum of the quantities
    pub creature_count: u32,
}

impl GeneratedEncounter {
    /// Builds the summary for a roster, recomputing every XP figure from it.
    pub fn from_entries(
        creatures: Vec<SelectedCreatureEntry>,
        budget: XpBudget,
        tables: &Tables,
        party_size: u32,
    ) -> Self {
        let groups: Vec<(u32, u32)> = creatures.iter().map(|e| (e.quantity, e.xp_per_unit)).collect();
        let tally = adjusted_xp_of_creatures(&tables.multipliers, party_size, &groups);
        Self {
            creatures,
            budget,
            adjusted_xp: tally.adjusted_xp,
            total_xp: tally.total_xp,
            xp_per_pc: tally.total_xp as f64 / f64::from(party_size.max(1)),
            creature_count: tally.creature_count,
        }
    }

    /// An encounter with no creatures, used when nothing fits the budget.
    pub fn empty(budget: XpBudget) -> Self {
        Self {
            creatures: Vec::new(),
            budget,
            adjusted_xp: 0.0,
            total_xp: 0,
            xp_per_pc: 0.0,
            creature_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn leader(&self) -> Option<&SelectedCreatureEntry> {
        self.creatures.iter().find(|e| e.label == CreatureLabel::Leader)
    }

    /// Whether the adjusted XP landed inside the budget window.
    pub fn within_budget(&self) -> bool {
        self.budget.contains(self.adjusted_xp)
    }
}

/// Fill order of the subordinate roles.
const SUBORDINATE_ROLES: [(Relationship, CreatureLabel); 4] = [
    (Relationship::Lieutenant, CreatureLabel::Lieutenant),
    (Relationship::Sergeant, CreatureLabel::Sergeant),
    (Relationship::Minion, CreatureLabel::Minion),
    (Relationship::Follower, CreatureLabel::Follower),
];

/// Builds rosters against one budget for one party.
#[derive(Debug, Clone, Copy)]
pub struct CreatureSelector<'a> {
    catalog: &'a Catalog,
    tables: &'a Tables,
    budget: XpBudget,
    party_size: u32,
}

impl<'a> CreatureSelector<'a> {
    pub fn new(catalog: &'a Catalog, tables: &'a Tables, budget: XpBudget, party_size: u32) -> Self {
        Self {
            catalog,
            tables,
            budget,
            party_size,
        }
    }

    /// The XP window rosters are built against.
    pub fn budget(&self) -> XpBudget {
        self.budget
    }

    fn xp_for(&self, creature: &CreatureStat) -> u32 {
        self.tables.xp_for(creature.challenge_rating)
    }

    fn adjusted_for_copies(&self, xp: u32, quantity: u32) -> f64 {
        let total = u64::from(xp) * u64::from(quantity);
        total as f64 * self.tables.multipliers.multiplier(self.party_size, quantity)
    }

    fn finish(&self, entries: Vec<SelectedCreatureEntry>) -> GeneratedEncounter {
        GeneratedEncounter::from_entries(entries, self.budget, self.tables, self.party_size)
    }

    /// Repeats `monster` until the budget's lower bound is reached.
    ///
    /// The quantity stays within `1..=15` and a copy is only added while the
    /// result stays at or under the upper bound. The roster may end up below
    /// the lower bound, or above the upper one when a single copy is already
    /// too expensive.
    pub fn generate_simple_encounter(&self, monster: &CreatureStat) -> GeneratedEncounter {
        let xp = self.xp_for(monster);
        let mut quantity = 1;
        let mut adjusted = self.adjusted_for_copies(xp, quantity);

        while adjusted < f64::from(self.budget.lower_bound) && quantity < MAX_MONSTER_COUNT {
            let candidate = self.adjusted_for_copies(xp, quantity + 1);
            if self.budget.exceeded_by(candidate) {
                break;
            }
            quantity += 1;
            adjusted = candidate;
        }

        log::debug!(
            "Simple fill: {} x{} ({} adjusted XP)",
            monster.name,
            quantity,
            adjusted
        );
        self.finish(vec![SelectedCreatureEntry::new(
            monster,
            quantity,
            CreatureLabel::Unlabeled,
            xp,
        )])
    }

    /// Builds a roster around `leader`.
    ///
    /// One candidate per subordinate role is drawn up front, in fill order.
    /// Each candidate is then added copy by copy until the window is reached or
    /// one more copy would overshoot it. A role whose candidate is missing or
    /// worth no XP is skipped, as is every role once the roster is in the window.
    pub fn generate_leader_follower_encounter<R>(
        &self,
        leader: &CreatureStat,
        rng: &mut R,
    ) -> GeneratedEncounter
    where
        R: RandomSource + ?Sized,
    {
        let leader_xp = self.xp_for(leader);
        let mut entries = vec![SelectedCreatureEntry::new(leader, 1, CreatureLabel::Leader, leader_xp)];
        let mut pool = XpPool::with_values([leader_xp]);

        let candidates: Vec<(Option<&CreatureStat>, CreatureLabel)> = SUBORDINATE_ROLES
            .iter()
            .map(|&(relationship, label)| {
                (self.catalog.pick_relationship(leader, relationship, rng), label)
            })
            .collect();

        for (candidate, label) in candidates {
            if let Some(entry) = candidate.and_then(|c| self.fill_role(c, label, &mut pool)) {
                entries.push(entry);
            }
        }

        let encounter = self.finish(entries);
        log::debug!(
            "Leader fill around {}: {} creatures, {} adjusted XP",
            leader.name,
            encounter.creature_count,
            encounter.adjusted_xp
        );
        encounter
    }

    fn fill_role(
        &self,
        creature: &CreatureStat,
        label: CreatureLabel,
        pool: &mut XpPool,
    ) -> Option<SelectedCreatureEntry> {
        let xp = self.xp_for(creature);
        if xp == 0 {
            return None;
        }

        let mut adjusted = pool.adjusted_xp(&self.tables.multipliers, self.party_size);
        if self.budget.contains(adjusted) {
            return None;
        }

        let mut count = 0;
        while !self.budget.exceeded_by(adjusted) {
            let previous = adjusted;
            pool.push(xp);
            adjusted = pool.adjusted_xp(&self.tables.multipliers, self.party_size);
            if self.budget.exceeded_by(adjusted) {
                pool.pop();
                break;
            }
            count += 1;
            log::trace!("{} {} x{}: {} adjusted XP", label.as_str(), creature.name, count, adjusted);
            if self.budget.contains(adjusted) {
                break;
            }
            // Past the last multiplier column a non-positive multiplier never makes progress
            if adjusted <= previous && pool.len() > MAX_MONSTER_COUNT as usize {
                log::warn!("Adjusted XP stopped growing while adding {}", creature.name);
                break;
            }
        }

        (count > 0).then(|| SelectedCreatureEntry::new(creature, count, label, xp))
    }

    /// Picks the leader for a pool of candidates at the party's average level.
    ///
    /// Candidates are restricted to the CR band `round(level * 0.8)..=round(level * 1.2)`
    /// when the pool's highest CR falls inside it, otherwise to the highest CR.
    /// Within that band the first creature with followers wins, then the first
    /// with any subordinates, then a uniform pick.
    ///
    /// The chosen creature may then be swapped for one of its own leaders,
    /// lieutenants or sergeants: the result is a uniform pick among the
    /// candidate and whichever of those three resolve.
    pub fn get_leader<R>(&self, pool: &[&'a CreatureStat], average_level: f64, rng: &mut R) -> Option<&'a CreatureStat>
    where
        R: RandomSource + ?Sized,
    {
        let lower_cr = (average_level * 0.8).round();
        let upper_cr = (average_level * 1.2).round();
        let max_cr = pool
            .iter()
            .map(|c| c.challenge_rating)
            .fold(f64::NEG_INFINITY, f64::max);

        let band: Vec<&'a CreatureStat> = if (lower_cr..=upper_cr).contains(&max_cr) {
            pool.iter()
                .copied()
                .filter(|c| (lower_cr..=upper_cr).contains(&c.challenge_rating))
                .collect()
        } else {
            pool.iter().copied().filter(|c| c.challenge_rating == max_cr).collect()
        };

        let chosen = band
            .iter()
            .find(|c| !c.relationships.followers.is_empty())
            .or_else(|| band.iter().find(|c| c.relationships.has_subordinates()))
            .copied()
            .or_else(|| choose(&band, rng).copied())?;

        let mut options = vec![chosen];
        for relationship in [Relationship::Leader, Relationship::Lieutenant, Relationship::Sergeant] {
            options.extend(self.catalog.pick_relationship(chosen, relationship, rng));
        }
        let leader = choose(&options, rng).copied().unwrap_or(chosen);

        log::debug!(
            "Leader pick in CR {}..={} (pool max {}): {} from {} chosen",
            lower_cr,
            upper_cr,
            max_cr,
            leader.name,
            chosen.name
        );
        Some(leader)
    }
}
