//! # Party Composition
//!
//! The characters an encounter is built against.

use crate::config::{MAX_CHARACTER_LEVEL, MAX_PARTY_SIZE, MIN_CHARACTER_LEVEL};
use crate::{WaylayError, WaylayResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A group of same-level characters in the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    pub level: u32,
    pub quantity: u32,
}

impl PartyMember {
    /// Creates a party member entry, checking level and quantity.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::PartyMember;
    ///
    /// assert!(PartyMember::new(5, 4).is_ok());
    /// assert!(PartyMember::new(21, 1).is_err());
    /// assert!(PartyMember::new(3, 0).is_err());
    /// ```
    pub fn new(level: u32, quantity: u32) -> WaylayResult<Self> {
        let member = Self { level, quantity };
        member.validate()?;
        Ok(member)
    }

    fn validate(&self) -> WaylayResult<()> {
        if !(MIN_CHARACTER_LEVEL..=MAX_CHARACTER_LEVEL).contains(&self.level) {
            return Err(WaylayError::InvalidParty(format!(
                "level {} is outside {}..={}",
                self.level, MIN_CHARACTER_LEVEL, MAX_CHARACTER_LEVEL
            )));
        }
        if self.quantity == 0 {
            return Err(WaylayError::InvalidParty(format!(
                "level {} entry has no characters",
                self.level
            )));
        }
        Ok(())
    }
}

impl FromStr for PartyMember {
    type Err = WaylayError;

    /// Parses `LEVELxQUANTITY` (e.g. `5x4`), or a bare level for one character.
    fn from_str(s: &str) -> WaylayResult<Self> {
        let s = s.trim();
        let (level, quantity) = match s.split_once(&['x', 'X', '*'][..]) {
            Some((level, quantity)) => (level.trim(), quantity.trim()),
            None => (s, "1"),
        };

        let parse = |value: &str, what: &str| {
            value
                .parse::<u32>()
                .map_err(|_| WaylayError::InvalidParty(format!("bad {} in '{}'", what, s)))
        };

        Self::new(parse(level, "level")?, parse(quantity, "quantity")?)
    }
}

/// Derived figures the budget is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartyStats {
    /// Quantity-weighted mean level
    pub average_level: f64,
    /// Number of characters, capped at the largest multiplier row
    pub party_size: u32,
}

impl Default for PartyStats {
    fn default() -> Self {
        Self {
            average_level: 1.0,
            party_size: 1,
        }
    }
}

/// The full party, as a list of level groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyComposition {
    members: Vec<PartyMember>,
}

impl PartyComposition {
    /// Builds a party, rejecting out-of-range levels or empty groups.
    pub fn new(members: Vec<PartyMember>) -> WaylayResult<Self> {
        for member in &members {
            member.validate()?;
        }
        Ok(Self { members })
    }

    /// Shorthand for a party of `quantity` characters of one level.
    pub fn uniform(level: u32, quantity: u32) -> WaylayResult<Self> {
        Self::new(vec![PartyMember::new(level, quantity)?])
    }

    /// Member groups as given.
    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    /// Whether the party has no members at all.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total number of characters, uncapped.
    pub fn head_count(&self) -> u64 {
        self.members.iter().map(|m| u64::from(m.quantity)).sum()
    }

    /// Average level and effective party size.
    ///
    /// An empty party counts as a single level 1 character. The size is capped
    /// at 6 because the multiplier table has no larger rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use waylay::{PartyComposition, PartyMember};
    ///
    /// let party = PartyComposition::new(vec![
    ///     PartyMember::new(4, 2).unwrap(),
    ///     PartyMember::new(7, 1).unwrap(),
    /// ]).unwrap();
    /// let stats = party.stats();
    /// assert_eq!(stats.average_level, 5.0);
    /// assert_eq!(stats.party_size, 3);
    /// ```
    pub fn stats(&self) -> PartyStats {
        let head_count = self.head_count();
        if head_count == 0 {
            return PartyStats::default();
        }

        let level_sum: u64 = self
            .members
            .iter()
            .map(|m| u64::from(m.level) * u64::from(m.quantity))
            .sum();

        PartyStats {
            average_level: level_sum as f64 / head_count as f64,
            party_size: head_count.min(u64::from(MAX_PARTY_SIZE)) as u32,
        }
    }
}

impl FromStr for PartyComposition {
    type Err = WaylayError;

    /// Parses a comma separated list of `LEVELxQUANTITY` groups.
    fn from_str(s: &str) -> WaylayResult<Self> {
        let members = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<WaylayResult<Vec<PartyMember>>>()?;
        Ok(Self { members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_party_defaults() {
        let stats = PartyComposition::default().stats();
        assert_eq!(stats.average_level, 1.0);
        assert_eq!(stats.party_size, 1);
    }

    #[test]
    fn test_party_size_is_capped() {
        let party = PartyComposition::uniform(3, 9).unwrap();
        assert_eq!(party.head_count(), 9);
        assert_eq!(party.stats().party_size, 6);
    }

    #[test]
    fn test_huge_party_does_not_overflow() {
        let party: PartyComposition = "5x4294967295,5x1".parse().unwrap();
        assert_eq!(party.head_count(), 4_294_967_296);
        let stats = party.stats();
        assert_eq!(stats.average_level, 5.0);
        assert_eq!(stats.party_size, 6);
    }

    #[test]
    fn test_weighted_average_level() {
        let party: PartyComposition = "5x4".parse().unwrap();
        let stats = party.stats();
        assert_eq!(stats.average_level, 5.0);
        assert_eq!(stats.party_size, 4);

        let mixed: PartyComposition = "2x3, 10".parse().unwrap();
        assert_eq!(mixed.stats().average_level, 4.0);
    }

    #[test]
    fn test_parse_rejects_bad_groups() {
        assert!("0x2".parse::<PartyComposition>().is_err());
        assert!("5x".parse::<PartyComposition>().is_err());
        assert!("abc".parse::<PartyComposition>().is_err());
        assert!("".parse::<PartyComposition>().unwrap().is_empty());
    }

    #[test]
    fn test_deserialized_party_with_zero_quantity_is_safe() {
        // Bypasses validation the way a raw JSON payload could
        let party: PartyComposition =
            serde_json::from_str(r#"[{"level": 5, "quantity": 0}]"#).unwrap();
        assert_eq!(party.stats(), PartyStats::default());
    }
}
