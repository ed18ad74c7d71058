//! Ability value object - the six ability scores of a character.
//!
//! Provides type safety for ability references instead of using magic strings
//! like "strength" or "STR". The set is closed: there is no fallback variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// One of the six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKey {
    /// Strength - physical power
    Strength,
    /// Dexterity - agility and reflexes
    Dexterity,
    /// Constitution - endurance and health
    Constitution,
    /// Intelligence - reasoning and memory
    Intelligence,
    /// Wisdom - perception and insight
    Wisdom,
    /// Charisma - force of personality
    Charisma,
}

impl AbilityKey {
    /// All abilities in canonical sheet order.
    pub const ALL: [AbilityKey; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Position of this ability in [`AbilityKey::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Strength => 0,
            Self::Dexterity => 1,
            Self::Constitution => 2,
            Self::Intelligence => 3,
            Self::Wisdom => 4,
            Self::Charisma => 5,
        }
    }

    /// Returns the record key (e.g., "strength", "dexterity").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }

    /// Returns the short uppercase abbreviation (e.g., "STR", "DEX").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Returns the title-case name (e.g., "Strength").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AbilityKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STR" | "STRENGTH" => Ok(Self::Strength),
            "DEX" | "DEXTERITY" => Ok(Self::Dexterity),
            "CON" | "CONSTITUTION" => Ok(Self::Constitution),
            "INT" | "INTELLIGENCE" => Ok(Self::Intelligence),
            "WIS" | "WISDOM" => Ok(Self::Wisdom),
            "CHA" | "CHARISMA" => Ok(Self::Charisma),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}
