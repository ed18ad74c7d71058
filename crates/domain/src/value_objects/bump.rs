//! Background bump levels and the per-character bump state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ability::AbilityKey;
use crate::DomainError;

/// Largest total bump weight a background grants (+1/+1/+1 or +2/+1).
pub const MAX_BUMP_WEIGHT: i32 = 3;

/// How far a background raises one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    #[default]
    None,
    /// +1
    One,
    /// +2
    Two,
}

impl BumpLevel {
    /// Points this level adds to the score, which is also its cost against
    /// [`MAX_BUMP_WEIGHT`].
    pub const fn weight(self) -> i32 {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub fn is_some(self) -> bool {
        self != Self::None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::One => "one",
            Self::Two => "two",
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BumpLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" | "0" => Ok(Self::None),
            "one" | "+1" | "1" => Ok(Self::One),
            "two" | "+2" | "2" => Ok(Self::Two),
            _ => Err(DomainError::parse(format!("Unknown bump level: {}", s))),
        }
    }
}

/// Bump level per ability. Absent abilities are at [`BumpLevel::None`].
///
/// Serialized as a plain record of the bumped abilities only
/// (`{ "wisdom": "two", "intelligence": "one" }`). Records that break the
/// background improvement rule are rejected when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<AbilityKey, BumpLevel>",
    into = "BTreeMap<AbilityKey, BumpLevel>"
)]
pub struct BumpState {
    levels: [BumpLevel; 6],
}

impl BumpState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: AbilityKey) -> BumpLevel {
        self.levels[key.index()]
    }

    /// Set a level directly, or clear the ability when `level` is `None`.
    ///
    /// No rule checks happen here; see `BumpOverlay` for validated changes.
    pub fn set(&mut self, key: AbilityKey, level: BumpLevel) {
        self.levels[key.index()] = level;
    }

    /// Clear a single ability.
    pub fn clear(&mut self, key: AbilityKey) {
        self.set(key, BumpLevel::None);
    }

    /// Clear every ability.
    pub fn clear_all(&mut self) {
        self.levels = [BumpLevel::None; 6];
    }

    /// Sum of the weights of every applied bump.
    pub fn total_weight(&self) -> i32 {
        self.levels.iter().map(|level| level.weight()).sum()
    }

    /// Number of abilities holding exactly `level`.
    pub fn count(&self, level: BumpLevel) -> usize {
        self.levels.iter().filter(|&&l| l == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|level| !level.is_some())
    }

    /// Iterate the bumped abilities in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AbilityKey, BumpLevel)> + '_ {
        AbilityKey::ALL
            .iter()
            .map(move |&key| (key, self.get(key)))
            .filter(|(_, level)| level.is_some())
    }

    /// Whether the state satisfies the background improvement rule: total
    /// weight at most [`MAX_BUMP_WEIGHT`] and at most one ability at `Two`.
    pub fn is_within_rule(&self) -> bool {
        self.total_weight() <= MAX_BUMP_WEIGHT && self.count(BumpLevel::Two) <= 1
    }
}

impl TryFrom<BTreeMap<AbilityKey, BumpLevel>> for BumpState {
    type Error = DomainError;

    fn try_from(record: BTreeMap<AbilityKey, BumpLevel>) -> Result<Self, Self::Error> {
        let mut state = Self::new();
        for (key, level) in record {
            state.set(key, level);
        }
        if !state.is_within_rule() {
            return Err(DomainError::constraint(format!(
                "Background bumps exceed the allowed total: weight {}, {} at +2",
                state.total_weight(),
                state.count(BumpLevel::Two)
            )));
        }
        Ok(state)
    }
}

impl From<BumpState> for BTreeMap<AbilityKey, BumpLevel> {
    fn from(state: BumpState) -> Self {
        state.iter().collect()
    }
}
