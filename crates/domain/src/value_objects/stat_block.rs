//! StatBlock and AbilityScore - base ability scores and their composed view
//!
//! A `StatBlock` always holds exactly one score per [`AbilityKey`]. On the
//! wire it is a plain `{ "strength": 8, ... }` record; records with missing
//! or unknown keys are rejected when deserialized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ability::AbilityKey;
use super::bump::BumpLevel;
use crate::DomainError;

/// Base ability scores, one per ability.
///
/// This is an immutable value object. Use [`StatBlock::with_score`] to create
/// modified copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<AbilityKey, i32>",
    into = "BTreeMap<AbilityKey, i32>"
)]
pub struct StatBlock {
    scores: [i32; 6],
}

impl StatBlock {
    /// Create a block with every ability at `score`.
    pub fn uniform(score: i32) -> Self {
        Self { scores: [score; 6] }
    }

    /// Create a block from scores listed in [`AbilityKey::ALL`] order.
    pub fn from_scores(scores: [i32; 6]) -> Self {
        Self { scores }
    }

    /// Get the base score of an ability.
    pub fn get(&self, key: AbilityKey) -> i32 {
        self.scores[key.index()]
    }

    /// Create a copy with one ability changed.
    pub fn with_score(mut self, key: AbilityKey, score: i32) -> Self {
        self.scores[key.index()] = score;
        self
    }

    /// Iterate `(ability, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AbilityKey, i32)> + '_ {
        AbilityKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }
}

impl TryFrom<BTreeMap<AbilityKey, i32>> for StatBlock {
    type Error = DomainError;

    fn try_from(record: BTreeMap<AbilityKey, i32>) -> Result<Self, Self::Error> {
        // Unknown keys never reach here: AbilityKey deserialization rejects them.
        let mut scores = [0; 6];
        for key in AbilityKey::ALL {
            scores[key.index()] = *record.get(&key).ok_or_else(|| {
                DomainError::validation(format!("Stat block is missing {}", key))
            })?;
        }
        Ok(Self { scores })
    }
}

impl From<StatBlock> for BTreeMap<AbilityKey, i32> {
    fn from(block: StatBlock) -> Self {
        block.iter().collect()
    }
}

/// A composed ability score: base value, applied bump, and effective total.
///
/// This is an immutable value object representing a computed snapshot; it is
/// what callers render for each ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScore {
    key: AbilityKey,
    base: i32,
    bump: BumpLevel,
    effective: i32,
}

impl AbilityScore {
    /// Create a score view. The caller supplies the already-capped effective value.
    pub fn new(key: AbilityKey, base: i32, bump: BumpLevel, effective: i32) -> Self {
        Self {
            key,
            base,
            bump,
            effective,
        }
    }

    pub fn key(&self) -> AbilityKey {
        self.key
    }

    /// Get the base value (before the background bump).
    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn bump(&self) -> BumpLevel {
        self.bump
    }

    /// Get the effective value (base + bump, capped).
    pub fn effective(&self) -> i32 {
        self.effective
    }

    /// Whether a background bump applies to this ability.
    pub fn is_bumped(&self) -> bool {
        self.bump.is_some()
    }
}
