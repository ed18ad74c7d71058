//! Background ability-score bumps.
//!
//! A background grants either +1 to three abilities or +2 to one and +1 to
//! another, restricted to the abilities the background lists. Bumps sit on
//! top of point-buy and never change point cost.
//!
//! Per ability the only transitions are `None -> One`, `None -> Two` and back
//! to `None`. A bumped ability must be cleared before it can take a different
//! level. The global rule (total weight at most 3, at most one `Two`) is
//! checked on every attempt.

use std::collections::BTreeSet;

use crate::game_systems::dnd5e::ABSOLUTE_SCORE_CEILING;
use crate::value_objects::{AbilityKey, BumpLevel, BumpState, StatBlock, MAX_BUMP_WEIGHT};

/// Ready-made bump layouts offered next to the per-ability toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpPreset {
    /// +1 to every eligible ability (a background lists three).
    Balanced,
    /// +2 to one ability and +1 to another.
    Focused { plus_two: AbilityKey, plus_one: AbilityKey },
}

/// Bump rules for one background's eligible abilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpOverlay {
    eligible: BTreeSet<AbilityKey>,
}

impl BumpOverlay {
    pub fn new(eligible: impl IntoIterator<Item = AbilityKey>) -> Self {
        Self {
            eligible: eligible.into_iter().collect(),
        }
    }

    /// No background selected: nothing can be bumped.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn eligible(&self) -> &BTreeSet<AbilityKey> {
        &self.eligible
    }

    pub fn is_eligible(&self, key: AbilityKey) -> bool {
        self.eligible.contains(&key)
    }

    /// Base score plus bump, capped at the absolute ceiling.
    pub fn effective_score(&self, stats: &StatBlock, bumps: &BumpState, key: AbilityKey) -> i32 {
        (stats.get(key) + bumps.get(key).weight()).min(ABSOLUTE_SCORE_CEILING)
    }

    /// Effective score of every ability, shaped like a stat block.
    pub fn all_effective_scores(&self, stats: &StatBlock, bumps: &BumpState) -> StatBlock {
        AbilityKey::ALL.iter().fold(*stats, |block, &key| {
            block.with_score(key, self.effective_score(stats, bumps, key))
        })
    }

    /// Whether `key` may move to `level` from its current bump.
    pub fn can_apply(
        &self,
        stats: &StatBlock,
        bumps: &BumpState,
        key: AbilityKey,
        level: BumpLevel,
    ) -> bool {
        if !self.is_eligible(key) {
            return false;
        }
        let current = bumps.get(key);
        if current == level {
            return false;
        }
        if level == BumpLevel::None {
            return true;
        }
        // Any bumped ability has to go back to None before taking another level.
        if current.is_some() {
            return false;
        }
        if level == BumpLevel::Two && bumps.count(BumpLevel::Two) > 0 {
            return false;
        }
        let new_total = bumps.total_weight() - current.weight() + level.weight();
        if new_total > MAX_BUMP_WEIGHT {
            return false;
        }
        stats.get(key) + level.weight() <= ABSOLUTE_SCORE_CEILING
    }

    /// Set `key` to `level` if allowed. Returns whether the state changed.
    pub fn apply(
        &self,
        stats: &StatBlock,
        bumps: &mut BumpState,
        key: AbilityKey,
        level: BumpLevel,
    ) -> bool {
        if !self.can_apply(stats, bumps, key, level) {
            return false;
        }
        bumps.set(key, level);
        true
    }

    /// Clear `key` regardless of eligibility. Returns whether it held a bump.
    pub fn remove(&self, bumps: &mut BumpState, key: AbilityKey) -> bool {
        let held = bumps.get(key).is_some();
        bumps.clear(key);
        held
    }

    /// Clear every bump.
    pub fn reset_all(&self, bumps: &mut BumpState) {
        bumps.clear_all();
    }

    /// Whether `key`'s effective score still fits under the ceiling once its
    /// base score is raised to `base`.
    pub fn fits_ceiling(&self, bumps: &BumpState, key: AbilityKey, base: i32) -> bool {
        base + bumps.get(key).weight() <= ABSOLUTE_SCORE_CEILING
    }

    /// Build the bump state a preset describes, starting from no bumps.
    ///
    /// Returns `None` if any step of the preset is not allowed.
    pub fn preset_state(&self, stats: &StatBlock, preset: BumpPreset) -> Option<BumpState> {
        let steps: Vec<(AbilityKey, BumpLevel)> = match preset {
            BumpPreset::Balanced => {
                if self.eligible.is_empty() {
                    return None;
                }
                self.eligible.iter().map(|&k| (k, BumpLevel::One)).collect()
            }
            BumpPreset::Focused { plus_two, plus_one } => {
                if plus_two == plus_one {
                    return None;
                }
                vec![(plus_two, BumpLevel::Two), (plus_one, BumpLevel::One)]
            }
        };

        let mut state = BumpState::new();
        for (key, level) in steps {
            if !self.apply(stats, &mut state, key, level) {
                return None;
            }
        }
        Some(state)
    }

    /// Replace `bumps` with a preset if every step is allowed. Returns whether
    /// the state was replaced.
    pub fn apply_preset(
        &self,
        stats: &StatBlock,
        bumps: &mut BumpState,
        preset: BumpPreset,
    ) -> bool {
        match self.preset_state(stats, preset) {
            Some(state) => {
                *bumps = state;
                true
            }
            None => false,
        }
    }

    /// Check a bump state loaded from storage against this background.
    pub fn is_valid_state(&self, stats: &StatBlock, bumps: &BumpState) -> bool {
        bumps.is_within_rule()
            && bumps.iter().all(|(key, level)| {
                self.is_eligible(key) && stats.get(key) + level.weight() <= ABSOLUTE_SCORE_CEILING
            })
    }
}
