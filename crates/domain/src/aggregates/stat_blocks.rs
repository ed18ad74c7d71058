//! StatBlocks aggregate - one character's ability scores and background bumps
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: base scores and bumps only change through methods
//! - **Valid by construction**: `new()` starts from the point-buy start state,
//!   `from_record()` rejects stored records that break the rules
//! - **Events from mutations**: every edit returns a [`ScoreChange`] or
//!   [`BumpChange`], so callers decide when to refresh their view
//!
//! The aggregate owns no rules of its own. Every decision is delegated to
//! [`PointBuy`] and [`BumpOverlay`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::events::{BumpChange, ScoreChange};
use crate::game_systems::dnd5e::{ability_modifier, modifier_string, ABSOLUTE_SCORE_CEILING};
use crate::game_systems::{BumpOverlay, BumpPreset, PointBuy};
use crate::value_objects::{
    AbilityKey, AbilityScore, BumpLevel, BumpState, PointBuyConfig, StatBlock,
};
use crate::DomainError;

/// The persisted part of a [`StatBlocks`]: base scores and bumps as plain
/// key→value records. Also usable as an undo snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlocksState {
    pub stats: StatBlock,
    #[serde(default)]
    pub bumps: BumpState,
}

/// Everything a view needs to render one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRow {
    pub score: AbilityScore,
    pub modifier: i32,
    /// Highest base score reachable with the points left
    pub max_value: i32,
    pub can_increase: bool,
    pub can_decrease: bool,
    pub can_bump_one: bool,
    pub can_bump_two: bool,
}

/// A character's ability scores under point-buy with background bumps.
///
/// # Example
///
/// ```
/// use charbldr_domain::aggregates::StatBlocks;
/// use charbldr_domain::value_objects::{AbilityKey, BumpLevel, PointBuyConfig};
///
/// let mut sheet = StatBlocks::new(PointBuyConfig::default());
/// assert_eq!(sheet.remaining_points(), 27);
///
/// assert!(sheet.increase(AbilityKey::Wisdom).is_changed());
/// sheet.set_eligible([AbilityKey::Wisdom, AbilityKey::Intelligence]);
/// assert!(sheet.apply_bump(AbilityKey::Wisdom, BumpLevel::Two).is_changed());
///
/// assert_eq!(sheet.effective_score(AbilityKey::Wisdom), 11);
/// assert_eq!(sheet.modifier_string(AbilityKey::Wisdom), "+0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBlocks {
    point_buy: PointBuy,
    overlay: BumpOverlay,
    stats: StatBlock,
    bumps: BumpState,
}

impl StatBlocks {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Start a new allocation: every ability at the minimum, no background.
    pub fn new(config: PointBuyConfig) -> Self {
        let point_buy = PointBuy::new(config);
        let stats = point_buy.initialize_stats();
        Self {
            point_buy,
            overlay: BumpOverlay::none(),
            stats,
            bumps: BumpState::new(),
        }
    }

    /// Rebuild from a stored record and the current background's eligible
    /// abilities.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Validation`] if a score lies outside the config bounds
    /// - [`DomainError::Constraint`] if the budget is overspent or the bumps
    ///   break the background rule for `eligible`
    pub fn from_record(
        config: PointBuyConfig,
        state: StatBlocksState,
        eligible: impl IntoIterator<Item = AbilityKey>,
    ) -> Result<Self, DomainError> {
        let point_buy = PointBuy::new(config);
        point_buy.validate(&state.stats)?;

        let overlay = BumpOverlay::new(eligible);
        if !overlay.is_valid_state(&state.stats, &state.bumps) {
            return Err(DomainError::constraint(
                "Background bumps do not fit the selected background",
            ));
        }

        Ok(Self {
            point_buy,
            overlay,
            stats: state.stats,
            bumps: state.bumps,
        })
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn config(&self) -> &PointBuyConfig {
        self.point_buy.config()
    }

    /// Base scores (without bumps).
    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn bumps(&self) -> &BumpState {
        &self.bumps
    }

    /// Abilities the current background allows bumping.
    pub fn eligible(&self) -> &BTreeSet<AbilityKey> {
        self.overlay.eligible()
    }

    /// Copy of the persisted state.
    pub fn snapshot(&self) -> StatBlocksState {
        StatBlocksState {
            stats: self.stats,
            bumps: self.bumps,
        }
    }

    pub fn points_spent(&self) -> i32 {
        self.point_buy.points_spent(&self.stats)
    }

    pub fn remaining_points(&self) -> i32 {
        self.point_buy.remaining_points(&self.stats)
    }

    pub fn effective_score(&self, key: AbilityKey) -> i32 {
        self.overlay.effective_score(&self.stats, &self.bumps, key)
    }

    /// Effective scores of all abilities.
    pub fn effective_scores(&self) -> StatBlock {
        self.overlay.all_effective_scores(&self.stats, &self.bumps)
    }

    pub fn ability_score(&self, key: AbilityKey) -> AbilityScore {
        AbilityScore::new(
            key,
            self.stats.get(key),
            self.bumps.get(key),
            self.effective_score(key),
        )
    }

    /// Ability modifier of the effective score.
    pub fn modifier(&self, key: AbilityKey) -> i32 {
        ability_modifier(self.effective_score(key))
    }

    pub fn modifier_string(&self, key: AbilityKey) -> String {
        modifier_string(self.effective_score(key))
    }

    // =========================================================================
    // Affordances
    // =========================================================================

    /// Point-buy allows the raise and the bumped score stays under the ceiling.
    pub fn can_increase(&self, key: AbilityKey) -> bool {
        self.point_buy.can_increase(&self.stats, key)
            && self
                .overlay
                .fits_ceiling(&self.bumps, key, self.stats.get(key) + 1)
    }

    pub fn can_decrease(&self, key: AbilityKey) -> bool {
        self.point_buy.can_decrease(&self.stats, key)
    }

    pub fn can_apply_bump(&self, key: AbilityKey, level: BumpLevel) -> bool {
        self.overlay.can_apply(&self.stats, &self.bumps, key, level)
    }

    /// Highest base score `key` can reach with the points left.
    pub fn max_reachable_value(&self, key: AbilityKey) -> i32 {
        let headroom = ABSOLUTE_SCORE_CEILING - self.bumps.get(key).weight();
        self.point_buy
            .max_reachable_value(&self.stats, key)
            .min(headroom)
            .max(self.stats.get(key))
    }

    /// The full view for one ability.
    pub fn row(&self, key: AbilityKey) -> AbilityRow {
        AbilityRow {
            score: self.ability_score(key),
            modifier: self.modifier(key),
            max_value: self.max_reachable_value(key),
            can_increase: self.can_increase(key),
            can_decrease: self.can_decrease(key),
            can_bump_one: self.can_apply_bump(key, BumpLevel::One),
            can_bump_two: self.can_apply_bump(key, BumpLevel::Two),
        }
    }

    /// Views for every ability in canonical order, recomputed on each call.
    pub fn rows(&self) -> [AbilityRow; 6] {
        AbilityKey::ALL.map(|key| self.row(key))
    }

    // =========================================================================
    // Point-buy mutations
    // =========================================================================

    pub fn increase(&mut self, key: AbilityKey) -> ScoreChange {
        if !self.can_increase(key) {
            return self.denied(key);
        }
        let next = self.point_buy.increase(self.stats, key);
        self.commit(key, next)
    }

    pub fn decrease(&mut self, key: AbilityKey) -> ScoreChange {
        let next = self.point_buy.decrease(self.stats, key);
        self.commit(key, next)
    }

    /// Move the base score toward `target`, stopping at the first step the
    /// rules refuse.
    pub fn set_score(&mut self, key: AbilityKey, target: i32) -> ScoreChange {
        let actual = self.stats.get(key);
        let weight = self.bumps.get(key).weight();
        let target = target
            .max(self.config().min_score())
            .min(ABSOLUTE_SCORE_CEILING - weight);
        let (_, next) = self
            .point_buy
            .set_to_closest_allowed_value(self.stats, key, actual, target);
        self.commit(key, next)
    }

    /// Move the displayed (bumped) score toward `target`. The bump stays; only
    /// the base score moves.
    pub fn set_effective_score(&mut self, key: AbilityKey, target: i32) -> ScoreChange {
        let actual = self.effective_score(key);
        let weight = self.bumps.get(key).weight();
        let target = target
            .max(self.config().min_score() + weight)
            .min(ABSOLUTE_SCORE_CEILING);
        let (_, next) = self
            .point_buy
            .set_to_closest_allowed_value(self.stats, key, actual, target);
        self.commit(key, next)
    }

    // =========================================================================
    // Bump mutations
    // =========================================================================

    /// Set a bump level on `key`. `BumpLevel::None` clears an eligible ability.
    pub fn apply_bump(&mut self, key: AbilityKey, level: BumpLevel) -> BumpChange {
        let from = self.bumps.get(key);
        if self.overlay.apply(&self.stats, &mut self.bumps, key, level) {
            BumpChange::Changed {
                key,
                from,
                to: level,
            }
        } else {
            BumpChange::Denied { key, current: from }
        }
    }

    /// Clear the bump on `key`.
    pub fn remove_bump(&mut self, key: AbilityKey) -> BumpChange {
        let from = self.bumps.get(key);
        if self.overlay.remove(&mut self.bumps, key) {
            BumpChange::Changed {
                key,
                from,
                to: BumpLevel::None,
            }
        } else {
            BumpChange::Denied { key, current: from }
        }
    }

    /// Clear every bump. Returns whether any bump was held.
    pub fn reset_all_bumps(&mut self) -> bool {
        let had_bumps = !self.bumps.is_empty();
        self.overlay.reset_all(&mut self.bumps);
        had_bumps
    }

    /// Replace the bumps with a preset layout, all or nothing.
    pub fn apply_preset(&mut self, preset: BumpPreset) -> bool {
        self.overlay.apply_preset(&self.stats, &mut self.bumps, preset)
    }

    /// The background changed: adopt its eligible abilities and clear bumps.
    pub fn set_eligible(&mut self, eligible: impl IntoIterator<Item = AbilityKey>) {
        self.overlay = BumpOverlay::new(eligible);
        self.overlay.reset_all(&mut self.bumps);
    }

    /// The background was removed: nothing is eligible and bumps are cleared.
    pub fn clear_background(&mut self) {
        self.overlay = BumpOverlay::none();
        self.overlay.reset_all(&mut self.bumps);
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn denied(&self, key: AbilityKey) -> ScoreChange {
        ScoreChange::Denied {
            key,
            score: self.stats.get(key),
        }
    }

    fn commit(&mut self, key: AbilityKey, next: StatBlock) -> ScoreChange {
        let from = self.stats.get(key);
        let to = next.get(key);
        if from == to {
            return self.denied(key);
        }
        self.stats = next;
        ScoreChange::Changed { key, from, to }
    }
}
