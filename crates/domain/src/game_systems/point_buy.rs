//! Point-buy allocator.
//!
//! Keeps base ability scores inside the configured bounds and inside the
//! shared point budget. Every operation is a pure function of the config and
//! the stat block it is given. Disallowed changes are denials, not errors:
//! `increase`/`decrease` hand back the input unchanged and callers consult
//! `can_increase`/`can_decrease` to disable affordances.

use std::cmp::Ordering;

use crate::value_objects::{AbilityKey, PointBuyConfig, StatBlock};
use crate::DomainError;

/// Point-buy rules bound to one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointBuy {
    config: PointBuyConfig,
}

impl PointBuy {
    pub fn new(config: PointBuyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PointBuyConfig {
        &self.config
    }

    /// Start state: every ability at the minimum score.
    pub fn initialize_stats(&self) -> StatBlock {
        StatBlock::uniform(self.config.min_score())
    }

    /// Cost of a score, priced at the nearest table edge when out of range.
    ///
    /// Out-of-range scores only appear in blocks built outside the allocator;
    /// [`PointBuy::validate`] rejects those.
    fn cost(&self, score: i32) -> i32 {
        let clamped = score.clamp(self.config.min_score(), self.config.max_score());
        self.config.cost(clamped).unwrap_or(0)
    }

    /// Sum of the cost of every ability's score.
    pub fn points_spent(&self, stats: &StatBlock) -> i32 {
        stats.iter().map(|(_, score)| self.cost(score)).sum()
    }

    /// Budget left. Negative only for blocks built outside the allocator.
    pub fn remaining_points(&self, stats: &StatBlock) -> i32 {
        self.config.total_points() - self.points_spent(stats)
    }

    /// Whether `key` can be raised by one.
    pub fn can_increase(&self, stats: &StatBlock, key: AbilityKey) -> bool {
        self.can_increase_to(stats, key, stats.get(key) + 1)
    }

    /// Whether `key` can be set to `target` within the bounds and the budget.
    pub fn can_increase_to(&self, stats: &StatBlock, key: AbilityKey, target: i32) -> bool {
        if !self.config.in_range(target) {
            return false;
        }
        let delta = self.cost(target) - self.cost(stats.get(key));
        delta <= self.remaining_points(stats)
    }

    /// Whether `key` can be lowered by one.
    pub fn can_decrease(&self, stats: &StatBlock, key: AbilityKey) -> bool {
        self.can_decrease_to(stats, key, stats.get(key) - 1)
    }

    /// Whether `key` can be set to `target`. Lowering only frees points, so
    /// no budget check applies.
    pub fn can_decrease_to(&self, _stats: &StatBlock, _key: AbilityKey, target: i32) -> bool {
        target >= self.config.min_score()
    }

    /// Raise `key` by one, or return the block unchanged when denied.
    pub fn increase(&self, stats: StatBlock, key: AbilityKey) -> StatBlock {
        if self.can_increase(&stats, key) {
            stats.with_score(key, stats.get(key) + 1)
        } else {
            stats
        }
    }

    /// Lower `key` by one, or return the block unchanged when denied.
    pub fn decrease(&self, stats: StatBlock, key: AbilityKey) -> StatBlock {
        if self.can_decrease(&stats, key) {
            stats.with_score(key, stats.get(key) - 1)
        } else {
            stats
        }
    }

    /// Highest score `key` can reach from its current value with the points
    /// left. The cost curve is not linear, so the whole range is scanned.
    pub fn max_reachable_value(&self, stats: &StatBlock, key: AbilityKey) -> i32 {
        let current = stats.get(key);
        let remaining = self.remaining_points(stats);
        let base_cost = self.cost(current);

        (current..=self.config.max_score())
            .filter(|&v| self.cost(v) - base_cost <= remaining)
            .max()
            .unwrap_or(current)
    }

    /// Walk `key` from `actual` toward `target` one step at a time,
    /// re-checking each step against the current block, and stop at the
    /// target or at the first step that is not allowed.
    ///
    /// `actual` is the value the caller displays (it may include a bump); the
    /// returned value is `actual` moved by the number of accepted steps.
    pub fn set_to_closest_allowed_value(
        &self,
        stats: StatBlock,
        key: AbilityKey,
        actual: i32,
        target: i32,
    ) -> (i32, StatBlock) {
        let step = match target.cmp(&actual) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => 0,
        };
        let mut value = actual;
        let mut current = stats;

        while value != target {
            let allowed = if step > 0 {
                self.can_increase(&current, key)
            } else {
                self.can_decrease(&current, key)
            };
            if !allowed {
                break;
            }
            current = current.with_score(key, current.get(key) + step);
            value += step;
        }

        (value, current)
    }

    /// Check a block built outside the allocator: every score in range and
    /// the budget not overspent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for an out-of-range score and
    /// [`DomainError::Constraint`] for an overspent budget.
    pub fn validate(&self, stats: &StatBlock) -> Result<(), DomainError> {
        if let Some((key, score)) = stats.iter().find(|&(_, s)| !self.config.in_range(s)) {
            return Err(DomainError::validation(format!(
                "{} score {} is outside {}..={}",
                key,
                score,
                self.config.min_score(),
                self.config.max_score()
            )));
        }
        let remaining = self.remaining_points(stats);
        if remaining < 0 {
            return Err(DomainError::constraint(format!(
                "Point buy overspent by {}",
                -remaining
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::AbilityKey::*;
    use proptest::prelude::*;

    fn standard() -> PointBuy {
        PointBuy::new(PointBuyConfig::default())
    }

    #[test]
    fn initialize_stats_starts_at_minimum_with_full_budget() {
        let pb = standard();
        let stats = pb.initialize_stats();
        assert!(stats.iter().all(|(_, s)| s == 8));
        assert_eq!(pb.points_spent(&stats), 0);
        assert_eq!(pb.remaining_points(&stats), 27);
    }

    #[test]
    fn seven_increases_reach_max_then_deny() {
        let pb = standard();
        let mut stats = pb.initialize_stats();
        for _ in 0..7 {
            assert!(pb.can_increase(&stats, Strength));
            stats = pb.increase(stats, Strength);
        }
        assert_eq!(stats.get(Strength), 15);
        assert_eq!(pb.remaining_points(&stats), 18);

        assert!(!pb.can_increase(&stats, Strength));
        let after = pb.increase(stats, Strength);
        assert_eq!(after, stats);
    }

    #[test]
    fn increase_then_decrease_round_trips() {
        let pb = standard();
        let stats = pb.initialize_stats().with_score(Dexterity, 12);
        let raised = pb.increase(stats, Dexterity);
        assert_eq!(raised.get(Dexterity), 13);
        assert_eq!(pb.decrease(raised, Dexterity), stats);
    }

    #[test]
    fn decrease_at_minimum_is_denied() {
        let pb = standard();
        let stats = pb.initialize_stats();
        assert!(!pb.can_decrease(&stats, Wisdom));
        assert_eq!(pb.decrease(stats, Wisdom), stats);
    }

    #[test]
    fn no_increase_once_budget_is_spent() {
        let pb = standard();
        // 15,15,15 = 27 points
        let stats = StatBlock::from_scores([15, 15, 15, 8, 8, 8]);
        assert_eq!(pb.remaining_points(&stats), 0);
        for key in AbilityKey::ALL {
            assert!(!pb.can_increase(&stats, key));
        }
    }

    #[test]
    fn increase_denied_when_step_costs_more_than_remaining() {
        let pb = standard();
        // 15,15 (18) + 13 (5) + 10 (2) + 9 (1) = 26, one point left
        let stats = StatBlock::from_scores([15, 15, 13, 10, 9, 8]);
        assert_eq!(pb.remaining_points(&stats), 1);
        // 13 -> 14 costs 2
        assert!(!pb.can_increase(&stats, Constitution));
        // 10 -> 11 costs 1
        assert!(pb.can_increase(&stats, Intelligence));
    }

    #[test]
    fn can_increase_to_checks_total_delta() {
        let pb = standard();
        let stats = StatBlock::from_scores([15, 15, 8, 8, 8, 8]); // 9 left
        assert!(pb.can_increase_to(&stats, Wisdom, 15));
        assert!(!pb.can_increase_to(&stats, Wisdom, 16));

        let tighter = stats.with_score(Charisma, 12); // 5 left
        assert!(pb.can_increase_to(&tighter, Wisdom, 13));
        assert!(!pb.can_increase_to(&tighter, Wisdom, 14));
    }

    #[test]
    fn max_reachable_value_follows_cost_curve() {
        let pb = standard();
        let fresh = pb.initialize_stats();
        assert_eq!(pb.max_reachable_value(&fresh, Strength), 15);

        // 5 points left: 8 -> 13 costs 5, 8 -> 14 costs 7
        let stats = StatBlock::from_scores([15, 15, 12, 8, 8, 8]);
        assert_eq!(pb.remaining_points(&stats), 5);
        assert_eq!(pb.max_reachable_value(&stats, Wisdom), 13);

        let spent = StatBlock::from_scores([15, 15, 15, 8, 8, 8]);
        assert_eq!(pb.max_reachable_value(&spent, Wisdom), 8);
        assert_eq!(pb.max_reachable_value(&spent, Strength), 15);
    }

    #[test]
    fn closest_allowed_value_stops_at_first_unaffordable_step() {
        let pb = standard();
        // 15,15 (18) + 12 (4) + 10 (2) = 24, three points left
        let stats = StatBlock::from_scores([15, 15, 12, 10, 8, 8]);
        assert_eq!(pb.remaining_points(&stats), 3);

        let (value, result) = pb.set_to_closest_allowed_value(stats, Intelligence, 10, 15);
        assert_eq!(value, 13);
        assert_eq!(result.get(Intelligence), 13);
        assert_eq!(pb.remaining_points(&result), 0);
    }

    #[test]
    fn closest_allowed_value_walks_down_to_minimum() {
        let pb = standard();
        let stats = pb.initialize_stats().with_score(Charisma, 11);
        let (value, result) = pb.set_to_closest_allowed_value(stats, Charisma, 11, 3);
        assert_eq!(value, 8);
        assert_eq!(result.get(Charisma), 8);
    }

    #[test]
    fn closest_allowed_value_uses_displayed_offset() {
        let pb = standard();
        let stats = pb.initialize_stats().with_score(Wisdom, 10);
        // Displayed 12 (base 10 + 2), asked for 14
        let (value, result) = pb.set_to_closest_allowed_value(stats, Wisdom, 12, 14);
        assert_eq!(value, 14);
        assert_eq!(result.get(Wisdom), 12);
    }

    #[test]
    fn closest_allowed_value_handles_extreme_targets() {
        let pb = standard();
        let stats = pb.initialize_stats().with_score(Strength, 9);

        let (value, result) = pb.set_to_closest_allowed_value(stats, Strength, 9, i32::MIN);
        assert_eq!(value, 8);
        assert_eq!(result.get(Strength), 8);

        let (value, result) = pb.set_to_closest_allowed_value(stats, Strength, 9, i32::MAX);
        assert_eq!(value, 15);
        assert_eq!(result.get(Strength), 15);
    }

    #[test]
    fn closest_allowed_value_at_target_is_unchanged() {
        let pb = standard();
        let stats = pb.initialize_stats();
        let (value, result) = pb.set_to_closest_allowed_value(stats, Strength, 8, 8);
        assert_eq!(value, 8);
        assert_eq!(result, stats);
    }

    #[test]
    fn validate_rejects_out_of_range_and_overspent_blocks() {
        let pb = standard();
        assert!(pb.validate(&pb.initialize_stats()).is_ok());

        let low = StatBlock::uniform(8).with_score(Strength, 7);
        assert!(matches!(pb.validate(&low), Err(DomainError::Validation(_))));

        let overspent = StatBlock::from_scores([15, 15, 15, 15, 8, 8]);
        assert!(matches!(
            pb.validate(&overspent),
            Err(DomainError::Constraint(_))
        ));
    }

    proptest! {
        #[test]
        fn points_spent_never_exceeds_budget_along_any_walk(
            ops in prop::collection::vec((0usize..6, any::<bool>()), 0..500)
        ) {
            let pb = standard();
            let mut stats = pb.initialize_stats();
            for (index, raise) in ops {
                let key = AbilityKey::ALL[index];
                stats = if raise {
                    pb.increase(stats, key)
                } else {
                    pb.decrease(stats, key)
                };
                prop_assert!(pb.points_spent(&stats) <= 27);
                prop_assert!(pb.validate(&stats).is_ok());
            }
        }

        #[test]
        fn closest_allowed_value_stays_in_bounds(start in 8i32..=15, target in any::<i32>()) {
            let pb = standard();
            let stats = pb.initialize_stats().with_score(Strength, start);
            let (value, result) = pb.set_to_closest_allowed_value(stats, Strength, start, target);
            prop_assert_eq!(value, result.get(Strength));
            prop_assert!((8..=15).contains(&value));
            prop_assert!(pb.validate(&result).is_ok());
        }
    }
}
