//! Point-buy configuration: budget, score bounds and the cost table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game_systems::dnd5e::ABSOLUTE_SCORE_CEILING;
use crate::DomainError;

/// Standard 5e point-buy budget.
pub const DEFAULT_TOTAL_POINTS: i32 = 27;
/// Standard 5e cost table, 8 through 15.
pub const DEFAULT_POINT_COSTS: [(i32, i32); 8] = [
    (8, 0),
    (9, 1),
    (10, 2),
    (11, 3),
    (12, 4),
    (13, 5),
    (14, 7),
    (15, 9),
];

/// Immutable point-buy rules.
///
/// # Invariants
///
/// - `min_score <= max_score <= 20`
/// - `total_points >= 0`
/// - the cost table has exactly one entry per score in `[min_score, max_score]`
/// - costs are non-negative and non-decreasing in score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PointBuyConfigRecord")]
pub struct PointBuyConfig {
    total_points: i32,
    min_score: i32,
    max_score: i32,
    point_costs: BTreeMap<i32, i32>,
}

/// Unvalidated wire shape of [`PointBuyConfig`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointBuyConfigRecord {
    total_points: i32,
    min_score: i32,
    max_score: i32,
    point_costs: BTreeMap<i32, i32>,
}

impl TryFrom<PointBuyConfigRecord> for PointBuyConfig {
    type Error = DomainError;

    fn try_from(record: PointBuyConfigRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.total_points,
            record.min_score,
            record.max_score,
            record.point_costs,
        )
    }
}

impl PointBuyConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if any invariant listed on the type
    /// does not hold.
    pub fn new(
        total_points: i32,
        min_score: i32,
        max_score: i32,
        point_costs: BTreeMap<i32, i32>,
    ) -> Result<Self, DomainError> {
        if total_points < 0 {
            return Err(DomainError::validation("Total points cannot be negative"));
        }
        if min_score < 1 {
            return Err(DomainError::validation("Minimum score must be at least 1"));
        }
        if min_score > max_score {
            return Err(DomainError::validation(format!(
                "Minimum score {} exceeds maximum score {}",
                min_score, max_score
            )));
        }
        if max_score > ABSOLUTE_SCORE_CEILING {
            return Err(DomainError::validation(format!(
                "Maximum score {} exceeds the ceiling of {}",
                max_score, ABSOLUTE_SCORE_CEILING
            )));
        }
        if let Some(stray) = point_costs
            .keys()
            .find(|&&score| score < min_score || score > max_score)
        {
            return Err(DomainError::validation(format!(
                "Cost table has an entry for {} outside {}..={}",
                stray, min_score, max_score
            )));
        }

        let mut previous: Option<i32> = None;
        for score in min_score..=max_score {
            let cost = *point_costs.get(&score).ok_or_else(|| {
                DomainError::validation(format!("Cost table has no entry for {}", score))
            })?;
            if cost < 0 {
                return Err(DomainError::validation(format!(
                    "Cost for {} cannot be negative",
                    score
                )));
            }
            if previous.is_some_and(|p| cost < p) {
                return Err(DomainError::validation(format!(
                    "Cost for {} is lower than the cost for {}",
                    score,
                    score - 1
                )));
            }
            previous = Some(cost);
        }

        Ok(Self {
            total_points,
            min_score,
            max_score,
            point_costs,
        })
    }

    pub fn total_points(&self) -> i32 {
        self.total_points
    }

    pub fn min_score(&self) -> i32 {
        self.min_score
    }

    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    /// Whether `score` lies in the cost table's domain.
    pub fn in_range(&self, score: i32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }

    /// Cumulative cost of reaching `score` from `min_score`.
    ///
    /// Returns `None` outside `[min_score, max_score]`.
    pub fn cost(&self, score: i32) -> Option<i32> {
        self.point_costs.get(&score).copied()
    }

    /// The cost table (score → cumulative cost).
    pub fn point_costs(&self) -> &BTreeMap<i32, i32> {
        &self.point_costs
    }
}

impl Default for PointBuyConfig {
    /// 27 points, scores 8 through 15, costs 0,1,2,3,4,5,7,9.
    fn default() -> Self {
        Self {
            total_points: DEFAULT_TOTAL_POINTS,
            min_score: 8,
            max_score: 15,
            point_costs: DEFAULT_POINT_COSTS.into_iter().collect(),
        }
    }
}
