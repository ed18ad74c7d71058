//! Ability-score domain events
//!
//! These enums communicate what happened when a stat block edit was
//! attempted, allowing callers to decide whether to refresh their view.

use crate::value_objects::{AbilityKey, BumpLevel};

/// Outcome of changing a base ability score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    /// Score moved
    Changed { key: AbilityKey, from: i32, to: i32 },
    /// The rules did not allow the change; score untouched
    Denied { key: AbilityKey, score: i32 },
}

impl ScoreChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Outcome of changing a background bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpChange {
    /// Bump level changed (to `None` when cleared)
    Changed {
        key: AbilityKey,
        from: BumpLevel,
        to: BumpLevel,
    },
    /// The rules did not allow the change; bump untouched
    Denied { key: AbilityKey, current: BumpLevel },
}

impl BumpChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}
