//! Ability-score domain: point-buy allocation with background bumps.
//!
//! Everything here is pure and synchronous. Rules live in
//! [`game_systems`], the [`aggregates::StatBlocks`] façade combines them for
//! one character.

pub mod aggregates;
pub mod error;
pub mod events;
pub mod game_systems;
pub mod value_objects;

pub use aggregates::{AbilityRow, StatBlocks, StatBlocksState};
pub use error::DomainError;
pub use events::{BumpChange, ScoreChange};
pub use game_systems::{
    ability_modifier, modifier_string, BumpOverlay, BumpPreset, PointBuy, ABSOLUTE_SCORE_CEILING,
};
pub use value_objects::{
    AbilityKey, AbilityScore, BumpLevel, BumpState, PointBuyConfig, StatBlock,
    DEFAULT_POINT_COSTS, DEFAULT_TOTAL_POINTS, MAX_BUMP_WEIGHT,
};
