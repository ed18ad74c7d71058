//! Value objects - immutable, validated domain primitives

mod ability;
mod bump;
mod point_buy_config;
mod stat_block;

pub use ability::AbilityKey;
pub use bump::{BumpLevel, BumpState, MAX_BUMP_WEIGHT};
pub use point_buy_config::{PointBuyConfig, DEFAULT_POINT_COSTS, DEFAULT_TOTAL_POINTS};
pub use stat_block::{AbilityScore, StatBlock};
