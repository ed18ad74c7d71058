//! Game rules for ability scores.
//!
//! - [`point_buy`]: base scores under a point budget
//! - [`background_bump`]: background +2/+1 bumps layered on top
//! - [`dnd5e`]: modifiers and the absolute score ceiling

pub mod background_bump;
pub mod dnd5e;
pub mod point_buy;

pub use background_bump::{BumpOverlay, BumpPreset};
pub use dnd5e::{ability_modifier, modifier_string, ABSOLUTE_SCORE_CEILING};
pub use point_buy::PointBuy;
