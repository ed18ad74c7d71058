//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns domain events from mutations

pub mod stat_blocks;

pub use stat_blocks::{AbilityRow, StatBlocks, StatBlocksState};
