//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate the domain aggregates and the infrastructure ports.

pub mod ability_scores;

// Re-export main types
pub use ability_scores::{AbilityScoreError, AbilityScoreUseCases};
