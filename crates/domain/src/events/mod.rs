//! Domain Events
//!
//! Return types from aggregate mutations, communicating what happened when
//! state was modified.

pub mod ability_events;

pub use ability_events::{BumpChange, ScoreChange};
