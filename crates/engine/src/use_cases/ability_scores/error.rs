//! Ability score operation errors.

use crate::infrastructure::ports::CatalogError;
use charbldr_domain::DomainError;

/// Errors that can occur during ability score operations.
///
/// Rule denials (an increase past the budget, a second +2) are not errors;
/// they come back as `ScoreChange::Denied` / `BumpChange::Denied`.
#[derive(Debug, thiserror::Error)]
pub enum AbilityScoreError {
    #[error("Background not found: {0}")]
    BackgroundNotFound(String),

    #[error("Background {background} lists unknown ability {ability:?}")]
    UnknownAbility { background: String, ability: String },

    /// Typed score entry that is not an integer; holds the raw input.
    #[error("enter a valid number")]
    InvalidNumber(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
