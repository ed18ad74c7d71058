//! Background catalog port.

use serde::{Deserialize, Serialize};

use super::CatalogError;

/// A background as the catalog stores it. Ability names are free text here;
/// the use cases turn them into `AbilityKey`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub feats: Vec<String>,
    #[serde(default)]
    pub skill_proficiencies: Vec<String>,
    /// Abilities this background may bump, by full name ("Wisdom").
    pub ability_score_improvements: Vec<String>,
}

/// Read access to the available backgrounds.
#[cfg_attr(test, mockall::automock)]
pub trait BackgroundCatalog: Send + Sync {
    /// All backgrounds in catalog order.
    fn list_backgrounds(&self) -> Result<Vec<BackgroundRecord>, CatalogError>;

    /// Look a background up by name, ignoring case.
    fn get_background(&self, name: &str) -> Result<Option<BackgroundRecord>, CatalogError>;
}
