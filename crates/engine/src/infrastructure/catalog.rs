//! Background catalog backed by data embedded at build time, or read from a
//! JSON file for custom background lists.

use std::path::Path;

use crate::infrastructure::ports::{BackgroundCatalog, BackgroundRecord, CatalogError};

const EMBEDDED_BACKGROUNDS_JSON: &str = include_str!("../../data/backgrounds.json");

/// In-memory catalog, loaded once from JSON.
#[derive(Debug, Clone)]
pub struct StaticBackgroundCatalog {
    backgrounds: Vec<BackgroundRecord>,
}

impl StaticBackgroundCatalog {
    /// Load the backgrounds shipped with the crate.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_BACKGROUNDS_JSON)
    }

    /// Load backgrounds from a JSON file in the embedded format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Parse a JSON array of background records.
    ///
    /// Names must be unique ignoring case and every background must list at
    /// least one ability.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let backgrounds: Vec<BackgroundRecord> = serde_json::from_str(json)
            .map_err(|e| CatalogError::invalid_data(format!("backgrounds: {}", e)))?;
        Self::from_records(backgrounds)
    }

    pub fn from_records(backgrounds: Vec<BackgroundRecord>) -> Result<Self, CatalogError> {
        for (i, background) in backgrounds.iter().enumerate() {
            if background.ability_score_improvements.is_empty() {
                return Err(CatalogError::invalid_data(format!(
                    "{} lists no abilities",
                    background.name
                )));
            }
            if backgrounds[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&background.name))
            {
                return Err(CatalogError::invalid_data(format!(
                    "duplicate background {}",
                    background.name
                )));
            }
        }

        tracing::debug!(count = backgrounds.len(), "Loaded background catalog");
        Ok(Self { backgrounds })
    }

    pub fn len(&self) -> usize {
        self.backgrounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backgrounds.is_empty()
    }
}

impl BackgroundCatalog for StaticBackgroundCatalog {
    fn list_backgrounds(&self) -> Result<Vec<BackgroundRecord>, CatalogError> {
        Ok(self.backgrounds.clone())
    }

    fn get_background(&self, name: &str) -> Result<Option<BackgroundRecord>, CatalogError> {
        let name = name.trim();
        Ok(self
            .backgrounds
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .cloned())
    }
}
