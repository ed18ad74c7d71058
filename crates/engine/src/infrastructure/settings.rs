//! Point-buy configuration from the environment.
//!
//! | Variable                   | Example             |
//! |----------------------------|---------------------|
//! | `CHARBLDR_POINT_BUY_TOTAL` | `27`                |
//! | `CHARBLDR_POINT_BUY_MIN`   | `8`                 |
//! | `CHARBLDR_POINT_BUY_MAX`   | `15`                |
//! | `CHARBLDR_POINT_BUY_COSTS` | `8:0,9:1,...,15:9`  |
//!
//! Every variable is optional. Unset or blank values keep the standard
//! table's value.

use std::collections::BTreeMap;
use std::path::Path;

use charbldr_domain::{DomainError, PointBuyConfig};

pub const TOTAL_VAR: &str = "CHARBLDR_POINT_BUY_TOTAL";
pub const MIN_VAR: &str = "CHARBLDR_POINT_BUY_MIN";
pub const MAX_VAR: &str = "CHARBLDR_POINT_BUY_MAX";
pub const COSTS_VAR: &str = "CHARBLDR_POINT_BUY_COSTS";

/// Configuration errors, reported with the offending variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{var} is not a valid integer: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} has a malformed entry {entry:?}, expected score:cost")]
    InvalidCostEntry { var: &'static str, entry: String },

    #[error("Invalid point-buy configuration: {0}")]
    Config(#[from] DomainError),
}

/// Raw point-buy overrides, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointBuySettings {
    pub total_points: Option<i32>,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
    pub point_costs: Option<BTreeMap<i32, i32>>,
}

impl PointBuySettings {
    /// Read overrides from the process environment after loading `.env`
    /// files from the working directory.
    pub fn from_env() -> Result<Self, SettingsError> {
        load_dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let read = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            total_points: read(TOTAL_VAR).map(|v| parse_int(TOTAL_VAR, &v)).transpose()?,
            min_score: read(MIN_VAR).map(|v| parse_int(MIN_VAR, &v)).transpose()?,
            max_score: read(MAX_VAR).map(|v| parse_int(MAX_VAR, &v)).transpose()?,
            point_costs: read(COSTS_VAR).map(|v| parse_costs(&v)).transpose()?,
        })
    }

    /// Fill unset values from the standard table and validate the result.
    pub fn into_config(self) -> Result<PointBuyConfig, SettingsError> {
        let standard = PointBuyConfig::default();
        let config = PointBuyConfig::new(
            self.total_points.unwrap_or(standard.total_points()),
            self.min_score.unwrap_or(standard.min_score()),
            self.max_score.unwrap_or(standard.max_score()),
            self.point_costs
                .unwrap_or_else(|| standard.point_costs().clone()),
        )?;
        Ok(config)
    }

    /// Environment config, or the standard table if it is invalid.
    pub fn load_or_default() -> PointBuyConfig {
        load_dotenv();
        Self::load_or_default_with(|var| std::env::var(var).ok())
    }

    /// Config read through `lookup`, or the standard table if it is invalid.
    pub fn load_or_default_with(lookup: impl Fn(&str) -> Option<String>) -> PointBuyConfig {
        match Self::from_lookup(lookup).and_then(Self::into_config) {
            Ok(config) => {
                tracing::debug!(
                    total_points = config.total_points(),
                    min_score = config.min_score(),
                    max_score = config.max_score(),
                    "Point-buy configuration loaded"
                );
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "Invalid point-buy configuration, using standard table");
                PointBuyConfig::default()
            }
        }
    }
}

fn parse_int(var: &'static str, value: &str) -> Result<i32, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn parse_costs(value: &str) -> Result<BTreeMap<i32, i32>, SettingsError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || SettingsError::InvalidCostEntry {
                var: COSTS_VAR,
                entry: entry.to_string(),
            };
            let (score, cost) = entry.split_once(':').ok_or_else(invalid)?;
            let score: i32 = score.trim().parse().map_err(|_| invalid())?;
            let cost: i32 = cost.trim().parse().map_err(|_| invalid())?;
            Ok((score, cost))
        })
        .collect()
}

fn load_dotenv() {
    load_dotenv_in(Path::new("."));
}

/// Load `.env.local` then `.env` from `dir`. Variables already set are kept,
/// so local overrides win.
fn load_dotenv_in(dir: &Path) {
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }
}
