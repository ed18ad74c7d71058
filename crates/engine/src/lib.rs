//! Charbldr Engine library.
//!
//! Orchestration around `charbldr-domain`.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the `StatBlocks` aggregate
//! - `infrastructure/` - External dependency implementations (ports + adapters),
//!   environment configuration and logging setup

pub mod infrastructure;
pub mod use_cases;

pub use infrastructure::catalog::StaticBackgroundCatalog;
pub use infrastructure::logging::init_logging;
pub use infrastructure::ports::{BackgroundCatalog, BackgroundRecord, CatalogError};
pub use infrastructure::settings::{PointBuySettings, SettingsError};
pub use use_cases::{AbilityScoreError, AbilityScoreUseCases};
