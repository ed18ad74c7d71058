//! Port traits for infrastructure boundaries.
//!
//! The catalog is the only abstraction the engine needs: backgrounds could
//! come from embedded data, a file or a service.

mod catalog;
mod error;

pub use catalog::{BackgroundCatalog, BackgroundRecord};
pub use error::CatalogError;

#[cfg(test)]
pub use catalog::MockBackgroundCatalog;
