//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies, plus
//! environment configuration and logging setup.

pub mod catalog;
pub mod logging;
pub mod ports;
pub mod settings;
