//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client for the order backend, catalog
//! file persistence, manifest export and configuration loading.

pub mod api;
pub mod config;
pub mod export;
pub mod persistence;

pub use api::*;
pub use config::*;
pub use export::*;
pub use persistence::*;
