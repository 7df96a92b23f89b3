//! Meal order wizard library.
//!
//! Order draft store, step validation and submission of meal service
//! requests, with a terminal front-end built on ratatui.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
