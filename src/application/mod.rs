//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the order store holds the draft, and the wizard controller drives step
//! navigation, editing and submission.

pub mod store;
pub mod state;

pub use store::*;
pub use state::*;
