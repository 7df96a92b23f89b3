pub mod models;
pub mod catalog;
pub mod validators;
pub mod payload;
pub mod errors;

pub use models::*;
pub use catalog::*;
pub use validators::*;
pub use payload::*;
pub use errors::*;
