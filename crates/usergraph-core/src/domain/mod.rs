//! Domain model.

pub mod relationship;
pub mod user;

pub use relationship::*;
pub use user::*;
