//! # UserGraph Core
//!
//! Core types shared by every layer of the UserGraph service: the unified
//! error type, the `User` domain entity, relationship kinds, and the name
//! normalization rule all writers and readers agree on.

pub mod domain;
pub mod error;
pub mod result;

pub use domain::*;
pub use error::*;
pub use result::*;
