//! # UserGraph Service
//!
//! Service layer for UserGraph. Each operation normalizes user names and
//! delegates a single statement to the graph repository.

pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod user_service;

pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
