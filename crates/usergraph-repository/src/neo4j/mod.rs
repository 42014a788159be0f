//! Neo4j-backed repositories.

mod statements;
mod user_repository;

pub use user_repository::*;
