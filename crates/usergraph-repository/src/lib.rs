//! # UserGraph Repository
//!
//! Data access for `User` nodes and their relationships.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserGraphRepository>  (graph client capability)
//! Neo4jUserRepository                (one Cypher statement per operation)
//!   ↓  Arc<Neo4jGraph>               (process-wide Bolt connection pool)
//! Neo4j
//! ```
//!
//! With the `testing` feature, [`InMemoryUserGraph`] implements the same
//! trait without a database.

pub mod graph;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod neo4j;
pub mod traits;

pub use graph::*;
#[cfg(any(test, feature = "testing"))]
pub use memory::InMemoryUserGraph;
pub use neo4j::*;
pub use traits::*;
