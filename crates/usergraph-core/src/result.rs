//! Result type aliases for UserGraph.

use crate::UserGraphError;

/// A specialized `Result` type for UserGraph operations.
pub type UserGraphResult<T> = Result<T, UserGraphError>;
