//! Relationship kinds between users.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed, directed edge between two `User` nodes.
///
/// The set is closed. Cypher cannot bind a relationship type as a
/// parameter, so [`RelationshipKind::as_str`] is the only text ever
/// spliced into a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    /// Created by "create user and relate to existing".
    EmployeesWith,
    /// Created by the unconditional relate.
    WorksWith,
    /// Created by the relate-if-not-related merge.
    IsManagerOf,
}

impl RelationshipKind {
    /// Returns the relationship type as stored in the graph.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmployeesWith => "EMPLOYEES_WITH",
            Self::WorksWith => "WORKS_WITH",
            Self::IsManagerOf => "IS_MANAGER_OF",
        }
    }

    /// Returns all relationship kinds.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::EmployeesWith, Self::WorksWith, Self::IsManagerOf]
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
