//! User entity.

use serde::{Deserialize, Serialize};

/// Graph label carried by every node this service writes.
pub const USER_LABEL: &str = "User";

/// Normalizes a user name into the form used for storage and matching.
///
/// Every writer and every lookup goes through this function, which is what
/// makes name lookups case-insensitive.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// User entity stored as a `User` node.
///
/// `id` is supplied by the caller and is not unique: the graph holds no
/// constraint on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Caller-supplied identifier.
    pub id: i64,
    /// Display name; lowercased before it reaches the graph.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Email address.
    pub email: String,
}

impl User {
    /// Creates a new user.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, age: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    /// Returns this user with its name normalized.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = normalize_name(&self.name);
        self
    }
}

/// A user together with the users one `EMPLOYEES_WITH` hop away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithEmployees {
    pub user: User,
    pub employees: Vec<User>,
    pub employee_count: i64,
}

/// A user together with every label on its node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledUser {
    pub user: User,
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_lowercases() {
        assert_eq!(normalize_name("Alice"), "alice");
        assert_eq!(normalize_name("BOB"), "bob");
        assert_eq!(normalize_name("carol"), "carol");
    }

    #[test]
    fn test_normalize_name_handles_non_ascii() {
        assert_eq!(normalize_name("ÉLODIE"), "élodie");
    }

    #[test]
    fn test_normalize_name_keeps_whitespace() {
        assert_eq!(normalize_name("  Mary Ann "), "  mary ann ");
    }

    #[test]
    fn test_normalized_user_only_touches_name() {
        let user = User::new(7, "MiXeD", 41, "Mixed@Example.com").normalized();
        assert_eq!(user.name, "mixed");
        assert_eq!(user.email, "Mixed@Example.com");
        assert_eq!(user.id, 7);
        assert_eq!(user.age, 41);
    }
}
