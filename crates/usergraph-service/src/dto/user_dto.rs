//! User-related DTOs.

use serde::{Deserialize, Serialize};
use usergraph_core::User;
use utoipa::ToSchema;

/// User record accepted by the create, merge, relate and replace endpoints.
///
/// Keys are camelCase; the PascalCase property names used in the graph are
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(alias = "Id")]
    #[schema(example = 1)]
    pub id: i64,

    #[serde(alias = "Name")]
    #[schema(example = "Alice")]
    pub name: String,

    #[serde(alias = "Age")]
    #[schema(example = 30)]
    pub age: i64,

    #[serde(alias = "Email")]
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        User::new(payload.id, payload.name, payload.age, payload.email)
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            email: user.email,
        }
    }
}

/// A user with the users one `EMPLOYEES_WITH` hop away.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRelationsResponse {
    pub user: UserResponse,
    /// Connected users; empty when there are none.
    pub employees: Vec<UserResponse>,
    /// Number of connections.
    pub employee_count: i64,
}

/// A user with every label on its node.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserLabelsResponse {
    pub user: UserResponse,
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accepts_camel_case() {
        let payload: UserPayload =
            serde_json::from_str(r#"{"id":1,"name":"Alice","age":30,"email":"a@x.com"}"#).unwrap();
        assert_eq!(payload.name, "Alice");
        assert_eq!(payload.age, 30);
    }

    #[test]
    fn test_payload_accepts_graph_property_names() {
        let payload: UserPayload =
            serde_json::from_str(r#"{"Id":2,"Name":"Bob","Age":25,"Email":"b@x.com"}"#).unwrap();
        assert_eq!(payload.id, 2);
        assert_eq!(payload.email, "b@x.com");
    }

    #[test]
    fn test_payload_rejects_non_integer_age() {
        let result =
            serde_json::from_str::<UserPayload>(r#"{"id":1,"name":"A","age":"old","email":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_into_user_keeps_fields() {
        let payload = UserPayload {
            id: 5,
            name: "Eve".to_string(),
            age: 22,
            email: "e@x.com".to_string(),
        };
        assert_eq!(User::from(payload), User::new(5, "Eve", 22, "e@x.com"));
    }

    #[test]
    fn test_relations_response_serializes_camel_case() {
        let response = UserWithRelationsResponse {
            user: User::new(1, "alice", 30, "a@x.com").into(),
            employees: vec![],
            employee_count: 0,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["employeeCount"], 0);
        assert_eq!(json["user"]["name"], "alice");
        assert!(json["employees"].as_array().unwrap().is_empty());
    }
}
