//! Entity-DTO mappers for composite read results.

use crate::dto::{UserLabelsResponse, UserResponse, UserWithRelationsResponse};
use usergraph_core::{LabeledUser, UserWithEmployees};

impl From<UserWithEmployees> for UserWithRelationsResponse {
    fn from(row: UserWithEmployees) -> Self {
        Self {
            user: row.user.into(),
            employees: row.employees.into_iter().map(UserResponse::from).collect(),
            employee_count: row.employee_count,
        }
    }
}

impl From<LabeledUser> for UserLabelsResponse {
    fn from(row: LabeledUser) -> Self {
        Self {
            user: row.user.into(),
            labels: row.labels,
        }
    }
}
