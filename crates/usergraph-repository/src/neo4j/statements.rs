//! Cypher statement templates.
//!
//! All user input is bound through `$` parameters. The relationship type is
//! the only interpolated token and comes from [`RelationshipKind`].

use usergraph_core::RelationshipKind;

/// Property projection decoded into `UserNode`.
macro_rules! user_projection {
    ($var:literal) => {
        concat!($var, " {.Id, .Name, .Age, .Email}")
    };
}

/// Property map written by create, merge and replace.
macro_rules! user_properties {
    () => {
        "{Id: $id, Name: $name, Age: $age, Email: $email}"
    };
}

pub(crate) const FIND_ALL: &str =
    concat!("MATCH (user:User) RETURN ", user_projection!("user"), " AS user");

pub(crate) const FIND_BY_ID: &str = concat!(
    "MATCH (user:User) WHERE user.Id = $id RETURN ",
    user_projection!("user"),
    " AS user"
);

pub(crate) const FIND_WITH_EMPLOYEES: &str = concat!(
    "MATCH (user:User) WHERE user.Name = $name ",
    "OPTIONAL MATCH (user)-[:EMPLOYEES_WITH]-(employee:User) ",
    "WITH user, collect(employee) AS employees, count(employee) AS employeeCount ",
    "RETURN ",
    user_projection!("user"),
    " AS user, [e IN employees | ",
    user_projection!("e"),
    "] AS employees, employeeCount"
);

pub(crate) const FIND_WITH_LABELS: &str = concat!(
    "MATCH (user:User) WHERE user.Name = $name RETURN ",
    user_projection!("user"),
    " AS user, labels(user) AS labels"
);

pub(crate) const CREATE: &str = concat!("CREATE (user:User ", user_properties!(), ")");

pub(crate) const MERGE_BY_ID: &str = concat!(
    "MERGE (user:User {Id: $id}) SET user = ",
    user_properties!()
);

pub(crate) const CREATE_RELATED: &str = concat!(
    "MATCH (existing:User) WHERE existing.Name = $existingName ",
    "CREATE (existing)-[:EMPLOYEES_WITH]->(user:User ",
    user_properties!(),
    ")"
);

pub(crate) const SET_AGE: &str = "MATCH (user:User) WHERE user.Name = $name SET user.Age = $age";

pub(crate) const REPLACE: &str = concat!(
    "MATCH (user:User) WHERE user.Name = $name SET user = ",
    user_properties!()
);

pub(crate) const DETACH_DELETE: &str =
    "MATCH (user:User) WHERE user.Name = $name DETACH DELETE user";

pub(crate) const DELETE_NODE: &str = "MATCH (user:User) WHERE user.Name = $name DELETE user";

pub(crate) const DELETE_ALL: &str = "MATCH (n) DETACH DELETE n";

/// `CREATE` a `kind` edge between every matched pair.
pub(crate) fn relate(kind: RelationshipKind) -> String {
    relationship_statement("CREATE", kind)
}

/// `MERGE` a `kind` edge between every matched pair.
pub(crate) fn relate_once(kind: RelationshipKind) -> String {
    relationship_statement("MERGE", kind)
}

fn relationship_statement(clause: &str, kind: RelationshipKind) -> String {
    format!(
        "MATCH (user1:User), (user2:User) \
         WHERE user1.Name = $name1 AND user2.Name = $name2 \
         {clause} (user1)-[:{kind}]->(user2)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_project_pascal_case_properties() {
        assert_eq!(
            FIND_ALL,
            "MATCH (user:User) RETURN user {.Id, .Name, .Age, .Email} AS user"
        );
        assert!(FIND_BY_ID.contains("WHERE user.Id = $id"));
        assert!(FIND_WITH_LABELS.ends_with("labels(user) AS labels"));
    }

    #[test]
    fn test_relations_use_optional_undirected_match() {
        assert!(FIND_WITH_EMPLOYEES.contains("OPTIONAL MATCH (user)-[:EMPLOYEES_WITH]-(employee:User)"));
        assert!(FIND_WITH_EMPLOYEES.contains("count(employee) AS employeeCount"));
    }

    #[test]
    fn test_writes_bind_every_property() {
        for statement in [CREATE, MERGE_BY_ID, CREATE_RELATED, REPLACE] {
            assert!(statement.contains("{Id: $id, Name: $name, Age: $age, Email: $email}"));
        }
        assert!(MERGE_BY_ID.starts_with("MERGE (user:User {Id: $id})"));
    }

    #[test]
    fn test_node_delete_does_not_detach() {
        assert!(!DELETE_NODE.contains("DETACH"));
        assert!(DETACH_DELETE.contains("DETACH DELETE"));
    }

    #[test]
    fn test_relationship_statements() {
        assert_eq!(
            relate(RelationshipKind::WorksWith),
            "MATCH (user1:User), (user2:User) WHERE user1.Name = $name1 AND user2.Name = $name2 \
             CREATE (user1)-[:WORKS_WITH]->(user2)"
        );
        assert!(relate_once(RelationshipKind::IsManagerOf)
            .ends_with("MERGE (user1)-[:IS_MANAGER_OF]->(user2)"));
    }
}
