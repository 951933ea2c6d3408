//! ARM resource path construction
//!
//! Every operation in this crate targets a path in the fixed hierarchy
//! `resourceGroups/{rg}/providers/Microsoft.DocumentDB/databaseAccounts/{account}`
//! and below (the subscription prefix is owned by the client). [`ResourcePath`]
//! builds those paths once, so URL assembly and segment validation are not
//! repeated per operation.

use crate::error::{CosmosError, Result};

/// Resource provider namespace for Cosmos DB accounts.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.DocumentDB";

/// A relative ARM path below `/subscriptions/{subscriptionId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Path of a database account: the root of every resource this crate manages.
    pub fn account(resource_group: &str, account: &str) -> Result<Self> {
        let mut path = ResourcePath {
            segments: Vec::with_capacity(8),
        };
        path.push("resourceGroups", resource_group)?;
        path.segments.push("providers".into());
        path.segments.push(PROVIDER_NAMESPACE.into());
        path.push("databaseAccounts", account)?;
        Ok(path)
    }

    /// Path used by the account name availability check (not resource-group scoped).
    pub fn account_name_check(account: &str) -> Result<Self> {
        let mut path = ResourcePath {
            segments: vec!["providers".into(), PROVIDER_NAMESPACE.into()],
        };
        path.push("databaseAccountNames", account)?;
        Ok(path)
    }

    /// Collection of database accounts in a resource group.
    pub fn accounts_in_group(resource_group: &str) -> Result<Self> {
        let mut path = ResourcePath {
            segments: Vec::with_capacity(4),
        };
        path.push("resourceGroups", resource_group)?;
        path.segments.push("providers".into());
        path.segments.push(PROVIDER_NAMESPACE.into());
        path.segments.push("databaseAccounts".into());
        Ok(path)
    }

    pub fn sql_database(mut self, name: &str) -> Result<Self> {
        self.push("sqlDatabases", name)?;
        Ok(self)
    }

    pub fn sql_databases(mut self) -> Self {
        self.segments.push("sqlDatabases".into());
        self
    }

    pub fn container(mut self, name: &str) -> Result<Self> {
        self.push("containers", name)?;
        Ok(self)
    }

    pub fn containers(mut self) -> Self {
        self.segments.push("containers".into());
        self
    }

    pub fn stored_procedure(mut self, name: &str) -> Result<Self> {
        self.push("storedProcedures", name)?;
        Ok(self)
    }

    pub fn stored_procedures(mut self) -> Self {
        self.segments.push("storedProcedures".into());
        self
    }

    pub fn trigger(mut self, name: &str) -> Result<Self> {
        self.push("triggers", name)?;
        Ok(self)
    }

    pub fn triggers(mut self) -> Self {
        self.segments.push("triggers".into());
        self
    }

    pub fn user_defined_function(mut self, name: &str) -> Result<Self> {
        self.push("userDefinedFunctions", name)?;
        Ok(self)
    }

    pub fn user_defined_functions(mut self) -> Self {
        self.segments.push("userDefinedFunctions".into());
        self
    }

    /// Throughput sub-resource of a database or container. The server keeps a
    /// single settings object per parent, always named `default`.
    pub fn throughput(mut self) -> Self {
        self.segments.push("throughputSettings".into());
        self.segments.push("default".into());
        self
    }

    pub fn role_definition(mut self, id: &str) -> Result<Self> {
        self.push("sqlRoleDefinitions", id)?;
        Ok(self)
    }

    pub fn role_definitions(mut self) -> Self {
        self.segments.push("sqlRoleDefinitions".into());
        self
    }

    pub fn role_assignment(mut self, id: &str) -> Result<Self> {
        self.push("sqlRoleAssignments", id)?;
        Ok(self)
    }

    pub fn role_assignments(mut self) -> Self {
        self.segments.push("sqlRoleAssignments".into());
        self
    }

    /// Render as a relative path (no leading slash, no subscription prefix).
    pub fn as_str(&self) -> String {
        self.segments.join("/")
    }

    fn push(&mut self, collection: &str, name: &str) -> Result<()> {
        validate_segment(name)?;
        self.segments.push(collection.into());
        self.segments.push(name.into());
        Ok(())
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resource names are caller-assigned and become URL path segments verbatim,
/// so they must be non-empty and free of path metacharacters.
pub(crate) fn validate_segment(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CosmosError::Validation(
            "resource name must not be empty".into(),
        ));
    }
    if name
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace())
    {
        return Err(CosmosError::Validation(format!(
            "resource name {name:?} is not a valid path segment"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_script_path() {
        let path = ResourcePath::account("rg1", "acct1")
            .unwrap()
            .sql_database("db1")
            .unwrap()
            .container("coll1")
            .unwrap()
            .stored_procedure("sproc1")
            .unwrap();
        assert_eq!(
            path.as_str(),
            "resourceGroups/rg1/providers/Microsoft.DocumentDB/databaseAccounts/acct1\
             /sqlDatabases/db1/containers/coll1/storedProcedures/sproc1"
        );
    }

    #[test]
    fn builds_role_definition_path() {
        let path = ResourcePath::account("rg1", "acct1")
            .unwrap()
            .role_definition("a5f23e8a-0853-4f8e-8a70-6c17d3f101f2")
            .unwrap();
        assert_eq!(
            path.as_str(),
            "resourceGroups/rg1/providers/Microsoft.DocumentDB/databaseAccounts/acct1/sqlRoleDefinitions/a5f23e8a-0853-4f8e-8a70-6c17d3f101f2"
        );
    }

    #[test]
    fn builds_throughput_path() {
        let path = ResourcePath::account("rg1", "acct1")
            .unwrap()
            .sql_database("db1")
            .unwrap()
            .throughput();
        assert!(path.as_str().ends_with("sqlDatabases/db1/throughputSettings/default"));
    }

    #[test]
    fn list_path_has_no_trailing_name() {
        let path = ResourcePath::account("rg1", "acct1").unwrap().sql_databases();
        assert!(path.as_str().ends_with("databaseAccounts/acct1/sqlDatabases"));
    }

    #[test]
    fn rejects_invalid_segments() {
        assert!(ResourcePath::account("rg1", "").is_err());
        assert!(ResourcePath::account("rg1", "a/b").is_err());
        assert!(
            ResourcePath::account("rg1", "acct1")
                .unwrap()
                .sql_database("db one")
                .is_err()
        );
        assert!(
            ResourcePath::account("rg1", "acct1")
                .unwrap()
                .sql_database("db?x")
                .is_err()
        );
    }
}
