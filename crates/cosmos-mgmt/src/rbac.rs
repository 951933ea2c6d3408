//! SQL role definitions and role assignments
//!
//! Role resources are account-scoped and identified by caller-supplied
//! unique ids (conventionally GUIDs). A role definition names the data
//! actions it allows; a role assignment grants a definition to a principal
//! over a scope. Whether the referenced definition or principal exists is
//! the server's problem, not this client's.

use serde::{Deserialize, Serialize};

use crate::client::CosmosClient;
use crate::error::{CosmosError, Result};
use crate::path::ResourcePath;
use crate::resource::{CreateUpdateParameters, ResourceOperations, ResourceResponse};

/// Whether a role definition is service-provided or user-created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleDefinitionType {
    BuiltInRole,
    CustomRole,
}

/// One block of allowed and denied data actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_data_actions: Vec<String>,
}

impl Permission {
    pub fn allow<I, S>(data_actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Permission {
            data_actions: data_actions.into_iter().map(Into::into).collect(),
            not_data_actions: Vec::new(),
        }
    }
}

/// Caller-supplied role definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlRoleDefinitionProperties {
    /// Display name; unique per account, enforced server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub role_type: Option<RoleDefinitionType>,
    /// Scopes at or below which assignments may use this definition.
    /// Must contain at least one entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignable_scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
}

/// Caller-supplied role assignment: definition, scope and principal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlRoleAssignmentProperties {
    /// Fully qualified ARM id of the role definition being granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_definition_id: Option<String>,
    /// Data-plane resource path the grant applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// External identity reference; a back-reference only, never resolved
    /// by this client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
}

pub type SqlRoleDefinitionCreateUpdateParameters =
    CreateUpdateParameters<SqlRoleDefinitionProperties>;
pub type SqlRoleDefinitionGetResults = ResourceResponse<SqlRoleDefinitionProperties>;

pub type SqlRoleAssignmentCreateUpdateParameters =
    CreateUpdateParameters<SqlRoleAssignmentProperties>;
pub type SqlRoleAssignmentGetResults = ResourceResponse<SqlRoleAssignmentProperties>;

/// Handler for role definition operations
#[derive(Debug, Clone)]
pub struct RoleDefinitionHandler {
    client: CosmosClient,
}

impl RoleDefinitionHandler {
    pub fn new(client: CosmosClient) -> Self {
        RoleDefinitionHandler { client }
    }

    fn ops(&self) -> ResourceOperations<'_, SqlRoleDefinitionGetResults> {
        ResourceOperations::new(&self.client)
    }

    /// Create or replace a role definition.
    ///
    /// An empty `assignableScopes` list is rejected here, before any request
    /// is sent: the server would fail it anyway, and failing early keeps the
    /// invariant visible at the call site.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        account: &str,
        role_definition_id: &str,
        parameters: &SqlRoleDefinitionCreateUpdateParameters,
    ) -> Result<SqlRoleDefinitionGetResults> {
        if parameters.properties.assignable_scopes.is_empty() {
            return Err(CosmosError::Validation(
                "a role definition must have at least one assignable scope".into(),
            ));
        }
        let path =
            ResourcePath::account(resource_group, account)?.role_definition(role_definition_id)?;
        self.ops().create_or_update(&path, parameters).await
    }

    pub async fn get(
        &self,
        resource_group: &str,
        account: &str,
        role_definition_id: &str,
    ) -> Result<SqlRoleDefinitionGetResults> {
        let path =
            ResourcePath::account(resource_group, account)?.role_definition(role_definition_id)?;
        self.ops().get(&path).await
    }

    pub async fn list(
        &self,
        resource_group: &str,
        account: &str,
    ) -> Result<Vec<SqlRoleDefinitionGetResults>> {
        let path = ResourcePath::account(resource_group, account)?.role_definitions();
        self.ops().list(&path).await
    }

    pub async fn delete(
        &self,
        resource_group: &str,
        account: &str,
        role_definition_id: &str,
    ) -> Result<()> {
        let path =
            ResourcePath::account(resource_group, account)?.role_definition(role_definition_id)?;
        self.ops().delete(&path).await
    }
}

/// Handler for role assignment operations
#[derive(Debug, Clone)]
pub struct RoleAssignmentHandler {
    client: CosmosClient,
}

impl RoleAssignmentHandler {
    pub fn new(client: CosmosClient) -> Self {
        RoleAssignmentHandler { client }
    }

    fn ops(&self) -> ResourceOperations<'_, SqlRoleAssignmentGetResults> {
        ResourceOperations::new(&self.client)
    }

    pub async fn create_or_update(
        &self,
        resource_group: &str,
        account: &str,
        role_assignment_id: &str,
        parameters: &SqlRoleAssignmentCreateUpdateParameters,
    ) -> Result<SqlRoleAssignmentGetResults> {
        let path =
            ResourcePath::account(resource_group, account)?.role_assignment(role_assignment_id)?;
        self.ops().create_or_update(&path, parameters).await
    }

    pub async fn get(
        &self,
        resource_group: &str,
        account: &str,
        role_assignment_id: &str,
    ) -> Result<SqlRoleAssignmentGetResults> {
        let path =
            ResourcePath::account(resource_group, account)?.role_assignment(role_assignment_id)?;
        self.ops().get(&path).await
    }

    pub async fn list(
        &self,
        resource_group: &str,
        account: &str,
    ) -> Result<Vec<SqlRoleAssignmentGetResults>> {
        let path = ResourcePath::account(resource_group, account)?.role_assignments();
        self.ops().list(&path).await
    }

    pub async fn delete(
        &self,
        resource_group: &str,
        account: &str,
        role_assignment_id: &str,
    ) -> Result<()> {
        let path =
            ResourcePath::account(resource_group, account)?.role_assignment(role_assignment_id)?;
        self.ops().delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_definition_wire_shape() {
        let params = SqlRoleDefinitionCreateUpdateParameters::new(SqlRoleDefinitionProperties {
            role_name: Some("roleName".into()),
            role_type: Some(RoleDefinitionType::CustomRole),
            assignable_scopes: vec!["/subscriptions/sub/resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/acct".into()],
            permissions: vec![Permission::allow([
                "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers/items/create",
                "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers/items/read",
            ])],
        });
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["properties"]["roleName"], "roleName");
        assert_eq!(json["properties"]["type"], "CustomRole");
        assert_eq!(
            json["properties"]["permissions"][0]["dataActions"][1],
            "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers/items/read"
        );
        // Denied actions are omitted entirely when empty.
        assert!(json["properties"]["permissions"][0].get("notDataActions").is_none());
    }

    #[test]
    fn role_assignment_wire_shape() {
        let params = SqlRoleAssignmentCreateUpdateParameters::new(SqlRoleAssignmentProperties {
            role_definition_id: Some("/subscriptions/sub/.../sqlRoleDefinitions/rd-1".into()),
            scope: Some("/subscriptions/sub/.../databaseAccounts/acct/dbs/db1".into()),
            principal_id: Some("ed4c2395-a18c-4018-afb3-6e521e7534d2".into()),
        });
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json["properties"]["principalId"],
            "ed4c2395-a18c-4018-afb3-6e521e7534d2"
        );
        assert_eq!(
            json["properties"]["roleDefinitionId"],
            "/subscriptions/sub/.../sqlRoleDefinitions/rd-1"
        );
    }

    #[test]
    fn role_definition_type_round_trips() {
        let parsed: RoleDefinitionType = serde_json::from_str("\"BuiltInRole\"").unwrap();
        assert_eq!(parsed, RoleDefinitionType::BuiltInRole);
    }
}
