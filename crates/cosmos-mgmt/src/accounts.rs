//! Database account operations
//!
//! The account is the root of the resource hierarchy; everything else in this
//! crate lives underneath one. Account provisioning is long-running on the
//! server (minutes); create-or-update returns the initial response and leaves
//! polling to the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::client::CosmosClient;
use crate::error::Result;
use crate::path::ResourcePath;
use crate::resource::{ResourceList, ResourceOperations};

/// Category of account to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseAccountKind {
    GlobalDocumentDB,
    MongoDB,
    Parse,
}

/// A replica location for an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover_priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_zone_redundant: Option<bool>,
}

impl Location {
    pub fn new(location_name: impl Into<String>) -> Self {
        Location {
            location_name: location_name.into(),
            failover_priority: None,
            is_zone_redundant: None,
        }
    }
}

/// Request body for account create-or-update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountCreateUpdateParameters {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DatabaseAccountKind>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    pub properties: DatabaseAccountCreateProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountCreateProperties {
    /// The service only accepts `Standard` here.
    pub database_account_offer_type: String,
    pub locations: Vec<Location>,
}

impl DatabaseAccountCreateUpdateParameters {
    /// Single-region account of the given kind.
    pub fn new(location: impl Into<String>, kind: DatabaseAccountKind) -> Self {
        let location = location.into();
        DatabaseAccountCreateUpdateParameters {
            kind: Some(kind),
            tags: BTreeMap::new(),
            properties: DatabaseAccountCreateProperties {
                database_account_offer_type: "Standard".to_string(),
                locations: vec![Location::new(location.clone())],
            },
            location,
        }
    }
}

/// An account as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseAccountGetResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DatabaseAccountKind>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<DatabaseAccountGetProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountGetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

/// Handler for database account operations
#[derive(Debug, Clone)]
pub struct AccountHandler {
    client: CosmosClient,
}

impl AccountHandler {
    pub fn new(client: CosmosClient) -> Self {
        AccountHandler { client }
    }

    fn ops(&self) -> ResourceOperations<'_, DatabaseAccountGetResults> {
        ResourceOperations::new(&self.client)
    }

    /// True if an account with this name already exists anywhere in Azure
    /// (account names are globally unique).
    pub async fn check_name_exists(&self, account: &str) -> Result<bool> {
        let path = ResourcePath::account_name_check(account)?;
        self.client.exists(&path).await
    }

    pub async fn create_or_update(
        &self,
        resource_group: &str,
        account: &str,
        parameters: &DatabaseAccountCreateUpdateParameters,
    ) -> Result<DatabaseAccountGetResults> {
        let path = ResourcePath::account(resource_group, account)?;
        self.ops().create_or_update(&path, parameters).await
    }

    pub async fn get(
        &self,
        resource_group: &str,
        account: &str,
    ) -> Result<DatabaseAccountGetResults> {
        let path = ResourcePath::account(resource_group, account)?;
        self.ops().get(&path).await
    }

    pub async fn list(&self, resource_group: &str) -> Result<Vec<DatabaseAccountGetResults>> {
        let path = ResourcePath::accounts_in_group(resource_group)?;
        let list: ResourceList<DatabaseAccountGetResults> = self.client.get_json(&path).await?;
        Ok(list.value)
    }

    pub async fn delete(&self, resource_group: &str, account: &str) -> Result<()> {
        let path = ResourcePath::account(resource_group, account)?;
        self.ops().delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_literal() {
        let json = serde_json::to_value(DatabaseAccountKind::GlobalDocumentDB).unwrap();
        assert_eq!(json, "GlobalDocumentDB");
    }

    #[test]
    fn create_parameters_carry_offer_type() {
        let params = DatabaseAccountCreateUpdateParameters::new(
            "EAST US 2",
            DatabaseAccountKind::GlobalDocumentDB,
        );
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["location"], "EAST US 2");
        assert_eq!(json["kind"], "GlobalDocumentDB");
        assert_eq!(json["properties"]["databaseAccountOfferType"], "Standard");
        assert_eq!(
            json["properties"]["locations"][0]["locationName"],
            "EAST US 2"
        );
    }
}
