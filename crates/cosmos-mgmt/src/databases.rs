//! SQL database operations
//!
//! A database is the first level underneath an account. Its id is
//! caller-assigned at creation; the `_rid`/`_ts`/`_etag`/`_colls`/`_users`
//! bookkeeping fields are server-assigned and only ever read back.

use serde::{Deserialize, Serialize};

use crate::client::CosmosClient;
use crate::error::Result;
use crate::path::ResourcePath;
use crate::resource::{
    CreateUpdateParameters, ResourceOperations, ResourceResponse, SqlResourceProperties,
    SystemProperties,
};
use crate::throughput::{ThroughputSettingsGetResults, ThroughputSettingsUpdateParameters};

/// Caller-supplied database definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlDatabaseResource {
    pub id: String,
}

impl SqlDatabaseResource {
    pub fn new(id: impl Into<String>) -> Self {
        SqlDatabaseResource { id: id.into() }
    }
}

/// Database definition as read back from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlDatabaseGetResource {
    pub id: String,
    #[serde(flatten)]
    pub system: SystemProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlDatabaseGetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<SqlDatabaseGetResource>,
}

pub type SqlDatabaseCreateUpdateParameters =
    CreateUpdateParameters<SqlResourceProperties<SqlDatabaseResource>>;
pub type SqlDatabaseGetResults = ResourceResponse<SqlDatabaseGetProperties>;

/// Handler for SQL database operations
#[derive(Debug, Clone)]
pub struct DatabaseHandler {
    client: CosmosClient,
}

impl DatabaseHandler {
    pub fn new(client: CosmosClient) -> Self {
        DatabaseHandler { client }
    }

    fn ops(&self) -> ResourceOperations<'_, SqlDatabaseGetResults> {
        ResourceOperations::new(&self.client)
    }

    pub async fn create_or_update(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        parameters: &SqlDatabaseCreateUpdateParameters,
    ) -> Result<SqlDatabaseGetResults> {
        let path = ResourcePath::account(resource_group, account)?.sql_database(database)?;
        self.ops().create_or_update(&path, parameters).await
    }

    pub async fn get(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
    ) -> Result<SqlDatabaseGetResults> {
        let path = ResourcePath::account(resource_group, account)?.sql_database(database)?;
        self.ops().get(&path).await
    }

    pub async fn list(
        &self,
        resource_group: &str,
        account: &str,
    ) -> Result<Vec<SqlDatabaseGetResults>> {
        let path = ResourcePath::account(resource_group, account)?.sql_databases();
        self.ops().list(&path).await
    }

    pub async fn delete(&self, resource_group: &str, account: &str, database: &str) -> Result<()> {
        let path = ResourcePath::account(resource_group, account)?.sql_database(database)?;
        self.ops().delete(&path).await
    }

    pub async fn get_throughput(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .throughput();
        self.client.get_json(&path).await
    }

    pub async fn update_throughput(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        parameters: &ThroughputSettingsUpdateParameters,
    ) -> Result<ThroughputSettingsGetResults> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .throughput();
        self.client.put_json(&path, parameters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_results_decode_system_fields() {
        let raw = serde_json::json!({
            "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/acct/sqlDatabases/databaseName",
            "name": "databaseName",
            "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases",
            "properties": {
                "resource": {
                    "id": "databaseName",
                    "_rid": "CqNBAA==",
                    "_ts": 1626425552,
                    "_etag": "\"00000000-0000-0000-9b8f-b1fa63501d7a\"",
                    "_colls": "colls/",
                    "_users": "users/"
                }
            }
        });
        let results: SqlDatabaseGetResults = serde_json::from_value(raw).unwrap();
        assert_eq!(results.name.as_deref(), Some("databaseName"));
        let resource = results.properties.unwrap().resource.unwrap();
        assert_eq!(resource.id, "databaseName");
        assert_eq!(resource.system.ts, Some(1626425552));
        assert_eq!(resource.system.users.as_deref(), Some("users/"));
    }

    #[test]
    fn create_parameters_wire_shape() {
        let params =
            SqlDatabaseCreateUpdateParameters::resource(SqlDatabaseResource::new("databaseName"));
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "properties": {"resource": {"id": "databaseName"}, "options": {}}
            })
        );
    }
}
