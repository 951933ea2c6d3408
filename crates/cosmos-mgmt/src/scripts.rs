//! Container-scoped script resources: stored procedures, triggers and
//! user-defined functions
//!
//! All three carry a caller-assigned id and a script body; triggers
//! additionally declare when they fire. The three handlers are the same
//! four CRUD operations instantiated at different leaf paths.

use serde::{Deserialize, Serialize};

use crate::client::CosmosClient;
use crate::error::Result;
use crate::path::ResourcePath;
use crate::resource::{
    CreateUpdateParameters, ResourceOperations, ResourceResponse, SqlResourceProperties,
    SystemProperties,
};

/// When a trigger fires relative to the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerType {
    Pre,
    Post,
}

/// Which data operations a trigger applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerOperation {
    All,
    Create,
    Update,
    Delete,
    Replace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlStoredProcedureResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl SqlStoredProcedureResource {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        SqlStoredProcedureResource {
            id: id.into(),
            body: Some(body.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlTriggerResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_operation: Option<TriggerOperation>,
}

impl SqlTriggerResource {
    pub fn new(
        id: impl Into<String>,
        body: impl Into<String>,
        trigger_type: TriggerType,
        trigger_operation: TriggerOperation,
    ) -> Self {
        SqlTriggerResource {
            id: id.into(),
            body: Some(body.into()),
            trigger_type: Some(trigger_type),
            trigger_operation: Some(trigger_operation),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlUserDefinedFunctionResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl SqlUserDefinedFunctionResource {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        SqlUserDefinedFunctionResource {
            id: id.into(),
            body: Some(body.into()),
        }
    }
}

/// GET-side resource for scripts: the caller fields plus system bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlScriptGetResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_operation: Option<TriggerOperation>,
    #[serde(flatten)]
    pub system: SystemProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlScriptGetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<SqlScriptGetResource>,
}

pub type SqlStoredProcedureCreateUpdateParameters =
    CreateUpdateParameters<SqlResourceProperties<SqlStoredProcedureResource>>;
pub type SqlTriggerCreateUpdateParameters =
    CreateUpdateParameters<SqlResourceProperties<SqlTriggerResource>>;
pub type SqlUserDefinedFunctionCreateUpdateParameters =
    CreateUpdateParameters<SqlResourceProperties<SqlUserDefinedFunctionResource>>;

pub type SqlStoredProcedureGetResults = ResourceResponse<SqlScriptGetProperties>;
pub type SqlTriggerGetResults = ResourceResponse<SqlScriptGetProperties>;
pub type SqlUserDefinedFunctionGetResults = ResourceResponse<SqlScriptGetProperties>;

macro_rules! script_handler {
    ($handler:ident, $params:ty, $results:ty, $leaf:ident, $collection:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone)]
        pub struct $handler {
            client: CosmosClient,
        }

        impl $handler {
            pub fn new(client: CosmosClient) -> Self {
                $handler { client }
            }

            fn ops(&self) -> ResourceOperations<'_, $results> {
                ResourceOperations::new(&self.client)
            }

            pub async fn create_or_update(
                &self,
                resource_group: &str,
                account: &str,
                database: &str,
                container: &str,
                name: &str,
                parameters: &$params,
            ) -> Result<$results> {
                let path = ResourcePath::account(resource_group, account)?
                    .sql_database(database)?
                    .container(container)?
                    .$leaf(name)?;
                self.ops().create_or_update(&path, parameters).await
            }

            pub async fn get(
                &self,
                resource_group: &str,
                account: &str,
                database: &str,
                container: &str,
                name: &str,
            ) -> Result<$results> {
                let path = ResourcePath::account(resource_group, account)?
                    .sql_database(database)?
                    .container(container)?
                    .$leaf(name)?;
                self.ops().get(&path).await
            }

            pub async fn list(
                &self,
                resource_group: &str,
                account: &str,
                database: &str,
                container: &str,
            ) -> Result<Vec<$results>> {
                let path = ResourcePath::account(resource_group, account)?
                    .sql_database(database)?
                    .container(container)?
                    .$collection();
                self.ops().list(&path).await
            }

            pub async fn delete(
                &self,
                resource_group: &str,
                account: &str,
                database: &str,
                container: &str,
                name: &str,
            ) -> Result<()> {
                let path = ResourcePath::account(resource_group, account)?
                    .sql_database(database)?
                    .container(container)?
                    .$leaf(name)?;
                self.ops().delete(&path).await
            }
        }
    };
}

script_handler!(
    StoredProcedureHandler,
    SqlStoredProcedureCreateUpdateParameters,
    SqlStoredProcedureGetResults,
    stored_procedure,
    stored_procedures,
    "Handler for stored procedure operations"
);

script_handler!(
    TriggerHandler,
    SqlTriggerCreateUpdateParameters,
    SqlTriggerGetResults,
    trigger,
    triggers,
    "Handler for trigger operations"
);

script_handler!(
    UserDefinedFunctionHandler,
    SqlUserDefinedFunctionCreateUpdateParameters,
    SqlUserDefinedFunctionGetResults,
    user_defined_function,
    user_defined_functions,
    "Handler for user-defined function operations"
);
