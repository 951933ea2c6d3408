//! # cosmos-mgmt
//!
//! Typed client for the Azure Cosmos DB resource-management (control plane)
//! REST API: databases, containers, scripts, throughput settings and SQL
//! role-based access control, managed through a uniform
//! create-or-update/get/list/delete contract.
//!
//! The client is a thin lifecycle layer: it shapes request bodies, builds
//! resource paths and decodes responses. It holds no local copy of any
//! resource, performs no retries and acquires no credentials; authentication
//! tokens, retry policy and poll-to-completion for long-running operations
//! all belong to the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cosmos_mgmt::{CosmosClient, DatabaseHandler, SqlDatabaseCreateUpdateParameters,
//!     SqlDatabaseResource};
//!
//! # async fn run() -> Result<(), cosmos_mgmt::CosmosError> {
//! let client = CosmosClient::builder()
//!     .subscription_id("00000000-0000-0000-0000-000000000000")
//!     .bearer_token(std::env::var("ARM_TOKEN").unwrap())
//!     .build()?;
//!
//! let databases = DatabaseHandler::new(client);
//! let params = SqlDatabaseCreateUpdateParameters::resource(
//!     SqlDatabaseResource::new("orders"),
//! );
//! let created = databases
//!     .create_or_update("my-group", "my-account", "orders", &params)
//!     .await?;
//! println!("created {:?}", created.name);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Every non-2xx response maps to a [`CosmosError`] variant mirroring the
//! service's taxonomy. A get or delete of a missing resource yields
//! [`CosmosError::NotFound`], which callers should treat as an expected,
//! distinguishable outcome.

pub mod accounts;
pub mod client;
pub mod containers;
pub mod databases;
pub mod error;
pub mod path;
pub mod rbac;
pub mod resource;
pub mod scripts;
pub mod throughput;

#[cfg(feature = "testing")]
pub mod testing;

pub use accounts::{
    AccountHandler, DatabaseAccountCreateUpdateParameters, DatabaseAccountGetResults,
    DatabaseAccountKind, Location,
};
pub use client::{CosmosClient, CosmosClientBuilder, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use containers::{
    CompositePath, CompositePathSortOrder, ContainerHandler, ContainerPartitionKey, ExcludedPath,
    IncludedPath, IndexingMode, IndexingPolicy, PartitionKind, SqlContainerCreateUpdateParameters,
    SqlContainerGetResults, SqlContainerResource,
};
pub use databases::{
    DatabaseHandler, SqlDatabaseCreateUpdateParameters, SqlDatabaseGetResults, SqlDatabaseResource,
};
pub use error::{CosmosError, Result};
pub use path::ResourcePath;
pub use rbac::{
    Permission, RoleAssignmentHandler, RoleDefinitionHandler, RoleDefinitionType,
    SqlRoleAssignmentCreateUpdateParameters, SqlRoleAssignmentGetResults,
    SqlRoleAssignmentProperties, SqlRoleDefinitionCreateUpdateParameters,
    SqlRoleDefinitionGetResults, SqlRoleDefinitionProperties,
};
pub use resource::{
    CreateUpdateOptions, CreateUpdateParameters, ResourceList, ResourceResponse,
    SqlResourceProperties, SystemProperties,
};
pub use scripts::{
    SqlStoredProcedureCreateUpdateParameters, SqlStoredProcedureGetResults,
    SqlStoredProcedureResource, SqlTriggerCreateUpdateParameters, SqlTriggerGetResults,
    SqlTriggerResource, SqlUserDefinedFunctionCreateUpdateParameters,
    SqlUserDefinedFunctionGetResults, SqlUserDefinedFunctionResource, StoredProcedureHandler,
    TriggerHandler, TriggerOperation, TriggerType, UserDefinedFunctionHandler,
};
pub use throughput::{
    ThroughputSettingsGetResults, ThroughputSettingsResource, ThroughputSettingsUpdateParameters,
};
