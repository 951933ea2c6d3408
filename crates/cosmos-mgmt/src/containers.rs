//! SQL container operations
//!
//! Containers carry the partition-key specification, the indexing policy
//! (including composite index orderings) and an optional default TTL. All of
//! it is caller-supplied; the server only ever adds bookkeeping fields.

use serde::{Deserialize, Serialize};

use crate::client::CosmosClient;
use crate::error::Result;
use crate::path::ResourcePath;
use crate::resource::{
    CreateUpdateParameters, ResourceOperations, ResourceResponse, SqlResourceProperties,
    SystemProperties,
};
use crate::throughput::{ThroughputSettingsGetResults, ThroughputSettingsUpdateParameters};

/// Algorithm used to distribute items across partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionKind {
    Hash,
    Range,
    MultiHash,
}

/// Partition-key specification: an algorithm and an ordered list of paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerPartitionKey {
    pub paths: Vec<String>,
    pub kind: PartitionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl ContainerPartitionKey {
    /// Hash partitioning over a single path, the common case.
    pub fn hash(path: impl Into<String>) -> Self {
        ContainerPartitionKey {
            paths: vec![path.into()],
            kind: PartitionKind::Hash,
            version: None,
        }
    }
}

/// The service is inconsistent about the case of this field on reads, so
/// lowercase spellings are accepted on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexingMode {
    #[serde(alias = "consistent")]
    Consistent,
    #[serde(alias = "lazy")]
    Lazy,
    #[serde(alias = "none")]
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncludedPath {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedPath {
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositePathSortOrder {
    Ascending,
    Descending,
}

/// One entry of a composite index: a path and its sort order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositePath {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<CompositePathSortOrder>,
}

impl CompositePath {
    pub fn ascending(path: impl Into<String>) -> Self {
        CompositePath {
            path: path.into(),
            order: Some(CompositePathSortOrder::Ascending),
        }
    }

    pub fn descending(path: impl Into<String>) -> Self {
        CompositePath {
            path: path.into(),
            order: Some(CompositePathSortOrder::Descending),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_mode: Option<IndexingMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_paths: Vec<IncludedPath>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_paths: Vec<ExcludedPath>,
    /// Each inner list is one composite index: an ordered sequence of
    /// (path, order) pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_indexes: Vec<Vec<CompositePath>>,
}

/// Caller-supplied container definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlContainerResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<ContainerPartitionKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<IndexingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<i64>,
}

impl SqlContainerResource {
    pub fn new(id: impl Into<String>) -> Self {
        SqlContainerResource {
            id: id.into(),
            partition_key: None,
            indexing_policy: None,
            default_ttl: None,
        }
    }

    pub fn with_partition_key(mut self, partition_key: ContainerPartitionKey) -> Self {
        self.partition_key = Some(partition_key);
        self
    }

    pub fn with_indexing_policy(mut self, indexing_policy: IndexingPolicy) -> Self {
        self.indexing_policy = Some(indexing_policy);
        self
    }

    pub fn with_default_ttl(mut self, seconds: i64) -> Self {
        self.default_ttl = Some(seconds);
        self
    }
}

/// Container definition as read back from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlContainerGetResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<ContainerPartitionKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<IndexingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<i64>,
    #[serde(flatten)]
    pub system: SystemProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlContainerGetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<SqlContainerGetResource>,
}

pub type SqlContainerCreateUpdateParameters =
    CreateUpdateParameters<SqlResourceProperties<SqlContainerResource>>;
pub type SqlContainerGetResults = ResourceResponse<SqlContainerGetProperties>;

/// Handler for SQL container operations
#[derive(Debug, Clone)]
pub struct ContainerHandler {
    client: CosmosClient,
}

impl ContainerHandler {
    pub fn new(client: CosmosClient) -> Self {
        ContainerHandler { client }
    }

    fn ops(&self) -> ResourceOperations<'_, SqlContainerGetResults> {
        ResourceOperations::new(&self.client)
    }

    pub async fn create_or_update(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        container: &str,
        parameters: &SqlContainerCreateUpdateParameters,
    ) -> Result<SqlContainerGetResults> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .container(container)?;
        self.ops().create_or_update(&path, parameters).await
    }

    pub async fn get(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        container: &str,
    ) -> Result<SqlContainerGetResults> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .container(container)?;
        self.ops().get(&path).await
    }

    pub async fn list(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
    ) -> Result<Vec<SqlContainerGetResults>> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .containers();
        self.ops().list(&path).await
    }

    pub async fn delete(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        container: &str,
    ) -> Result<()> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .container(container)?;
        self.ops().delete(&path).await
    }

    pub async fn get_throughput(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        container: &str,
    ) -> Result<ThroughputSettingsGetResults> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .container(container)?
            .throughput();
        self.client.get_json(&path).await
    }

    pub async fn update_throughput(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        container: &str,
        parameters: &ThroughputSettingsUpdateParameters,
    ) -> Result<ThroughputSettingsGetResults> {
        let path = ResourcePath::account(resource_group, account)?
            .sql_database(database)?
            .container(container)?
            .throughput();
        self.client.put_json(&path, parameters).await
    }
}
