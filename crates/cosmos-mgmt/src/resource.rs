//! Shared wire shapes and the generic CRUD implementation
//!
//! Every resource kind in the management hierarchy exposes the same four
//! operations over the same envelope shapes. [`ResourceOperations`] implements
//! create-or-update/get/list/delete exactly once, parameterized by the
//! response type; the per-resource handlers only pick paths and types.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::CosmosClient;
use crate::error::Result;
use crate::path::ResourcePath;

/// ARM list envelope. A missing or empty `value` array is an empty result,
/// never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// ARM resource envelope common to every GET result: the fully qualified id,
/// the caller-assigned name, the ARM type string, and the typed properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
}

/// Request envelope for every create-or-update call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUpdateParameters<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    pub properties: P,
}

impl<P> CreateUpdateParameters<P> {
    pub fn new(properties: P) -> Self {
        CreateUpdateParameters {
            location: None,
            tags: BTreeMap::new(),
            properties,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// `properties` payload for SQL child resources: the caller-defined resource
/// definition plus provisioning options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlResourceProperties<R> {
    pub resource: R,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<CreateUpdateOptions>,
}

impl<R> CreateUpdateParameters<SqlResourceProperties<R>> {
    /// Standard request for a SQL child resource with default options.
    pub fn resource(resource: R) -> Self {
        CreateUpdateParameters::new(SqlResourceProperties {
            resource,
            options: Some(CreateUpdateOptions::default()),
        })
    }

    /// Provision dedicated throughput alongside the resource.
    pub fn with_throughput(mut self, throughput: i64) -> Self {
        self.properties
            .options
            .get_or_insert_with(CreateUpdateOptions::default)
            .throughput = Some(throughput);
        self
    }
}

/// Provisioning options accepted by create-or-update calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUpdateOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<i64>,
}

/// Server-assigned bookkeeping fields present on GET results of SQL
/// resources. Opaque to this client: never supplied on create, compared
/// only for equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemProperties {
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
    #[serde(rename = "_ts", default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(rename = "_colls", default, skip_serializing_if = "Option::is_none")]
    pub colls: Option<String>,
    #[serde(rename = "_users", default, skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
}

/// The generic CRUD surface, implemented once per the uniform contract:
/// PUT for create-or-update, GET for read and enumerate, DELETE for removal.
pub(crate) struct ResourceOperations<'a, T> {
    client: &'a CosmosClient,
    _response: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> ResourceOperations<'a, T> {
    pub(crate) fn new(client: &'a CosmosClient) -> Self {
        ResourceOperations {
            client,
            _response: PhantomData,
        }
    }

    /// Create the resource if absent, else replace it. Idempotent: the input
    /// is borrowed and serialized as-is, never mutated between calls.
    pub(crate) async fn create_or_update<B: Serialize>(
        &self,
        path: &ResourcePath,
        request: &B,
    ) -> Result<T> {
        self.client.put_json(path, request).await
    }

    pub(crate) async fn get(&self, path: &ResourcePath) -> Result<T> {
        self.client.get_json(path).await
    }

    pub(crate) async fn list(&self, parent: &ResourcePath) -> Result<Vec<T>> {
        let list: ResourceList<T> = self.client.get_json(parent).await?;
        Ok(list.value)
    }

    pub(crate) async fn delete(&self, path: &ResourcePath) -> Result<()> {
        self.client.delete(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_defaults_to_empty() {
        let list: ResourceList<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(list.value.is_empty());
    }

    #[test]
    fn create_update_skips_absent_fields() {
        #[derive(Serialize)]
        struct Res {
            id: &'static str,
        }
        let params = CreateUpdateParameters::resource(Res { id: "db1" });
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"properties": {"resource": {"id": "db1"}, "options": {}}})
        );
    }

    #[test]
    fn throughput_option_serializes_under_options() {
        #[derive(Serialize)]
        struct Res {
            id: &'static str,
        }
        let params = CreateUpdateParameters::resource(Res { id: "db2" })
            .with_location("East US 2")
            .with_tag("env", "test")
            .with_throughput(700);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["location"], "East US 2");
        assert_eq!(json["tags"]["env"], "test");
        assert_eq!(json["properties"]["options"]["throughput"], 700);
    }

    #[test]
    fn system_properties_round_trip_under_wire_names() {
        let raw = serde_json::json!({
            "_rid": "CqNBAA==",
            "_ts": 1626425552,
            "_etag": "\"00000000-0000-0000-9b8f-b1fa63501d7a\"",
            "_colls": "colls/",
            "_users": "users/"
        });
        let sys: SystemProperties = serde_json::from_value(raw).unwrap();
        assert_eq!(sys.rid.as_deref(), Some("CqNBAA=="));
        assert_eq!(sys.ts, Some(1626425552));
        assert_eq!(sys.colls.as_deref(), Some("colls/"));

        // Caller-built resources carry no system fields on the wire.
        let empty = serde_json::to_value(SystemProperties::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}
