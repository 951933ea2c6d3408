//! Provisioned throughput settings
//!
//! Throughput is a sub-resource attached to a database or container rather
//! than a resource in its own right; the get/update operations here are
//! reached through [`DatabaseHandler`](crate::databases::DatabaseHandler) and
//! [`ContainerHandler`](crate::containers::ContainerHandler).

use serde::{Deserialize, Serialize};

use crate::resource::{CreateUpdateParameters, ResourceResponse};

/// Provisioned throughput of a database or container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputSettingsResource {
    pub throughput: i64,
    /// Server-computed floor for this resource; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_throughput: Option<String>,
    /// Whether an offer replace is in flight; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_replace_pending: Option<String>,
}

impl ThroughputSettingsResource {
    pub fn new(throughput: i64) -> Self {
        ThroughputSettingsResource {
            throughput,
            minimum_throughput: None,
            offer_replace_pending: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThroughputSettingsGetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ThroughputSettingsResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThroughputSettingsUpdateProperties {
    pub resource: ThroughputSettingsResource,
}

pub type ThroughputSettingsUpdateParameters =
    CreateUpdateParameters<ThroughputSettingsUpdateProperties>;
pub type ThroughputSettingsGetResults = ResourceResponse<ThroughputSettingsGetProperties>;

impl ThroughputSettingsUpdateParameters {
    /// Request body setting the provisioned throughput to the given value.
    pub fn throughput(throughput: i64) -> Self {
        CreateUpdateParameters::new(ThroughputSettingsUpdateProperties {
            resource: ThroughputSettingsResource::new(throughput),
        })
    }
}
