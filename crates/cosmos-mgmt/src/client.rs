//! HTTP client for the Cosmos DB management API
//!
//! [`CosmosClient`] owns the base URL, subscription, bearer token and API
//! version, and exposes the verb primitives the resource handlers are built
//! on. It is cheap to clone and safe to share across concurrent operations.
//!
//! # Example
//!
//! ```rust,no_run
//! use cosmos_mgmt::CosmosClient;
//!
//! # fn main() -> Result<(), cosmos_mgmt::CosmosError> {
//! let client = CosmosClient::builder()
//!     .subscription_id("00000000-0000-0000-0000-000000000000")
//!     .bearer_token("eyJ0eXAi...")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::{CosmosError, Result};
use crate::path::ResourcePath;

/// Default ARM endpoint for the public Azure cloud.
pub const DEFAULT_BASE_URL: &str = "https://management.azure.com";

/// API version sent with every request.
pub const DEFAULT_API_VERSION: &str = "2021-10-15";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Cosmos DB control plane.
///
/// Holds no per-resource state: every operation is an independent
/// request/response round trip addressed by a [`ResourcePath`].
#[derive(Clone)]
pub struct CosmosClient {
    http: reqwest::Client,
    base_url: Url,
    subscription_id: String,
    token: String,
    api_version: String,
}

impl std::fmt::Debug for CosmosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token deliberately omitted.
        f.debug_struct("CosmosClient")
            .field("base_url", &self.base_url.as_str())
            .field("subscription_id", &self.subscription_id)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Builder for [`CosmosClient`]
#[derive(Debug, Default)]
pub struct CosmosClientBuilder {
    base_url: Option<String>,
    subscription_id: Option<String>,
    token: Option<String>,
    api_version: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl CosmosClientBuilder {
    /// ARM endpoint to talk to. Defaults to the public cloud endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Azure subscription all resource paths are scoped under. Required.
    pub fn subscription_id(mut self, id: impl Into<String>) -> Self {
        self.subscription_id = Some(id.into());
        self
    }

    /// Bearer token attached to every request. Required. Acquiring and
    /// refreshing the token is the caller's concern.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the `api-version` query parameter.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<CosmosClient> {
        let base = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut base_url =
            Url::parse(&base).map_err(|e| CosmosError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CosmosError::InvalidUrl(format!(
                "base url must be hierarchical: {base}"
            )));
        }
        // Url::join treats a path without a trailing slash as a file and
        // drops its last segment, so sovereign endpoints like
        // `https://host/prefix` need one appended.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let subscription_id = self
            .subscription_id
            .ok_or_else(|| CosmosError::Validation("subscription id is required".into()))?;
        let token = self
            .token
            .ok_or_else(|| CosmosError::Validation("bearer token is required".into()))?;

        let http = reqwest::Client::builder()
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("cosmos-mgmt/", env!("CARGO_PKG_VERSION")).into()),
            )
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(CosmosClient {
            http,
            base_url,
            subscription_id,
            token,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }
}

impl CosmosClient {
    pub fn builder() -> CosmosClientBuilder {
        CosmosClientBuilder::default()
    }

    /// The subscription this client is scoped to.
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Fully qualified ARM id of a resource path under this subscription,
    /// e.g. for use as a role assignment's `roleDefinitionId`.
    pub fn resource_id(&self, path: &ResourcePath) -> String {
        format!("/subscriptions/{}/{}", self.subscription_id, path.as_str())
    }

    fn url_for(&self, path: &ResourcePath) -> Result<Url> {
        let relative = format!("subscriptions/{}/{}", self.subscription_id, path.as_str());
        let mut url = self
            .base_url
            .join(&relative)
            .map_err(|e| CosmosError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    /// GET a resource and decode its body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &ResourcePath) -> Result<T> {
        let body = self.execute(Method::GET, path, None::<&()>).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// PUT a create-or-update body and decode the resulting resource. The
    /// input is serialized exactly as given; idempotence of the operation
    /// relies on the body being identical across retries.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &ResourcePath,
        request: &B,
    ) -> Result<T> {
        let body = self.execute(Method::PUT, path, Some(request)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// DELETE a resource. 404 surfaces as [`CosmosError::NotFound`]; any 2xx
    /// (200/202/204) counts as accepted.
    pub(crate) async fn delete(&self, path: &ResourcePath) -> Result<()> {
        self.execute(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// HEAD-style existence probe: true on 2xx, false on 404.
    pub(crate) async fn exists(&self, path: &ResourcePath) -> Result<bool> {
        let url = self.url_for(path)?;
        debug!(%url, "HEAD");
        let response = self
            .http
            .head(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CosmosError::from_response(status.as_u16(), &body))
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &ResourcePath,
        request: Option<&B>,
    ) -> Result<String> {
        let url = self.url_for(path)?;
        debug!(%method, %url, "management request");

        let mut builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.token);
        if let Some(request) = request {
            builder = builder.json(request);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        trace!(status = status.as_u16(), body_len = body.len(), "management response");

        if status.is_success() {
            Ok(body)
        } else {
            Err(CosmosError::from_response(status.as_u16(), &body))
        }
    }
}
