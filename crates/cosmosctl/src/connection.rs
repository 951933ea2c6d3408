//! Connection resolution
//!
//! Turns CLI flags, environment variables and the config file into a
//! ready-to-use [`CosmosClient`] plus the resource-group/account scope
//! most commands need.
//!
//! Precedence, highest first: command-line flags, environment variables,
//! profile values. When `--config-file` is given explicitly, environment
//! variables are ignored so that a pinned config file fully describes the
//! connection (important for scripting and tests).

use std::path::PathBuf;

use cosmos_mgmt::CosmosClient;
use tracing::{debug, info, trace};

use crate::cli::Cli;
use crate::config::{Config, Profile};
use crate::error::CliError;

pub const ENV_SUBSCRIPTION_ID: &str = "COSMOSCTL_SUBSCRIPTION_ID";
pub const ENV_TOKEN: &str = "COSMOSCTL_TOKEN";
pub const ENV_URL: &str = "COSMOSCTL_URL";
pub const ENV_API_VERSION: &str = "COSMOSCTL_API_VERSION";
pub const ENV_RESOURCE_GROUP: &str = "COSMOSCTL_RESOURCE_GROUP";
pub const ENV_ACCOUNT: &str = "COSMOSCTL_ACCOUNT";

/// Resolved connection settings for one invocation.
pub struct Connection {
    pub client: CosmosClient,
    resource_group: Option<String>,
    account: Option<String>,
}

impl Connection {
    /// Resolve a connection from the parsed CLI and its config file.
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let explicit_config = cli.config_file.as_ref().map(PathBuf::from);
        let use_env = explicit_config.is_none();
        if !use_env {
            info!("--config-file specified explicitly, ignoring environment variables");
        }
        trace!("Requested profile: {:?}", cli.profile);

        let config = match &explicit_config {
            Some(path) => Config::load_from(path).map_err(CliError::Config)?,
            None => Config::load().map_err(CliError::Config)?,
        };

        let profile = match config.resolve_profile(cli.profile.as_deref()) {
            Some((name, profile)) => {
                debug!("Using profile: {}", name);
                profile.clone()
            }
            None => {
                if let Some(name) = &cli.profile {
                    return Err(CliError::ProfileNotFound(name.clone()));
                }
                debug!("No profile configured, relying on environment variables");
                Profile::default()
            }
        };

        let env = |key: &str| -> Option<String> {
            if use_env {
                let value = std::env::var(key).ok().filter(|v| !v.is_empty());
                if value.is_some() {
                    debug!("Found {} environment variable", key);
                }
                value
            } else {
                None
            }
        };

        let subscription_id = env(ENV_SUBSCRIPTION_ID)
            .or_else(|| {
                if profile.subscription_id.is_empty() {
                    None
                } else {
                    Some(profile.subscription_id.clone())
                }
            })
            .ok_or(CliError::MissingSubscriptionId)?;

        let token = env(ENV_TOKEN)
            .or_else(|| profile.token.clone())
            .ok_or(CliError::MissingToken)?;

        let mut builder = CosmosClient::builder()
            .subscription_id(subscription_id)
            .bearer_token(token);

        if let Some(url) = env(ENV_URL).or_else(|| profile.url.clone()) {
            builder = builder.base_url(url);
        }
        if let Some(version) = env(ENV_API_VERSION).or_else(|| profile.api_version.clone()) {
            builder = builder.api_version(version);
        }

        let client = builder.build()?;
        debug!("Management client ready: {:?}", client);

        let resource_group = cli
            .resource_group
            .clone()
            .or_else(|| env(ENV_RESOURCE_GROUP))
            .or_else(|| profile.resource_group.clone());
        let account = cli
            .account
            .clone()
            .or_else(|| env(ENV_ACCOUNT))
            .or_else(|| profile.account.clone());
        trace!(
            "Resolved scope: resource_group={:?} account={:?}",
            resource_group,
            account
        );

        Ok(Self {
            client,
            resource_group,
            account,
        })
    }

    /// Resource group this invocation is scoped to.
    pub fn resource_group(&self) -> Result<&str, CliError> {
        self.resource_group
            .as_deref()
            .ok_or(CliError::MissingResourceGroup)
    }

    /// Database account this invocation is scoped to.
    pub fn account(&self) -> Result<&str, CliError> {
        self.account.as_deref().ok_or(CliError::MissingAccount)
    }
}
