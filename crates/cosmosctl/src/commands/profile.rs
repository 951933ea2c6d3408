//! Profile management commands
//!
//! These are the only commands that write the config file. They honor
//! `--config-file` so tests and scripts can work against a throwaway
//! config without touching the user's real one.

use std::path::PathBuf;

use serde_json::json;

use crate::cli::{Cli, ProfileCommands};
use crate::commands::emit;
use crate::config::{Config, Profile};
use crate::error::CliError;

pub fn run(cli: &Cli, command: &ProfileCommands) -> Result<(), CliError> {
    let explicit_path = cli.config_file.as_ref().map(PathBuf::from);
    let mut config = match &explicit_path {
        Some(path) => Config::load_from(path).map_err(CliError::Config)?,
        None => Config::load().map_err(CliError::Config)?,
    };

    let save = |config: &Config| -> Result<(), CliError> {
        match &explicit_path {
            Some(path) => config.save_to(path).map_err(CliError::Config),
            None => config.save().map_err(CliError::Config),
        }
    };

    match command {
        ProfileCommands::List => {
            let mut names: Vec<&String> = config.profiles.keys().collect();
            names.sort();
            let profiles: Vec<_> = names
                .into_iter()
                .map(|name| {
                    let profile = &config.profiles[name];
                    json!({
                        "name": name,
                        "default": config.default_profile.as_deref() == Some(name.as_str()),
                        "subscription_id": profile.subscription_id,
                        "resource_group": profile.resource_group,
                        "account": profile.account,
                    })
                })
                .collect();
            emit(&profiles, cli.output)
        }
        ProfileCommands::Show { name } => {
            let (name, profile) = config
                .resolve_profile(name.as_deref())
                .ok_or_else(|| {
                    CliError::ProfileNotFound(name.clone().unwrap_or_else(|| "(default)".into()))
                })?;
            // never echo stored tokens
            emit(
                &json!({
                    "name": name,
                    "subscription_id": profile.subscription_id,
                    "resource_group": profile.resource_group,
                    "account": profile.account,
                    "url": profile.url,
                    "api_version": profile.api_version,
                    "token": profile.token.as_ref().map(|_| "<stored>"),
                }),
                cli.output,
            )
        }
        ProfileCommands::Set {
            name,
            subscription_id,
            resource_group,
            account,
            token,
            url,
        } => {
            config.profiles.insert(
                name.clone(),
                Profile {
                    subscription_id: subscription_id.clone(),
                    resource_group: resource_group.clone(),
                    account: account.clone(),
                    token: token.clone(),
                    url: url.clone(),
                    api_version: None,
                },
            );
            // first profile becomes the default
            if config.default_profile.is_none() {
                config.default_profile = Some(name.clone());
            }
            save(&config)?;
            emit(&json!({ "profile": name, "saved": true }), cli.output)
        }
        ProfileCommands::Remove { name } => {
            if config.profiles.remove(name).is_none() {
                return Err(CliError::ProfileNotFound(name.clone()));
            }
            if config.default_profile.as_deref() == Some(name.as_str()) {
                config.default_profile = None;
            }
            save(&config)?;
            emit(&json!({ "profile": name, "removed": true }), cli.output)
        }
        ProfileCommands::Default { name } => {
            if !config.profiles.contains_key(name) {
                return Err(CliError::ProfileNotFound(name.clone()));
            }
            config.default_profile = Some(name.clone());
            save(&config)?;
            emit(&json!({ "default_profile": name }), cli.output)
        }
    }
}
