//! Command implementations
//!
//! Each resource family gets a module with a single `run` entry point.
//! Commands resolve a connection, call the matching handler and hand the
//! response to the output layer.

pub mod account;
pub mod container;
pub mod database;
pub mod profile;
pub mod rbac;
pub mod scripts;

use serde::Serialize;
use serde_json::json;
use tracing::trace;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::{print_output, OutputFormat};

pub async fn dispatch(cli: &Cli) -> Result<(), CliError> {
    trace!("Dispatching: {:?}", cli.command);
    match &cli.command {
        Commands::Account { command } => account::run(cli, command).await,
        Commands::Database { command } => database::run(cli, command).await,
        Commands::Container { command } => container::run(cli, command).await,
        Commands::StoredProcedure { command } => scripts::run_stored_procedure(cli, command).await,
        Commands::Trigger { command } => scripts::run_trigger(cli, command).await,
        Commands::Udf { command } => scripts::run_udf(cli, command).await,
        Commands::RoleDefinition { command } => rbac::run_role_definition(cli, command).await,
        Commands::RoleAssignment { command } => rbac::run_role_assignment(cli, command).await,
        Commands::Profile { command } => profile::run(cli, command),
    }
}

/// Serialize a handler response and print it in the requested format.
pub(crate) fn emit<T: Serialize>(value: &T, format: OutputFormat) -> Result<(), CliError> {
    let value = serde_json::to_value(value).map_err(|e| CliError::Output(e.into()))?;
    print_output(&value, format).map_err(CliError::Output)
}

/// Confirmation payload for delete commands.
pub(crate) fn emit_deleted(kind: &str, name: &str, format: OutputFormat) -> Result<(), CliError> {
    emit(&json!({ "deleted": { "kind": kind, "name": name } }), format)
}

/// Resolve a `--body` argument, reading from a file when prefixed with `@`.
pub(crate) fn read_body(body: &str) -> Result<String, CliError> {
    match body.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::BodyFile {
            path: path.to_string(),
            source,
        }),
        None => Ok(body.to_string()),
    }
}
