//! Stored procedure, trigger and user-defined function commands
//!
//! Stored procedures and UDFs share a command shape; triggers add the
//! type/operation flags.

use cosmos_mgmt::{
    SqlStoredProcedureCreateUpdateParameters, SqlStoredProcedureResource,
    SqlTriggerCreateUpdateParameters, SqlTriggerResource,
    SqlUserDefinedFunctionCreateUpdateParameters, SqlUserDefinedFunctionResource,
    StoredProcedureHandler, TriggerHandler, UserDefinedFunctionHandler,
};

use crate::cli::{Cli, ScriptCommands, TriggerCommands};
use crate::commands::{emit, emit_deleted, read_body};
use crate::connection::Connection;
use crate::error::CliError;

pub async fn run_stored_procedure(cli: &Cli, command: &ScriptCommands) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = StoredProcedureHandler::new(conn.client.clone());
    let rg = conn.resource_group()?;
    let account = conn.account()?;

    match command {
        ScriptCommands::Create {
            database,
            container,
            name,
            body,
        } => {
            let body = read_body(body)?;
            let parameters = SqlStoredProcedureCreateUpdateParameters::resource(
                SqlStoredProcedureResource::new(name, body),
            );
            let sproc = handler
                .create_or_update(rg, account, database, container, name, &parameters)
                .await?;
            emit(&sproc, cli.output)
        }
        ScriptCommands::Get {
            database,
            container,
            name,
        } => {
            let sproc = handler.get(rg, account, database, container, name).await?;
            emit(&sproc, cli.output)
        }
        ScriptCommands::List {
            database,
            container,
        } => {
            let sprocs = handler.list(rg, account, database, container).await?;
            emit(&sprocs, cli.output)
        }
        ScriptCommands::Delete {
            database,
            container,
            name,
        } => {
            handler
                .delete(rg, account, database, container, name)
                .await?;
            emit_deleted("storedProcedure", name, cli.output)
        }
    }
}

pub async fn run_udf(cli: &Cli, command: &ScriptCommands) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = UserDefinedFunctionHandler::new(conn.client.clone());
    let rg = conn.resource_group()?;
    let account = conn.account()?;

    match command {
        ScriptCommands::Create {
            database,
            container,
            name,
            body,
        } => {
            let body = read_body(body)?;
            let parameters = SqlUserDefinedFunctionCreateUpdateParameters::resource(
                SqlUserDefinedFunctionResource::new(name, body),
            );
            let udf = handler
                .create_or_update(rg, account, database, container, name, &parameters)
                .await?;
            emit(&udf, cli.output)
        }
        ScriptCommands::Get {
            database,
            container,
            name,
        } => {
            let udf = handler.get(rg, account, database, container, name).await?;
            emit(&udf, cli.output)
        }
        ScriptCommands::List {
            database,
            container,
        } => {
            let udfs = handler.list(rg, account, database, container).await?;
            emit(&udfs, cli.output)
        }
        ScriptCommands::Delete {
            database,
            container,
            name,
        } => {
            handler
                .delete(rg, account, database, container, name)
                .await?;
            emit_deleted("userDefinedFunction", name, cli.output)
        }
    }
}

pub async fn run_trigger(cli: &Cli, command: &TriggerCommands) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = TriggerHandler::new(conn.client.clone());
    let rg = conn.resource_group()?;
    let account = conn.account()?;

    match command {
        TriggerCommands::Create {
            database,
            container,
            name,
            body,
            trigger_type,
            trigger_operation,
        } => {
            let body = read_body(body)?;
            let parameters = SqlTriggerCreateUpdateParameters::resource(SqlTriggerResource::new(
                name,
                body,
                (*trigger_type).into(),
                (*trigger_operation).into(),
            ));
            let trigger = handler
                .create_or_update(rg, account, database, container, name, &parameters)
                .await?;
            emit(&trigger, cli.output)
        }
        TriggerCommands::Get {
            database,
            container,
            name,
        } => {
            let trigger = handler.get(rg, account, database, container, name).await?;
            emit(&trigger, cli.output)
        }
        TriggerCommands::List {
            database,
            container,
        } => {
            let triggers = handler.list(rg, account, database, container).await?;
            emit(&triggers, cli.output)
        }
        TriggerCommands::Delete {
            database,
            container,
            name,
        } => {
            handler
                .delete(rg, account, database, container, name)
                .await?;
            emit_deleted("trigger", name, cli.output)
        }
    }
}
