//! Database account commands

use cosmos_mgmt::AccountHandler;
use serde_json::json;

use crate::cli::{AccountCommands, Cli};
use crate::commands::{emit, emit_deleted};
use crate::connection::Connection;
use crate::error::CliError;

pub async fn run(cli: &Cli, command: &AccountCommands) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = AccountHandler::new(conn.client.clone());

    match command {
        AccountCommands::Get => {
            let account = handler.get(conn.resource_group()?, conn.account()?).await?;
            emit(&account, cli.output)
        }
        AccountCommands::List => {
            let accounts = handler.list(conn.resource_group()?).await?;
            emit(&accounts, cli.output)
        }
        AccountCommands::CheckName { name } => {
            let exists = handler.check_name_exists(name).await?;
            emit(&json!({ "name": name, "exists": exists }), cli.output)
        }
        AccountCommands::Delete { name } => {
            handler.delete(conn.resource_group()?, name).await?;
            emit_deleted("account", name, cli.output)
        }
    }
}
