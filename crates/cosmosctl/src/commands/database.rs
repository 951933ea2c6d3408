//! SQL database commands

use cosmos_mgmt::{
    DatabaseHandler, SqlDatabaseCreateUpdateParameters, SqlDatabaseResource,
    ThroughputSettingsUpdateParameters,
};

use crate::cli::{Cli, DatabaseCommands};
use crate::commands::{emit, emit_deleted};
use crate::connection::Connection;
use crate::error::CliError;

pub async fn run(cli: &Cli, command: &DatabaseCommands) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = DatabaseHandler::new(conn.client.clone());
    let rg = conn.resource_group()?;
    let account = conn.account()?;

    match command {
        DatabaseCommands::Create { name, throughput } => {
            let mut parameters =
                SqlDatabaseCreateUpdateParameters::resource(SqlDatabaseResource::new(name));
            if let Some(throughput) = throughput {
                parameters = parameters.with_throughput(*throughput);
            }
            let database = handler.create_or_update(rg, account, name, &parameters).await?;
            emit(&database, cli.output)
        }
        DatabaseCommands::Get { name } => {
            let database = handler.get(rg, account, name).await?;
            emit(&database, cli.output)
        }
        DatabaseCommands::List => {
            let databases = handler.list(rg, account).await?;
            emit(&databases, cli.output)
        }
        DatabaseCommands::Delete { name } => {
            handler.delete(rg, account, name).await?;
            emit_deleted("database", name, cli.output)
        }
        DatabaseCommands::ThroughputGet { name } => {
            let settings = handler.get_throughput(rg, account, name).await?;
            emit(&settings, cli.output)
        }
        DatabaseCommands::ThroughputSet { name, throughput } => {
            let parameters = ThroughputSettingsUpdateParameters::throughput(*throughput);
            let settings = handler
                .update_throughput(rg, account, name, &parameters)
                .await?;
            emit(&settings, cli.output)
        }
    }
}
