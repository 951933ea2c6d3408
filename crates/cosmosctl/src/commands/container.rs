//! SQL container commands

use cosmos_mgmt::{
    ContainerHandler, ContainerPartitionKey, IndexingPolicy, SqlContainerCreateUpdateParameters,
    SqlContainerResource, ThroughputSettingsUpdateParameters,
};

use crate::cli::{Cli, ContainerCommands};
use crate::commands::{emit, emit_deleted};
use crate::connection::Connection;
use crate::error::CliError;

pub async fn run(cli: &Cli, command: &ContainerCommands) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = ContainerHandler::new(conn.client.clone());
    let rg = conn.resource_group()?;
    let account = conn.account()?;

    match command {
        ContainerCommands::Create {
            database,
            name,
            partition_key_path,
            partition_key_kind,
            indexing_mode,
            ttl,
            throughput,
        } => {
            let partition_key = ContainerPartitionKey {
                paths: vec![partition_key_path.clone()],
                kind: (*partition_key_kind).into(),
                version: None,
            };
            let mut resource = SqlContainerResource::new(name).with_partition_key(partition_key);
            if let Some(mode) = indexing_mode {
                resource = resource.with_indexing_policy(IndexingPolicy {
                    indexing_mode: Some((*mode).into()),
                    ..Default::default()
                });
            }
            if let Some(ttl) = ttl {
                resource = resource.with_default_ttl(*ttl);
            }
            let mut parameters = SqlContainerCreateUpdateParameters::resource(resource);
            if let Some(throughput) = throughput {
                parameters = parameters.with_throughput(*throughput);
            }
            let container = handler
                .create_or_update(rg, account, database, name, &parameters)
                .await?;
            emit(&container, cli.output)
        }
        ContainerCommands::Get { database, name } => {
            let container = handler.get(rg, account, database, name).await?;
            emit(&container, cli.output)
        }
        ContainerCommands::List { database } => {
            let containers = handler.list(rg, account, database).await?;
            emit(&containers, cli.output)
        }
        ContainerCommands::Delete { database, name } => {
            handler.delete(rg, account, database, name).await?;
            emit_deleted("container", name, cli.output)
        }
        ContainerCommands::ThroughputGet { database, name } => {
            let settings = handler.get_throughput(rg, account, database, name).await?;
            emit(&settings, cli.output)
        }
        ContainerCommands::ThroughputSet {
            database,
            name,
            throughput,
        } => {
            let parameters = ThroughputSettingsUpdateParameters::throughput(*throughput);
            let settings = handler
                .update_throughput(rg, account, database, name, &parameters)
                .await?;
            emit(&settings, cli.output)
        }
    }
}
