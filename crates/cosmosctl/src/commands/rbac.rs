//! SQL role definition and role assignment commands

use cosmos_mgmt::{
    Permission, RoleAssignmentHandler, RoleDefinitionHandler, RoleDefinitionType,
    SqlRoleAssignmentCreateUpdateParameters, SqlRoleAssignmentProperties,
    SqlRoleDefinitionCreateUpdateParameters, SqlRoleDefinitionProperties,
};

use crate::cli::{Cli, RoleAssignmentCommands, RoleDefinitionCommands};
use crate::commands::{emit, emit_deleted};
use crate::connection::Connection;
use crate::error::CliError;

pub async fn run_role_definition(
    cli: &Cli,
    command: &RoleDefinitionCommands,
) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = RoleDefinitionHandler::new(conn.client.clone());
    let rg = conn.resource_group()?;
    let account = conn.account()?;

    match command {
        RoleDefinitionCommands::Create {
            id,
            role_name,
            assignable_scopes,
            data_actions,
            not_data_actions,
        } => {
            let parameters =
                SqlRoleDefinitionCreateUpdateParameters::new(SqlRoleDefinitionProperties {
                    role_name: Some(role_name.clone()),
                    role_type: Some(RoleDefinitionType::CustomRole),
                    assignable_scopes: assignable_scopes.clone(),
                    permissions: vec![Permission {
                        data_actions: data_actions.clone(),
                        not_data_actions: not_data_actions.clone(),
                    }],
                });
            let definition = handler
                .create_or_update(rg, account, id, &parameters)
                .await?;
            emit(&definition, cli.output)
        }
        RoleDefinitionCommands::Get { id } => {
            let definition = handler.get(rg, account, id).await?;
            emit(&definition, cli.output)
        }
        RoleDefinitionCommands::List => {
            let definitions = handler.list(rg, account).await?;
            emit(&definitions, cli.output)
        }
        RoleDefinitionCommands::Delete { id } => {
            handler.delete(rg, account, id).await?;
            emit_deleted("roleDefinition", id, cli.output)
        }
    }
}

pub async fn run_role_assignment(
    cli: &Cli,
    command: &RoleAssignmentCommands,
) -> Result<(), CliError> {
    let conn = Connection::resolve(cli)?;
    let handler = RoleAssignmentHandler::new(conn.client.clone());
    let rg = conn.resource_group()?;
    let account = conn.account()?;

    match command {
        RoleAssignmentCommands::Create {
            id,
            role_definition_id,
            scope,
            principal_id,
        } => {
            let parameters =
                SqlRoleAssignmentCreateUpdateParameters::new(SqlRoleAssignmentProperties {
                    role_definition_id: Some(role_definition_id.clone()),
                    scope: Some(scope.clone()),
                    principal_id: Some(principal_id.clone()),
                });
            let assignment = handler
                .create_or_update(rg, account, id, &parameters)
                .await?;
            emit(&assignment, cli.output)
        }
        RoleAssignmentCommands::Get { id } => {
            let assignment = handler.get(rg, account, id).await?;
            emit(&assignment, cli.output)
        }
        RoleAssignmentCommands::List => {
            let assignments = handler.list(rg, account).await?;
            emit(&assignments, cli.output)
        }
        RoleAssignmentCommands::Delete { id } => {
            handler.delete(rg, account, id).await?;
            emit_deleted("roleAssignment", id, cli.output)
        }
    }
}
