//! CLI structure and command definitions
//!
//! One subcommand family per resource kind, all sharing the global
//! profile/scope/output flags. Commands map one-to-one onto the handler
//! operations in `cosmos-mgmt`.

use clap::{Parser, Subcommand};

use cosmos_mgmt::{IndexingMode, PartitionKind, TriggerOperation, TriggerType};

/// Cosmos DB control-plane CLI
#[derive(Parser, Debug)]
#[command(name = "cosmosctl")]
#[command(version, about = "Manage Cosmos DB accounts, databases, containers and roles")]
#[command(long_about = "
Manage Cosmos DB control-plane resources: accounts, SQL databases,
containers, scripts, throughput and SQL role-based access control.

Connection details come from a profile:

    cosmosctl profile set prod --subscription-id <SUB> --resource-group my-rg --account my-acct

A bearer token for the management endpoint is read from the profile or,
preferably, from the COSMOSCTL_TOKEN environment variable.

EXAMPLES:
    cosmosctl database create orders --throughput 700
    cosmosctl container list orders
    cosmosctl role-definition create <GUID> --role-name reader \\
        --assignable-scope <ACCOUNT_ID> --data-action '.../items/read'
    cosmosctl database list -o table
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "COSMOSCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "COSMOSCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Resource group, overriding the profile's default
    #[arg(long, short = 'g', global = true)]
    pub resource_group: Option<String>,

    /// Database account, overriding the profile's default
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "json")]
    pub output: crate::output::OutputFormat,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage database accounts
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Manage SQL databases
    #[command(alias = "db")]
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },
    /// Manage SQL containers
    Container {
        #[command(subcommand)]
        command: ContainerCommands,
    },
    /// Manage stored procedures
    #[command(name = "stored-procedure", alias = "sproc")]
    StoredProcedure {
        #[command(subcommand)]
        command: ScriptCommands,
    },
    /// Manage triggers
    Trigger {
        #[command(subcommand)]
        command: TriggerCommands,
    },
    /// Manage user-defined functions
    Udf {
        #[command(subcommand)]
        command: ScriptCommands,
    },
    /// Manage SQL role definitions
    #[command(name = "role-definition")]
    RoleDefinition {
        #[command(subcommand)]
        command: RoleDefinitionCommands,
    },
    /// Manage SQL role assignments
    #[command(name = "role-assignment")]
    RoleAssignment {
        #[command(subcommand)]
        command: RoleAssignmentCommands,
    },
    /// Manage configuration profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Show the scoped database account
    Get,
    /// List accounts in the resource group
    List,
    /// Check whether an account name is already taken (names are global)
    CheckName {
        /// Account name to probe
        name: String,
    },
    /// Delete a database account
    Delete {
        /// Account name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DatabaseCommands {
    /// Create or update a SQL database
    Create {
        /// Database name
        name: String,
        /// Provision dedicated throughput (RU/s)
        #[arg(long)]
        throughput: Option<i64>,
    },
    /// Get a SQL database
    Get {
        name: String,
    },
    /// List SQL databases in the account
    List,
    /// Delete a SQL database
    Delete {
        name: String,
    },
    /// Show the database's provisioned throughput
    ThroughputGet {
        name: String,
    },
    /// Set the database's provisioned throughput
    ThroughputSet {
        name: String,
        /// New throughput (RU/s)
        #[arg(long)]
        throughput: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContainerCommands {
    /// Create or update a container
    Create {
        /// Parent database name
        database: String,
        /// Container name
        name: String,
        /// Partition key path, e.g. /address/zipCode
        #[arg(long = "partition-key-path")]
        partition_key_path: String,
        /// Partition key algorithm
        #[arg(long = "partition-key-kind", value_enum, default_value = "hash")]
        partition_key_kind: PartitionKindArg,
        /// Indexing mode
        #[arg(long = "indexing-mode", value_enum)]
        indexing_mode: Option<IndexingModeArg>,
        /// Default time-to-live in seconds
        #[arg(long)]
        ttl: Option<i64>,
        /// Provision dedicated throughput (RU/s)
        #[arg(long)]
        throughput: Option<i64>,
    },
    /// Get a container
    Get {
        database: String,
        name: String,
    },
    /// List containers in a database
    List {
        database: String,
    },
    /// Delete a container
    Delete {
        database: String,
        name: String,
    },
    /// Show the container's provisioned throughput
    ThroughputGet {
        database: String,
        name: String,
    },
    /// Set the container's provisioned throughput
    ThroughputSet {
        database: String,
        name: String,
        #[arg(long)]
        throughput: i64,
    },
}

/// Shared shape for stored procedures and user-defined functions.
#[derive(Subcommand, Debug)]
pub enum ScriptCommands {
    /// Create or update a script
    Create {
        database: String,
        container: String,
        name: String,
        /// Script body, or @path to read it from a file
        #[arg(long)]
        body: String,
    },
    /// Get a script
    Get {
        database: String,
        container: String,
        name: String,
    },
    /// List scripts in a container
    List {
        database: String,
        container: String,
    },
    /// Delete a script
    Delete {
        database: String,
        container: String,
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TriggerCommands {
    /// Create or update a trigger
    Create {
        database: String,
        container: String,
        name: String,
        /// Script body, or @path to read it from a file
        #[arg(long)]
        body: String,
        /// When the trigger fires
        #[arg(long = "trigger-type", value_enum, default_value = "pre")]
        trigger_type: TriggerTypeArg,
        /// Which operations the trigger applies to
        #[arg(long = "trigger-operation", value_enum, default_value = "all")]
        trigger_operation: TriggerOperationArg,
    },
    /// Get a trigger
    Get {
        database: String,
        container: String,
        name: String,
    },
    /// List triggers in a container
    List {
        database: String,
        container: String,
    },
    /// Delete a trigger
    Delete {
        database: String,
        container: String,
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleDefinitionCommands {
    /// Create or update a role definition
    Create {
        /// Caller-assigned unique id (GUID)
        id: String,
        /// Display name, unique per account
        #[arg(long = "role-name")]
        role_name: String,
        /// Scope at or below which the definition is assignable (repeatable)
        #[arg(long = "assignable-scope", required = true)]
        assignable_scopes: Vec<String>,
        /// Allowed data action (repeatable)
        #[arg(long = "data-action")]
        data_actions: Vec<String>,
        /// Denied data action (repeatable)
        #[arg(long = "not-data-action")]
        not_data_actions: Vec<String>,
    },
    /// Get a role definition
    Get {
        id: String,
    },
    /// List role definitions in the account
    List,
    /// Delete a role definition
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleAssignmentCommands {
    /// Create or update a role assignment
    Create {
        /// Caller-assigned unique id (GUID)
        id: String,
        /// Fully qualified id of the role definition to grant
        #[arg(long = "role-definition-id")]
        role_definition_id: String,
        /// Data-plane resource path the grant applies to
        #[arg(long)]
        scope: String,
        /// Principal the role is granted to
        #[arg(long = "principal-id")]
        principal_id: String,
    },
    /// Get a role assignment
    Get {
        id: String,
    },
    /// List role assignments in the account
    List,
    /// Delete a role assignment
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List configured profiles
    List,
    /// Show a profile (token elided)
    Show {
        /// Profile name; defaults to the default profile
        name: Option<String>,
    },
    /// Create or update a profile
    Set {
        name: String,
        #[arg(long = "subscription-id")]
        subscription_id: String,
        #[arg(long = "resource-group")]
        resource_group: Option<String>,
        #[arg(long)]
        account: Option<String>,
        /// Bearer token; prefer COSMOSCTL_TOKEN over storing it here
        #[arg(long)]
        token: Option<String>,
        /// Management endpoint override
        #[arg(long)]
        url: Option<String>,
    },
    /// Remove a profile
    Remove {
        name: String,
    },
    /// Set the default profile
    Default {
        name: String,
    },
}

// Wire enums carry serde derives only; these mirror them for clap.

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PartitionKindArg {
    Hash,
    Range,
    MultiHash,
}

impl From<PartitionKindArg> for PartitionKind {
    fn from(value: PartitionKindArg) -> Self {
        match value {
            PartitionKindArg::Hash => PartitionKind::Hash,
            PartitionKindArg::Range => PartitionKind::Range,
            PartitionKindArg::MultiHash => PartitionKind::MultiHash,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum IndexingModeArg {
    Consistent,
    Lazy,
    None,
}

impl From<IndexingModeArg> for IndexingMode {
    fn from(value: IndexingModeArg) -> Self {
        match value {
            IndexingModeArg::Consistent => IndexingMode::Consistent,
            IndexingModeArg::Lazy => IndexingMode::Lazy,
            IndexingModeArg::None => IndexingMode::None,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TriggerTypeArg {
    Pre,
    Post,
}

impl From<TriggerTypeArg> for TriggerType {
    fn from(value: TriggerTypeArg) -> Self {
        match value {
            TriggerTypeArg::Pre => TriggerType::Pre,
            TriggerTypeArg::Post => TriggerType::Post,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TriggerOperationArg {
    All,
    Create,
    Update,
    Delete,
    Replace,
}

impl From<TriggerOperationArg> for TriggerOperation {
    fn from(value: TriggerOperationArg) -> Self {
        match value {
            TriggerOperationArg::All => TriggerOperation::All,
            TriggerOperationArg::Create => TriggerOperation::Create,
            TriggerOperationArg::Update => TriggerOperation::Update,
            TriggerOperationArg::Delete => TriggerOperation::Delete,
            TriggerOperationArg::Replace => TriggerOperation::Replace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_container_create() {
        let cli = Cli::try_parse_from([
            "cosmosctl",
            "container",
            "create",
            "databaseName",
            "containerName",
            "--partition-key-path",
            "/address/zipCode",
            "--throughput",
            "700",
        ])
        .unwrap();
        match cli.command {
            Commands::Container {
                command:
                    ContainerCommands::Create {
                        database,
                        name,
                        partition_key_path,
                        throughput,
                        ..
                    },
            } => {
                assert_eq!(database, "databaseName");
                assert_eq!(name, "containerName");
                assert_eq!(partition_key_path, "/address/zipCode");
                assert_eq!(throughput, Some(700));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn parses_repeatable_role_definition_flags() {
        let cli = Cli::try_parse_from([
            "cosmosctl",
            "role-definition",
            "create",
            "70ef5299-5af4-4529-8b82-0e74f16d6185",
            "--role-name",
            "reader",
            "--assignable-scope",
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.DocumentDB/databaseAccounts/a",
            "--data-action",
            "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers/items/read",
            "--data-action",
            "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers/items/create",
        ])
        .unwrap();
        match cli.command {
            Commands::RoleDefinition {
                command: RoleDefinitionCommands::Create { data_actions, .. },
            } => assert_eq!(data_actions.len(), 2),
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
