//! CLI error type and user-facing diagnostics
//!
//! API errors from the library are wrapped so they can be rendered with
//! actionable suggestions instead of a bare error chain.

use colored::Colorize;
use cosmos_mgmt::CosmosError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] CosmosError),

    #[error("no subscription id configured")]
    MissingSubscriptionId,

    #[error("no bearer token configured")]
    MissingToken,

    #[error("no resource group configured")]
    MissingResourceGroup,

    #[error("no database account configured")]
    MissingAccount,

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("configuration error")]
    Config(#[source] anyhow::Error),

    #[error("failed to read script body from {path}")]
    BodyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render output")]
    Output(#[source] anyhow::Error),
}

impl CliError {
    /// Suggestions shown under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CliError::Api(e) if e.is_not_found() => vec![
                "Check the resource name and scope with the matching 'list' command".into(),
                "Verify --resource-group and --account point at the right place".into(),
            ],
            CliError::Api(e) if e.is_unauthorized() => vec![
                format!("Refresh the bearer token in {} or your profile", crate::connection::ENV_TOKEN),
            ],
            CliError::Api(e) if e.is_conflict() => vec![
                "A resource with this name or id already exists".into(),
            ],
            CliError::Api(e) if e.is_retryable() => vec![
                "The service reported a transient failure, retry shortly".into(),
            ],
            CliError::MissingSubscriptionId => vec![
                "Run: cosmosctl profile set <name> --subscription-id <SUBSCRIPTION>".into(),
                format!("Or set the {} environment variable", crate::connection::ENV_SUBSCRIPTION_ID),
            ],
            CliError::MissingToken => vec![
                format!("Set the {} environment variable", crate::connection::ENV_TOKEN),
                "Or store a token in your profile with: cosmosctl profile set <name> --token <TOKEN>".into(),
            ],
            CliError::MissingResourceGroup => vec![
                "Pass --resource-group, or set a default with: cosmosctl profile set <name> --resource-group <GROUP>".into(),
            ],
            CliError::MissingAccount => vec![
                "Pass --account, or set a default with: cosmosctl profile set <name> --account <ACCOUNT>".into(),
            ],
            CliError::ProfileNotFound(_) => vec![
                "Run: cosmosctl profile list".into(),
            ],
            _ => Vec::new(),
        }
    }

    /// Print the error and its suggestions to stderr.
    pub fn print_diagnostic(&self) {
        eprintln!("{} {}", "error:".red().bold(), self);

        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
            source = cause.source();
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            eprintln!();
            for suggestion in suggestions {
                eprintln!("  {} {}", "hint:".cyan().bold(), suggestion);
            }
        }
    }
}
