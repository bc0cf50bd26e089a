//! Dump command implementation

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use super::CliError;
use crate::client::{GraphClient, GraphConfig};
use crate::credential::AccessToken;
use crate::output::JsonSink;
use crate::runner::DumpRunner;

/// Environment variable consulted when `--token` is absent.
pub const TOKEN_ENV_VAR: &str = "FB_ACCESS_TOKEN";

/// Ads Data Downloader CLI
#[derive(Parser, Debug)]
#[command(name = "ads-data-downloader")]
#[command(about = "Dump every accessible Meta ads account to console or disk", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover accessible accounts and dump their full resource set
    Dump(DumpArgs),
}

/// Arguments for the dump command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Graph API access token (falls back to the FB_ACCESS_TOKEN environment variable)
    #[arg(long)]
    pub token: Option<String>,

    /// Output directory for JSON files (console-only when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Maximum pages to fetch per collection endpoint (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub max_pages: u32,
}

impl DumpArgs {
    /// Resolve the access token from the flag or the environment.
    fn resolve_token(&self) -> Result<AccessToken, CliError> {
        if let Some(token) = &self.token {
            return Ok(AccessToken::new(token.clone()));
        }

        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.is_empty() => {
                info!("using access token from {TOKEN_ENV_VAR} environment variable");
                Ok(AccessToken::new(token))
            }
            _ => Err(CliError::InvalidArgument(format!(
                "--token is required (or set the {TOKEN_ENV_VAR} environment variable)"
            ))),
        }
    }

    /// Execute the dump command.
    pub async fn execute(&self) -> Result<(), CliError> {
        let token = self.resolve_token()?;
        let client = GraphClient::new(GraphConfig::default(), token)?;
        let sink = JsonSink::new(self.output.clone());
        let runner = DumpRunner::new(client, sink).with_max_pages(self.max_pages);

        info!("starting ads data dump...");
        if self.max_pages > 0 {
            info!("pagination limit: {} pages per endpoint", self.max_pages);
        } else {
            info!("pagination: unlimited (will fetch all pages)");
        }

        let summary = runner.run().await.map_err(|e| {
            error!("failed to discover ad accounts: {e}");
            error!(
                "troubleshooting: verify the token is valid and carries the ads_read \
                 permission, check that it has not expired, and re-run with --debug \
                 for request detail"
            );
            CliError::from(e)
        })?;

        info!(
            "data dump complete: successfully processed {}/{} accounts",
            summary.accounts_succeeded, summary.accounts_discovered
        );

        Ok(())
    }
}
