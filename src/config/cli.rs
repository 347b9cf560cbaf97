use crate::config::toml_config::AppConfig;
use crate::config::ClientConfig;
use crate::core::render::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "arrivals-search")]
#[command(about = "Count flight arrivals per origin country for an airport")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides the config file and ARRIVALS_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Flight endpoint path (overrides the config file and ARRIVALS_FLIGHT_ENDPOINT)
    #[arg(long, global = true)]
    pub flight_endpoint: Option<String>,

    /// Directory holding the stored auth token
    #[arg(long, global = true)]
    pub storage_dir: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search flight counts by country; reads terms from stdin when TERM is omitted
    Search { term: Option<String> },
    /// Look up arrivals for a 3-letter airport code; interactive when CODE is omitted
    Lookup {
        code: Option<String>,
        /// Also list the individual arrivals
        #[arg(long)]
        show_arrivals: bool,
    },
    /// Manage the stored auth token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TokenAction {
    Set { token: String },
    Show,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub client: ClientConfig,
    pub storage_dir: String,
    pub format: OutputFormat,
}

impl Cli {
    /// Flags override the config file, which overrides the environment.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.resolve_with(ClientConfig::from_env())
    }

    pub fn resolve_with(&self, env_config: ClientConfig) -> Result<ResolvedConfig> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::debug!("📁 Loading configuration from: {}", path.display());
                AppConfig::from_file(path)?
            }
            None => AppConfig::default(),
        };
        file_config.validate()?;

        let mut client = file_config.client_config(env_config);
        if let Some(url) = &self.api_base_url {
            client.set_backend_domain(url.clone());
        }
        if let Some(endpoint) = &self.flight_endpoint {
            client.flight_endpoint = endpoint.clone();
        }

        Ok(ResolvedConfig {
            client,
            storage_dir: self
                .storage_dir
                .clone()
                .unwrap_or_else(|| file_config.storage_dir().to_string()),
            format: self.format.unwrap_or_else(|| file_config.output_format()),
        })
    }
}
