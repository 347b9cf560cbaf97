use crate::config::ClientConfig;
use crate::core::render::OutputFormat;
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_STORAGE_DIR: &str = ".arrivals-search";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub domain: Option<String>,
    pub flight_endpoint: Option<String>,
    pub lookup_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub duration_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SearchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays file settings onto `base`, typically the environment-derived config.
    pub fn client_config(&self, base: ClientConfig) -> ClientConfig {
        let mut config = base;

        if let Some(domain) = &self.backend.domain {
            config.set_backend_domain(domain.clone());
        }
        if let Some(endpoint) = &self.backend.flight_endpoint {
            config.flight_endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.backend.lookup_endpoint {
            config.lookup_endpoint = endpoint.clone();
        }
        if let Some(seconds) = self.backend.timeout_seconds {
            config.timeout = Some(Duration::from_secs(seconds));
        }
        if let Some(seconds) = self.notifications.duration_seconds {
            config.notification_duration = Duration::from_secs(seconds);
        }

        config
    }

    pub fn storage_dir(&self) -> &str {
        self.storage.dir.as_deref().unwrap_or(DEFAULT_STORAGE_DIR)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if let Some(domain) = &self.backend.domain {
            crate::utils::validation::validate_url("backend.domain", domain)?;
        }

        validate_path("storage.dir", self.storage_dir())?;

        if let Some(seconds) = self.backend.timeout_seconds {
            validate_positive_number("backend.timeout_seconds", seconds, 1)?;
        }

        Ok(())
    }
}
