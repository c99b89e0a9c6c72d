//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use shipmail_extractor::ExtractorConfig;
use shipmail_llm::chat::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use shipmail_llm::OracleConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Oracle connection settings
    #[serde(default)]
    pub oracle: OracleSettings,

    /// Default file locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Extraction pipeline settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Oracle endpoint settings. The key itself is never stored in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleSettings {
    /// Chat completions URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Default input and output files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Input emails
    #[serde(default = "default_emails")]
    pub emails: PathBuf,

    /// Port reference table
    #[serde(default = "default_ports")]
    pub ports: PathBuf,

    /// Extraction output
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Ground truth for evaluation
    #[serde(default = "default_ground_truth")]
    pub ground_truth: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default report format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Show a progress bar during extraction
    #[serde(default = "default_true")]
    pub progress: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".shipmail").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used if
    /// present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file '{}' does not exist",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match Self::default_path() {
                Ok(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the settings that would otherwise fail mid-batch.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate()?;
        if self.oracle.timeout_secs == 0 {
            return Err(CliError::Config("oracle.timeout_secs must be greater than 0".into()));
        }
        if self.oracle.api_key_env.trim().is_empty() {
            return Err(CliError::Config("oracle.api_key_env must not be empty".into()));
        }
        Ok(())
    }

    /// Build the oracle connection for a key.
    pub fn oracle_config(&self, api_key: String) -> OracleConfig {
        OracleConfig {
            endpoint: self.oracle.endpoint.clone(),
            model: self.oracle.model.clone(),
            api_key,
            temperature: self.oracle.temperature,
            timeout_secs: self.oracle.timeout_secs,
        }
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key_from_env(&self) -> Result<String> {
        std::env::var(&self.oracle.api_key_env).map_err(|_| {
            CliError::Config(format!(
                "No API key: pass --api-key or set {}",
                self.oracle.api_key_env
            ))
        })
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            emails: default_emails(),
            ports: default_ports(),
            output: default_output(),
            ground_truth: default_ground_truth(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            progress: true,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_emails() -> PathBuf {
    PathBuf::from("emails_input.json")
}

fn default_ports() -> PathBuf {
    PathBuf::from("port_codes_reference.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("output.json")
}

fn default_ground_truth() -> PathBuf {
    PathBuf::from("ground_truth.json")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
