/// Service configuration loader - parses service.toml
///
/// Separates deployment specifics (spreadsheet identity, sheet range,
/// model artifact path, server port) from code, so a redeployment against
/// a different station or a re-exported model never needs a recompile.
///
/// The values API key is deliberately NOT part of the file: service.toml
/// names the environment variable that holds it, and the key itself comes
/// from the environment (via .env in development).

use serde::Deserialize;
use std::env;
use std::fs;

/// Root configuration loaded from service.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub sheets: SheetsConfig,
    pub model: ModelConfig,
    pub server: ServerConfig,
}

/// Tabular store identity: which spreadsheet, which columns.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// A1 range covering exactly the two data columns, e.g. "Sheet1!B:C".
    pub range: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the model artifact JSON, relative to the working directory.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Request worker threads; each concurrent prediction occupies one
    /// for the duration of its store fetch.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

/// Loads service configuration from service.toml.
///
/// # Panics
/// Panics if the configuration file is missing or malformed. This is
/// intentional — the service cannot operate without knowing where its
/// readings and model live.
///
/// # File Location
/// Expects `service.toml` in the current working directory (project root
/// when running via `cargo run`).
pub fn load_config() -> ServiceConfig {
    let config_path = "service.toml";

    let contents = fs::read_to_string(config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path, e));

    toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", config_path, e))
}

// ---------------------------------------------------------------------------
// API key resolution
// ---------------------------------------------------------------------------

/// Configuration environment error
#[derive(Debug)]
pub enum ConfigError {
    /// The configured API key environment variable is not set or empty.
    MissingApiKey(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingApiKey(var) => {
                write!(f, "{} environment variable not set.\n\n", var)?;
                write!(f, "  Required Setup:\n")?;
                write!(f, "  1. Copy .env.example to .env: cp .env.example .env\n")?;
                write!(f, "  2. Edit .env and set {}=<your values API key>\n\n", var)?;
                write!(f, "  The key is read from the environment so it never lands\n")?;
                write!(f, "  in service.toml or version control.")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolves the values API key from the environment variable named in the
/// configuration. Loads .env first, so development setups work without
/// exporting anything.
pub fn resolve_api_key(config: &SheetsConfig) -> Result<String, ConfigError> {
    dotenv::dotenv().ok();

    match env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey(config.api_key_env.clone())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
