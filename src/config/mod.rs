use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::RwLock;

/// Account file configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path to the flat account file
    pub path: String,
    /// Write through a temporary file and rename it over the account file
    #[serde(default)]
    pub atomic_writes: bool,
}

/// Account issuing configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccountsConfig {
    /// How many random account numbers to try before giving up on a free one
    pub max_id_attempts: u32,
}

/// Global application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Application version
    pub version: String,
    /// Account file configuration
    pub storage: StorageConfig,
    /// Account issuing configuration
    pub accounts: AccountsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Pocket Bank".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: StorageConfig {
                path: "accounts.txt".to_string(),
                atomic_writes: false,
            },
            accounts: AccountsConfig {
                max_id_attempts: 1000,
            },
        }
    }
}

// Global configuration instance
lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

/// Load configuration from file
pub fn load_config(path: &str) -> Result<()> {
    // A missing file is written out with defaults
    if !Path::new(path).exists() {
        let default_config = Config::default();
        save_config(path, &default_config)?;
        return update_config(default_config);
    }

    let mut file = File::open(path).context(format!("Failed to open config file: {}", path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).context("Failed to read config file")?;

    let config: Config = match path.ends_with(".toml") {
        true => toml::from_str(&contents).context("Failed to parse TOML config")?,
        false => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    update_config(config)
}

/// Save configuration to file
pub fn save_config(path: &str, config: &Config) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    let serialized = match path.ends_with(".toml") {
        true => toml::to_string_pretty(config).context("Failed to serialize config to TOML")?,
        false => serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?,
    };

    std::fs::write(path, serialized).context(format!("Failed to write config to file: {}", path))?;

    Ok(())
}

/// Get a copy of the current config
pub fn get_config() -> Config {
    CONFIG
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Update the current config
pub fn update_config(config: Config) -> Result<()> {
    let mut current = CONFIG.write().map_err(|_| anyhow!("Configuration lock poisoned"))?;
    *current = config;
    Ok(())
}
