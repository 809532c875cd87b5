//! Configuration management for the Tenantry CLI
//!
//! Config file location: ~/.tenantry/config.toml
//!
//! Example config:
//! ```toml
//! [default]
//! api_url = "http://localhost:8080/api/v1"
//! token = "dev-token"
//!
//! [production]
//! api_url = "https://console.example.com/api/v1"
//! storage_url = "https://cdn.example.com/files"
//! token = "prod-token"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tenantry_core::ConsoleConfig;

/// One connection profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Document store REST API base URL
    pub api_url: Option<String>,

    /// File storage base URL, defaults to `{api_url}/files`
    pub storage_url: Option<String>,

    /// Bearer token
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Largest logo accepted by `set-logo`
    #[serde(default = "default_max_logo_bytes")]
    pub max_logo_bytes: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_logo_bytes() -> u64 {
    tenantry_core::DEFAULT_MAX_LOGO_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            storage_url: None,
            token: None,
            timeout: default_timeout(),
            max_logo_bytes: default_max_logo_bytes(),
        }
    }
}

/// Configuration file with multiple profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub profiles: HashMap<String, Config>,
}

impl ConfigFile {
    fn read(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    fn write(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl Config {
    /// Get config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let home = directories::BaseDirs::new()
            .context("Could not determine home directory")?
            .home_dir()
            .to_path_buf();

        Ok(home.join(".tenantry"))
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load a profile, then apply environment overrides
    pub fn load(profile: Option<&str>) -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?, profile)?;
        config.apply_env();
        Ok(config)
    }

    fn load_from(path: &PathBuf, profile: Option<&str>) -> Result<Self> {
        let profile_name = profile.unwrap_or("default");
        Ok(ConfigFile::read(path)?
            .profiles
            .get(profile_name)
            .cloned()
            .unwrap_or_default())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TENANTRY_API_URL") {
            self.api_url = Some(url);
        }
        if let Ok(url) = std::env::var("TENANTRY_STORAGE_URL") {
            self.storage_url = Some(url);
        }
        if let Ok(token) = std::env::var("TENANTRY_API_TOKEN") {
            self.token = Some(token);
        }
        if let Ok(timeout) = std::env::var("TENANTRY_API_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout = t;
            }
        }
        if let Ok(max) = std::env::var("TENANTRY_MAX_LOGO_BYTES") {
            if let Ok(m) = max.parse() {
                self.max_logo_bytes = m;
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, profile: Option<&str>) -> Result<()> {
        self.save_to(&Self::config_path()?, profile)
    }

    fn save_to(&self, path: &PathBuf, profile: Option<&str>) -> Result<()> {
        let mut config_file = ConfigFile::read(path)?;
        config_file
            .profiles
            .insert(profile.unwrap_or("default").to_string(), self.clone());
        config_file.write(path)
    }

    /// List all profiles
    pub fn list_profiles() -> Result<Vec<String>> {
        let mut names: Vec<String> = ConfigFile::read(&Self::config_path()?)?
            .profiles
            .into_keys()
            .collect();
        names.sort();
        Ok(names)
    }

    /// Delete a profile
    pub fn delete_profile(profile: &str) -> Result<()> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(());
        }
        let mut config_file = ConfigFile::read(&path)?;
        config_file.profiles.remove(profile);
        config_file.write(&path)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_none() {
            anyhow::bail!("API URL not configured. Set TENANTRY_API_URL or use 'tenantry configure'");
        }
        validate_remote(&self.to_console_config())
    }

    /// The shared console configuration for this profile
    pub fn to_console_config(&self) -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        config.api.storage_url = self.storage_url.clone();
        config.api.token = self.token.clone();
        config.api.timeout_secs = self.timeout;
        config.uploads.max_logo_bytes = self.max_logo_bytes;
        config
    }

    /// Get a config value by key name
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "api_url" => self.api_url.clone(),
            "storage_url" => self.storage_url.clone(),
            "token" => self.token.as_ref().map(|_| "***".to_string()),
            "timeout" => Some(self.timeout.to_string()),
            "max_logo_bytes" => Some(self.max_logo_bytes.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key name
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => self.api_url = Some(value.to_string()),
            "storage_url" => self.storage_url = Some(value.to_string()),
            "token" => self.token = Some(value.to_string()),
            "timeout" => self.timeout = value.parse()?,
            "max_logo_bytes" => self.max_logo_bytes = value.parse()?,
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Get all config keys
    pub fn keys() -> &'static [&'static str] {
        &["api_url", "storage_url", "token", "timeout", "max_logo_bytes"]
    }
}

/// Check that a console configuration can reach the backend
pub fn validate_remote(config: &ConsoleConfig) -> Result<()> {
    config.validate()?;

    let api_url = &config.api.base_url;
    url::Url::parse(api_url).with_context(|| format!("Invalid API URL: {}", api_url))?;
    let storage_url = config.api.storage_base();
    url::Url::parse(&storage_url)
        .with_context(|| format!("Invalid storage URL: {}", storage_url))?;

    if config.api.token.is_none() {
        anyhow::bail!("API token not configured. Set TENANTRY_API_TOKEN or use 'tenantry configure'");
    }
    Ok(())
}
