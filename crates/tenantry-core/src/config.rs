//! Configuration for Tenantry

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub uploads: UploadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TENANTRY_API_URL") {
            config.api.base_url = url;
        }
        if let Ok(url) = std::env::var("TENANTRY_STORAGE_URL") {
            config.api.storage_url = Some(url);
        }
        if let Ok(token) = std::env::var("TENANTRY_API_TOKEN") {
            config.api.token = Some(token);
        }
        if let Ok(timeout) = std::env::var("TENANTRY_API_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                config.api.timeout_secs = t;
            }
        }
        if let Ok(max) = std::env::var("TENANTRY_MAX_LOGO_BYTES") {
            if let Ok(m) = max.parse() {
                config.uploads.max_logo_bytes = m;
            }
        }
        if let Ok(level) = std::env::var("TENANTRY_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("TENANTRY_LOG_FORMAT") {
            config.logging.format = format;
        }

        config
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.api.validate()?;
        self.uploads.validate()?;
        self.logging.validate()
    }
}

/// Remote backend endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the document store REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL of the file storage service, defaults to `{base_url}/files`
    #[serde(default)]
    pub storage_url: Option<String>,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage_url: None,
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn storage_base(&self) -> String {
        match &self.storage_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/files", self.base_url.trim_end_matches('/')),
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(crate::Error::Config("api.base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::Config("api.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

/// Limits applied by the file pickers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_logo_bytes")]
    pub max_logo_bytes: u64,
    #[serde(default = "default_accepted_logo_types")]
    pub accepted_logo_types: String,
}

fn default_max_logo_bytes() -> u64 {
    crate::DEFAULT_MAX_LOGO_BYTES
}

fn default_accepted_logo_types() -> String {
    crate::DEFAULT_LOGO_TYPES.to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_logo_bytes: default_max_logo_bytes(),
            accepted_logo_types: default_accepted_logo_types(),
        }
    }
}

impl UploadConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_logo_bytes == 0 {
            return Err(crate::Error::Config(
                "uploads.max_logo_bytes must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    pub fn validate(&self) -> crate::Result<()> {
        match self.format.to_ascii_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(crate::Error::Config(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.uploads.max_logo_bytes, 2 * 1024 * 1024);
        assert_eq!(config.uploads.accepted_logo_types, "image/*");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = ConsoleConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://console.example.com/api/v1/"

            [uploads]
            max_logo_bytes = 524288

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.api.storage_base(),
            "https://console.example.com/api/v1/files"
        );
        assert_eq!(config.uploads.max_logo_bytes, 524288);
        assert_eq!(config.uploads.accepted_logo_types, "image/*");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_explicit_storage_url() {
        let api = ApiConfig {
            storage_url: Some("https://cdn.example.com/".into()),
            ..ApiConfig::default()
        };
        assert_eq!(api.storage_base(), "https://cdn.example.com");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ConsoleConfig::default();
        config.uploads.max_logo_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = ConsoleConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());

        assert!(ConsoleConfig::from_toml_str("[api\nbase_url=").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenantry.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 5\n").unwrap();

        let config = ConsoleConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.api.timeout_secs, 5);

        let missing = dir.path().join("missing.toml");
        let err = ConsoleConfig::from_file(missing.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), "ConfigError");
    }
}
