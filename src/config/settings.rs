use serde::Deserialize;

use crate::config::credentials::Credentials;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub credentials: Credentials,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// ================================
/// Global settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    /// applied to the HTTP client used for token requests
    pub http_timeout_ms: Option<u64>,
    /// also set `Content-Type: application/json` on decorated requests
    #[serde(default)]
    pub set_content_type_json: bool,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
