use std::{fs, path::Path};

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::proc_validator;
use crate::config::settings::{LoggingConfig, ServiceConfig};
use crate::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;

/// Load and validate config from YAML file
pub fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("cannot read config {}: {}", path.display(), e))?;

    let expanded = expand_env_vars(&content)?;
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::default());
    }
    if service_config.settings.http_timeout_ms.is_none() {
        service_config.settings.http_timeout_ms = Some(DEFAULT_HTTP_TIMEOUT_MS);
    }

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config)
        .map_err(|errors| anyhow!("invalid config:\n  - {}", errors.join("\n  - ")))?;

    Ok(service_config)
}

/// Replace `${VAR}` and `${VAR:default}` with values from the environment.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}
