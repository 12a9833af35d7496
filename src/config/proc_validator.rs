//! Configuration validation with aggregated errors.
//! Every problem is collected so a broken file is fixed in one pass.

use tracing::{error, info};

use crate::config::credentials::Credentials;
use crate::config::settings::{ServiceConfig, SettingsConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_credentials(&cfg.credentials, &mut errors);
    validate_settings(&cfg.settings, &mut errors);

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_credentials(credentials: &Credentials, errors: &mut Vec<String>) {
    for field in credentials.missing_fields() {
        errors.push(format!("credentials.{} must not be empty", field));
    }

    let endpoint = credentials.token_endpoint.as_str();
    if !endpoint.is_empty() && !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        errors.push(format!(
            "credentials.token_endpoint '{}' must be an http(s) URL",
            endpoint
        ));
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.http_timeout_ms == Some(0) {
        errors.push("settings.http_timeout_ms must be greater than 0".to_string());
    }

    // logging level
    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}
