use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::settings::{LogFormat, LoggingConfig, ServiceConfig};

/// `--log-level` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Install the global subscriber and return the config it was built from.
///
/// `--log-level` beats `settings.logging.level`. The format always comes from
/// the file (compact when absent). Installing twice is a no-op.
pub fn run(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let mut logging = service_config.settings.logging.clone().unwrap_or_default();
    if let Some(level) = arg_log_level {
        logging.level = level.directive().to_owned();
    }

    let filter = EnvFilter::try_new(logging.level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"));
    let timer = UtcTime::rfc_3339();
    let format_layer = match logging.format {
        // CRI log parsers want flat events without ANSI colors
        LogFormat::Json => fmt::layer().json().flatten_event(true).with_timer(timer).with_ansi(false).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_timer(timer).boxed(),
    };

    let _ = tracing_subscriber::registry().with(format_layer).with(filter).try_init();
    logging
}
