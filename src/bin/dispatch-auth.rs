use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::arg;
use clap::command;
use clap::Parser;
use reqwest::Client;
use dispatch_auth::observability::metrics::get_metrics;
use dispatch_auth::utils::config_loader;
use dispatch_auth::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;
use dispatch_auth::utils::logging;
use dispatch_auth::utils::logging::LogLevel;
use dispatch_auth::TokenProvider;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "dispatch-auth.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// GET this URL with the token attached; without it only a token is fetched
    #[arg(short, long, env = "TARGET_URL")]
    url: Option<String>,
    #[arg(long)]
    print_metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, start logging
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config)?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Create request client and token provider
    // -------------------------------

    let timeout_ms = service_config.settings.http_timeout_ms.unwrap_or(DEFAULT_HTTP_TIMEOUT_MS);
    let client = Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let provider = TokenProvider::from_config(client.clone(), &service_config);
    info!(audience = %provider.credentials().audience, "token provider ready");

    // -------------------------------
    // 3. Decorate and send the request, or just fetch a token
    // -------------------------------

    match &args.url {
        Some(url) => {
            let request = client.get(url).build()?;
            let request = provider.attach_token(request).await.map_err(|err| {
                let (_, error) = err.into_parts();
                error!("attaching token failed: {}", error);
                anyhow!(error)
            })?;

            let response = client.execute(request).await?;
            info!(url = %url, status = %response.status(), "request completed");
        }
        None => {
            let token = provider.token().await.inspect_err(|e| error!("fetching token failed: {}", e))?;
            info!(valid_until = %token.valid_until, scope = %token.scope, "token fetched");
        }
    }

    // -------------------------------
    // 4. Metrics
    // -------------------------------

    if args.print_metrics {
        println!("{}", get_metrics().await.encode_text()?);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::Args;

    #[test]
    fn url_is_optional() {
        let args = Args::try_parse_from(["dispatch-auth", "--print-metrics"]).unwrap();
        assert!(args.url.is_none());
        assert!(args.print_metrics);

        let args = Args::try_parse_from(["dispatch-auth", "--url", "https://dispatch.example.test/orders"]).unwrap();
        assert_eq!(args.url.as_deref(), Some("https://dispatch.example.test/orders"));
    }
}
