use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

const STATIC_METRIC: &str = "static metric definition must be valid";

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Fetch metrics
    pub token_fetch_requests: IntCounterVec,
    pub token_fetch_failures: IntCounterVec,
    pub token_fetch_duration: HistogramVec,

    // Cache metrics
    pub cache_hits: IntCounterVec,
    pub token_valid_until_unix: IntGaugeVec,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("dispatchauth".into()), None).expect(STATIC_METRIC);

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Fetch
            token_fetch_requests: IntCounterVec::new(Opts::new("token_fetch_requests_total", "Total token endpoint round trips by audience"), &["audience"]).expect(STATIC_METRIC),
            token_fetch_failures: IntCounterVec::new(Opts::new("token_fetch_failures_total", "Token fetch failures by reason"), &["audience", "reason"]).expect(STATIC_METRIC),
            token_fetch_duration: HistogramVec::new(HistogramOpts::new("token_fetch_duration_seconds", "Token fetch duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["audience"]).expect(STATIC_METRIC),

            // Cache
            cache_hits: IntCounterVec::new(Opts::new("token_cache_hits_total", "Attach calls served from the cached token"), &["audience"]).expect(STATIC_METRIC),
            token_valid_until_unix: IntGaugeVec::new(Opts::new("token_valid_until_unix_seconds", "Local valid-until of the cached token"), &["audience"]).expect(STATIC_METRIC),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_fetch_requests.clone())).expect(STATIC_METRIC);
        reg.register(Box::new(metrics.token_fetch_failures.clone())).expect(STATIC_METRIC);
        reg.register(Box::new(metrics.token_fetch_duration.clone())).expect(STATIC_METRIC);
        reg.register(Box::new(metrics.cache_hits.clone())).expect(STATIC_METRIC);
        reg.register(Box::new(metrics.token_valid_until_unix.clone())).expect(STATIC_METRIC);

        metrics
    }

    /// Prometheus text exposition of every registered metric.
    pub fn encode_text(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
