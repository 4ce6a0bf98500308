//! Prometheus metrics for signing and authorization.
//!
//! All metrics follow the naming convention: `lt_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Signatures produced, by key type (ed25519 / ecdsa_secp256k1 / callback)
    pub static ref SIGNATURES_PRODUCED: CounterVec = CounterVec::new(
        Opts::new("lt_signing_signatures_produced_total", "Signatures produced by signatories"),
        &["key_type"]
    ).expect("metric creation failed");

    /// Satisfaction evaluations, by outcome (satisfied / unsatisfied)
    pub static ref SATISFACTION_CHECKS: CounterVec = CounterVec::new(
        Opts::new("lt_authorization_satisfaction_checks_total", "Endorsement satisfaction evaluations"),
        &["outcome"]
    ).expect("metric creation failed");

    /// External signer failures, by reason (timeout / rejected / no_runtime)
    pub static ref CALLBACK_FAILURES: CounterVec = CounterVec::new(
        Opts::new("lt_signing_callback_failures_total", "External signer callback failures"),
        &["reason"]
    ).expect("metric creation failed");

    /// Time spent collecting a signature map
    pub static ref SIGNING_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "lt_signing_duration_seconds",
            "Time spent collecting signatures for one message"
        ).buckets(prometheus::exponential_buckets(0.0001, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle proving metrics were registered.
#[derive(Debug)]
pub struct MetricsHandle {
    registered: usize,
}

impl MetricsHandle {
    /// Number of collectors registered.
    pub fn registered(&self) -> usize {
        self.registered
    }
}

/// Register all metrics with the global registry.
///
/// Collectors that are already registered are skipped, so repeated calls
/// are harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SIGNATURES_PRODUCED.clone()),
        Box::new(SATISFACTION_CHECKS.clone()),
        Box::new(CALLBACK_FAILURES.clone()),
        Box::new(SIGNING_DURATION.clone()),
    ];
    let registered = metrics.len();

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { registered })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
