//! Metrics setup and update for query execution.

use prometheus::core::{AtomicU64, GenericCounter};
use prometheus::Histogram;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: GenericCounter<AtomicU64>,
    pub explain_total: GenericCounter<AtomicU64>,
    pub query_failure_total: GenericCounter<AtomicU64>,
    pub introspection_total: GenericCounter<AtomicU64>,
    pub query_duration_seconds: Histogram,
}

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize metrics: {0}")]
    PrometheusError(#[from] prometheus::Error),
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, InitializationError> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new histogram metric and register it with the provided Prometheus Registry
fn add_histogram_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<Histogram, InitializationError> {
    let histogram = Histogram::with_opts(prometheus::HistogramOpts::new(
        metric_name,
        metric_description,
    ))?;
    metrics_registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

/// Setup counters and histograms used to produce Prometheus metrics
pub fn initialise_metrics(
    metrics_registry: &mut prometheus::Registry,
) -> Result<Metrics, InitializationError> {
    let query_total = add_int_counter_metric(
        metrics_registry,
        "chart_query_total",
        "Total successful chart queries.",
    )?;

    let explain_total = add_int_counter_metric(
        metrics_registry,
        "chart_query_explain_total",
        "Total successful explains.",
    )?;

    let query_failure_total = add_int_counter_metric(
        metrics_registry,
        "chart_query_failure_total",
        "Total chart queries the database rejected or that returned unreadable rows.",
    )?;

    let introspection_total = add_int_counter_metric(
        metrics_registry,
        "chart_query_introspection_total",
        "Total schema introspections.",
    )?;

    let query_duration_seconds = add_histogram_metric(
        metrics_registry,
        "chart_query_duration_seconds",
        "Time taken to run a chart query and materialize its rows, in seconds.",
    )?;

    Ok(Metrics {
        query_total,
        explain_total,
        query_failure_total,
        introspection_total,
        query_duration_seconds,
    })
}
