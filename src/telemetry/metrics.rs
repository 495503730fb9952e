//! Prometheus metrics

use crate::signal::Signal;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Prediction served from cache
    CacheHit,
    /// Prediction computed from the store
    CacheMiss,
    /// Oldest cache entry dropped to make room
    CacheEviction,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Entries currently cached
    CacheSize,
    /// Cards in the loaded dataset
    LoadedCards,
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    let metric_name = match metric {
        CounterMetric::CacheHit => "cardfv_cache_hits_total",
        CounterMetric::CacheMiss => "cardfv_cache_misses_total",
        CounterMetric::CacheEviction => "cardfv_cache_evictions_total",
    };

    ::metrics::counter!(metric_name).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::CacheSize => "cardfv_cache_size",
        GaugeMetric::LoadedCards => "cardfv_loaded_cards",
    };

    ::metrics::gauge!(metric_name).set(value);
}

/// Count an emitted trading signal
pub fn record_signal(signal: Signal) {
    ::metrics::counter!("cardfv_signals_total", "signal" => signal.as_str()).increment(1);
}

/// Install the Prometheus recorder with an HTTP scrape endpoint
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}
