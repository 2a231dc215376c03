//! Prediction metrics
//!
//! Lock-free counters tracking:
//! - Prediction outcomes (success / failure)
//! - Cumulative classifier latency
//! - How often each severity class was predicted
//!
//! Exposed in Prometheus text format on `GET /metrics`.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::classifier::SeverityClass;

/// Central metrics collector shared by all handlers
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    /// Total number of predictions attempted
    total_requests: Arc<AtomicUsize>,
    /// Predictions that returned a label
    successful_requests: Arc<AtomicUsize>,
    /// Predictions that failed
    failed_requests: Arc<AtomicUsize>,
    /// Total classifier time in microseconds
    total_inference_time_us: Arc<AtomicU64>,
    /// Predictions per class, indexed by [`SeverityClass::index`]
    class_counts: Arc<[AtomicUsize; 7]>,
    /// Start time for rate calculations
    start_time: Instant,
}

impl MetricsCollector {
    /// Create a new metrics collector
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_requests: Arc::new(AtomicUsize::new(0)),
            successful_requests: Arc::new(AtomicUsize::new(0)),
            failed_requests: Arc::new(AtomicUsize::new(0)),
            total_inference_time_us: Arc::new(AtomicU64::new(0)),
            class_counts: Arc::new(std::array::from_fn(|_| AtomicUsize::new(0))),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    #[allow(clippy::cast_possible_truncation)]
    pub fn record_success(&self, class: SeverityClass, duration: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
        self.class_counts[class.index()].fetch_add(1, Ordering::Relaxed);
        self.total_inference_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record a failed prediction
    pub fn record_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of metrics
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let successful = self.successful_requests.load(Ordering::Relaxed);
        let failed = self.failed_requests.load(Ordering::Relaxed);
        let total_time_us = self.total_inference_time_us.load(Ordering::Relaxed);
        let uptime = self.start_time.elapsed();

        MetricsSnapshot {
            total_requests,
            successful_requests: successful,
            failed_requests: failed,
            total_inference_time_us: total_time_us,
            class_counts: std::array::from_fn(|i| self.class_counts[i].load(Ordering::Relaxed)),
            uptime_secs: uptime.as_secs(),
            avg_latency_ms: if successful > 0 {
                (total_time_us as f64 / 1000.0) / successful as f64
            } else {
                0.0
            },
            error_rate: if total_requests > 0 {
                failed as f64 / total_requests as f64
            } else {
                0.0
            },
        }
    }

    /// Export metrics in Prometheus format
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut out = format!(
            "# HELP obesity_predictions_total Total number of predictions\n\
             # TYPE obesity_predictions_total counter\n\
             obesity_predictions_total {}\n\
             # HELP obesity_predictions_successful Successful predictions\n\
             # TYPE obesity_predictions_successful counter\n\
             obesity_predictions_successful {}\n\
             # HELP obesity_predictions_failed Failed predictions\n\
             # TYPE obesity_predictions_failed counter\n\
             obesity_predictions_failed {}\n\
             # HELP obesity_inference_time_seconds Total classifier time\n\
             # TYPE obesity_inference_time_seconds counter\n\
             obesity_inference_time_seconds {:.6}\n\
             # HELP obesity_avg_latency_ms Average latency in milliseconds\n\
             # TYPE obesity_avg_latency_ms gauge\n\
             obesity_avg_latency_ms {:.3}\n\
             # HELP obesity_error_rate Error rate (0.0-1.0)\n\
             # TYPE obesity_error_rate gauge\n\
             obesity_error_rate {:.4}\n\
             # HELP obesity_uptime_seconds Uptime in seconds\n\
             # TYPE obesity_uptime_seconds counter\n\
             obesity_uptime_seconds {}\n\
             # HELP obesity_predictions_by_class Predictions per severity class\n\
             # TYPE obesity_predictions_by_class counter\n",
            snapshot.total_requests,
            snapshot.successful_requests,
            snapshot.failed_requests,
            snapshot.total_inference_time_us as f64 / 1_000_000.0,
            snapshot.avg_latency_ms,
            snapshot.error_rate,
            snapshot.uptime_secs
        );
        for (class, count) in SeverityClass::ALL.iter().zip(snapshot.class_counts) {
            let _ = writeln!(out, "obesity_predictions_by_class{{class=\"{class}\"}} {count}");
        }
        out
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    /// Total number of predictions attempted
    pub total_requests: usize,
    /// Number of successful predictions
    pub successful_requests: usize,
    /// Number of failed predictions
    pub failed_requests: usize,
    /// Total classifier time in microseconds
    pub total_inference_time_us: u64,
    /// Predictions per class, in [`SeverityClass::ALL`] order
    pub class_counts: [usize; 7],
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Average prediction latency in milliseconds
    pub avg_latency_ms: f64,
    /// Error rate as a fraction (0.0 to 1.0)
    pub error_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_collector_creation() {
        let snapshot = MetricsCollector::new().snapshot();
        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.successful_requests, 0);
        assert_eq!(snapshot.failed_requests, 0);
        assert_eq!(snapshot.class_counts, [0; 7]);
        assert_eq!(snapshot.error_rate, 0.0);
    }

    #[test]
    fn test_record_success_counts_class() {
        let metrics = MetricsCollector::new();
        metrics.record_success(SeverityClass::NormalWeight, Duration::from_millis(2));
        metrics.record_success(SeverityClass::NormalWeight, Duration::from_millis(4));
        metrics.record_success(SeverityClass::ObesityTypeIII, Duration::from_millis(6));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.successful_requests, 3);
        assert_eq!(snapshot.class_counts[SeverityClass::NormalWeight.index()], 2);
        assert_eq!(snapshot.class_counts[SeverityClass::ObesityTypeIII.index()], 1);
        assert!((snapshot.avg_latency_ms - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_record_failure() {
        let metrics = MetricsCollector::new();
        metrics.record_failure();
        metrics.record_success(SeverityClass::ObesityTypeI, Duration::ZERO);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 2);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.error_rate, 0.5);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = MetricsCollector::new();
        metrics.record_success(SeverityClass::OverweightLevelI, Duration::from_millis(1));
        let text = metrics.to_prometheus();
        assert!(text.contains("# TYPE obesity_predictions_total counter"));
        assert!(text.contains("obesity_predictions_total 1"));
        assert!(text.contains("obesity_predictions_by_class{class=\"Overweight_Level_I\"} 1"));
        assert!(text.contains("obesity_predictions_by_class{class=\"Normal_Weight\"} 0"));
    }

    #[test]
    fn test_concurrent_recording() {
        let metrics = MetricsCollector::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let m = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.record_success(SeverityClass::NormalWeight, Duration::from_micros(10));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("test");
        }
        assert_eq!(metrics.snapshot().successful_requests, 800);
    }
}
