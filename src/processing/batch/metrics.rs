use std::time::{Duration, Instant};
use tracing::{info, warn};
use crate::core::BatchReport;

/// Wall-clock timing of one batch.
#[derive(Debug, Clone)]
pub struct BatchMetrics {
    started: Instant,
    workers: usize,
}

impl BatchMetrics {
    pub fn start(workers: usize) -> Self {
        Self {
            started: Instant::now(),
            workers,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Logs the batch summary.
    pub fn log_summary(&self, report: &BatchReport) {
        let secs = report.elapsed.as_secs_f64();
        let throughput = if secs > 0.0 {
            report.received() as f64 / secs
        } else {
            0.0
        };

        if report.is_success() {
            info!(
                "Batch complete: {} images with {} workers in {:.2}s ({:.2} img/s)",
                report.done, self.workers, secs, throughput
            );
        } else {
            warn!(
                "Batch complete with errors: {} done, {} failed, {} unreported of {} in {:.2}s",
                report.done,
                report.failures.len(),
                report.missing,
                report.total,
                secs
            );
        }
    }
}
