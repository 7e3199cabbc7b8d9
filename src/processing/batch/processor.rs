use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::{BatchEvent, BatchPhase, BatchReport, BatchRequest, ImageTask, NotificationSink, PhaseCell};
use crate::processing::TransformExecutor;
use crate::utils::TaskResult;
use crate::worker::{TaskQueue, WorkerContext, WorkerPool};
use super::aggregator::ResultAggregator;
use super::config::DispatchConfig;
use super::metrics::BatchMetrics;

/// Runs batches of image tasks on a bounded worker pool.
///
/// Every submitted task yields exactly one outcome. Failures are contained
/// to their task, reported on the sink as they happen, and collected into
/// the returned [`BatchReport`]. The sink receives exactly one `Complete`
/// per batch, after all outcomes are in.
#[derive(Clone)]
pub struct BatchProcessor {
    executor: Arc<dyn TransformExecutor>,
    sink: Arc<dyn NotificationSink>,
    config: DispatchConfig,
}

impl BatchProcessor {
    pub fn new(executor: Arc<dyn TransformExecutor>, sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_config(executor, sink, DispatchConfig::default())
    }

    pub fn with_config(
        executor: Arc<dyn TransformExecutor>,
        sink: Arc<dyn NotificationSink>,
        config: DispatchConfig,
    ) -> Self {
        Self { executor, sink, config }
    }

    /// Processes every task of `request` and returns the aggregated report.
    pub async fn process(&self, request: BatchRequest) -> BatchReport {
        let BatchRequest { tasks, output_path, workers } = request;
        let total = tasks.len();
        let worker_count = DispatchConfig::effective_workers(workers, total);
        info!(
            "Processing batch of {} tasks with {} workers (requested {}) into {}",
            total,
            worker_count,
            workers,
            output_path.display()
        );

        let metrics = BatchMetrics::start(worker_count);
        let phase = Arc::new(PhaseCell::default());
        let queue = Arc::new(TaskQueue::feed(tasks, self.config.queue_capacity(worker_count)));

        let context = Arc::new(WorkerContext {
            queue,
            executor: Arc::clone(&self.executor),
            sink: Arc::clone(&self.sink),
            output_dir: output_path,
            total,
            phase: Arc::clone(&phase),
            started: AtomicUsize::new(0),
        });

        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        phase.advance(BatchPhase::Dispatching);
        let pool = WorkerPool::spawn(worker_count, context, outcome_tx);

        let mut report = ResultAggregator::new(total, outcome_rx).collect().await;
        let processed = pool.join().await;
        debug!("Workers joined after processing {} tasks", processed);

        report.elapsed = metrics.elapsed();
        phase.advance(BatchPhase::Complete);
        report.phase = phase.get();
        self.sink.emit(BatchEvent::Complete);
        metrics.log_summary(&report);

        report
    }
}

/// Runs one batch and collapses it to a single result.
///
/// Returns `Ok(())` when every task succeeded, otherwise the first failure
/// the aggregator received. All failures are still reported on `sink`.
pub async fn run_batch(
    tasks: Vec<ImageTask>,
    output_dir: impl Into<PathBuf>,
    workers: i64,
    executor: Arc<dyn TransformExecutor>,
    sink: Arc<dyn NotificationSink>,
) -> TaskResult<()> {
    BatchProcessor::new(executor, sink)
        .process(BatchRequest::new(tasks, output_dir, workers))
        .await
        .into_result()
}
