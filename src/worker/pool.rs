use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::core::{BatchEvent, BatchPhase, ImageTask, NotificationSink, PhaseCell, TaskOutcome};
use crate::processing::TransformExecutor;
use crate::utils::TaskError;
use super::queue::TaskQueue;

/// Everything a worker shares with its siblings for one batch.
pub struct WorkerContext {
    pub queue: Arc<TaskQueue>,
    pub executor: Arc<dyn TransformExecutor>,
    pub sink: Arc<dyn NotificationSink>,
    pub output_dir: PathBuf,
    pub total: usize,
    pub phase: Arc<PhaseCell>,
    /// Tasks pulled so far across all workers
    pub started: AtomicUsize,
}

/// Fixed set of workers draining one [`TaskQueue`].
pub struct WorkerPool {
    workers: JoinSet<usize>,
}

impl WorkerPool {
    /// Spawns `size` workers. Each one reports every task it pulls on `outcomes`.
    pub fn spawn(size: usize, context: Arc<WorkerContext>, outcomes: UnboundedSender<TaskOutcome>) -> Self {
        let mut workers = JoinSet::new();
        for id in 0..size {
            debug!("Spawning worker {}", id);
            workers.spawn(run_worker(id, Arc::clone(&context), outcomes.clone()));
        }
        Self { workers }
    }

    /// Waits for every worker to exit.
    ///
    /// Returns the number of tasks the workers processed between them.
    pub async fn join(mut self) -> usize {
        let mut processed = 0;
        while let Some(result) = self.workers.join_next().await {
            match result {
                Ok(count) => processed += count,
                Err(e) => warn!("Worker exited abnormally: {}", e),
            }
        }
        processed
    }
}

async fn run_worker(id: usize, ctx: Arc<WorkerContext>, outcomes: UnboundedSender<TaskOutcome>) -> usize {
    debug!("Worker {} started", id);
    let mut task_count = 0;

    while let Some(task) = ctx.queue.next().await {
        let current = ctx.started.fetch_add(1, Ordering::SeqCst) + 1;
        let file = task.name.clone();
        ctx.sink.emit(BatchEvent::progress(current, ctx.total, file.clone()));

        let outcome = match execute(Arc::clone(&ctx.executor), task, ctx.output_dir.clone()).await {
            Ok(()) => {
                debug!("Worker {} finished {}", id, file);
                TaskOutcome::done(file)
            }
            Err(error) => {
                warn!("Worker {} failed {}: {}", id, file, error);
                ctx.sink.emit(BatchEvent::error(file.clone(), &error));
                TaskOutcome::failed(file, error)
            }
        };
        task_count += 1;

        if outcomes.send(outcome).is_err() {
            warn!("Worker {}: result channel closed, shutting down", id);
            break;
        }
    }

    ctx.phase.advance(BatchPhase::Draining);
    debug!("Worker {} queue closed after {} tasks, shutting down", id, task_count);
    task_count
}

/// Runs the executor on the blocking pool. A panic becomes a task failure.
async fn execute(
    executor: Arc<dyn TransformExecutor>,
    task: ImageTask,
    output_dir: PathBuf,
) -> Result<(), TaskError> {
    tokio::task::spawn_blocking(move || executor.transform(&task, &output_dir))
        .await
        .map_err(|e| TaskError::Panicked(e.to_string()))?
}
