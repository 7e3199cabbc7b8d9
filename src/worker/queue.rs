use tokio::sync::{Mutex, mpsc};
use tracing::debug;
use crate::core::ImageTask;

/// Hands out each task of a batch to exactly one worker.
///
/// Tasks are pushed into a bounded channel by a feeder task; workers share
/// the receiving end. Once the feeder has sent everything and the channel
/// drained, [`TaskQueue::next`] returns `None` for every caller.
pub struct TaskQueue {
    receiver: Mutex<mpsc::Receiver<ImageTask>>,
}

impl TaskQueue {
    /// Starts feeding `tasks` into a queue holding at most `capacity`
    /// pending tasks. Must be called inside a tokio runtime.
    pub fn feed(tasks: Vec<ImageTask>, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let total = tasks.len();

        tokio::spawn(async move {
            for task in tasks {
                if sender.send(task).await.is_err() {
                    // Every worker is gone; nobody would receive the rest
                    debug!("Task queue dropped before all {} tasks were fed", total);
                    return;
                }
            }
            debug!("All {} tasks queued, closing queue", total);
        });

        Self {
            receiver: Mutex::new(receiver),
        }
    }

    /// Takes the next task, waiting while the queue is empty but still open.
    pub async fn next(&self) -> Option<ImageTask> {
        self.receiver.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn tasks(n: usize) -> Vec<ImageTask> {
        (0..n)
            .map(|i| ImageTask { name: format!("img-{i}.png"), ..ImageTask::default() })
            .collect()
    }

    #[tokio::test]
    async fn yields_tasks_in_order_then_closes() {
        let queue = TaskQueue::feed(tasks(3), 1);
        let mut names = Vec::new();
        while let Some(task) = queue.next().await {
            names.push(task.name);
        }
        assert_eq!(names, ["img-0.png", "img-1.png", "img-2.png"]);
        assert!(queue.next().await.is_none());
    }

    #[tokio::test]
    async fn empty_batch_closes_immediately() {
        let queue = TaskQueue::feed(Vec::new(), 0);
        assert!(queue.next().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_pullers_never_share_a_task() {
        let queue = Arc::new(TaskQueue::feed(tasks(200), 4));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let queue = Arc::clone(&queue);
            handles.push(tokio::spawn(async move {
                let mut seen = Vec::new();
                while let Some(task) = queue.next().await {
                    seen.push(task.name);
                    tokio::task::yield_now().await;
                }
                seen
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }
        let unique: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(all.len(), 200);
        assert_eq!(unique.len(), 200);
    }
}
