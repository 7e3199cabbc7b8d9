use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error};
use crate::core::{BatchReport, TaskOutcome};

/// Collects exactly one outcome per task from the workers.
pub struct ResultAggregator {
    expected: usize,
    outcomes: UnboundedReceiver<TaskOutcome>,
}

impl ResultAggregator {
    pub fn new(expected: usize, outcomes: UnboundedReceiver<TaskOutcome>) -> Self {
        Self { expected, outcomes }
    }

    /// Waits until `expected` outcomes arrived.
    ///
    /// Failures are kept in arrival order. If every sender goes away first,
    /// the shortfall is recorded as `missing`.
    pub async fn collect(mut self) -> BatchReport {
        let mut report = BatchReport::new(self.expected);

        while report.received() < self.expected {
            match self.outcomes.recv().await {
                Some(outcome) => {
                    report.record(outcome);
                    debug!("Collected outcome {}/{}", report.received(), self.expected);
                }
                None => {
                    report.missing = self.expected - report.received();
                    error!(
                        "Workers stopped with {} of {} outcomes unreported",
                        report.missing, self.expected
                    );
                    break;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use crate::utils::TaskError;

    #[tokio::test]
    async fn counts_done_and_keeps_failures_in_arrival_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(TaskOutcome::failed("b.png", TaskError::transform("second"))).unwrap();
        tx.send(TaskOutcome::done("a.png")).unwrap();
        tx.send(TaskOutcome::failed("c.png", TaskError::transform("third"))).unwrap();

        let report = ResultAggregator::new(3, rx).collect().await;

        assert_eq!(report.done, 1);
        assert_eq!(report.missing, 0);
        let files: Vec<_> = report.failures.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files, ["b.png", "c.png"]);
    }

    #[tokio::test]
    async fn stops_after_expected_outcomes_even_if_channel_stays_open() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(TaskOutcome::done("a.png")).unwrap();

        let report = ResultAggregator::new(1, rx).collect().await;
        assert_eq!(report.received(), 1);
        drop(tx);
    }

    #[tokio::test]
    async fn records_shortfall_when_senders_disappear() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(TaskOutcome::done("a.png")).unwrap();
        drop(tx);

        let report = ResultAggregator::new(3, rx).collect().await;
        assert_eq!(report.done, 1);
        assert_eq!(report.missing, 2);
    }

    #[tokio::test]
    async fn zero_expected_returns_immediately() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let report = ResultAggregator::new(0, rx).collect().await;
        assert!(report.is_success());
    }
}
