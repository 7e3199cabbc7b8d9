//! Per-task outcomes and the aggregated batch result.

use std::time::Duration;
use serde::Serialize;
use crate::core::BatchPhase;
use crate::utils::{TaskError, TaskResult};

/// Result of processing one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed(TaskError),
}

/// An [`Outcome`] tagged with the task it belongs to.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub file: String,
    pub outcome: Outcome,
}

impl TaskOutcome {
    pub fn done(file: impl Into<String>) -> Self {
        Self { file: file.into(), outcome: Outcome::Done }
    }

    pub fn failed(file: impl Into<String>, error: TaskError) -> Self {
        Self { file: file.into(), outcome: Outcome::Failed(error) }
    }
}

/// A failed task as recorded by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFailure {
    pub file: String,
    pub error: TaskError,
}

/// Aggregate of all outcomes of one batch.
///
/// `failures` is in arrival order at the aggregator, which is racy across
/// workers. Callers must not rely on which failure comes first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Number of tasks submitted
    pub total: usize,
    /// Number of tasks that finished successfully
    pub done: usize,
    /// Failed tasks, in arrival order
    pub failures: Vec<TaskFailure>,
    /// Outcomes that never arrived (0 unless a worker died)
    pub missing: usize,
    /// Phase the batch ended in; `Complete` once returned by the processor
    pub phase: BatchPhase,
    /// Wall-clock time of the batch
    #[serde(skip)]
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self { total, ..Self::default() }
    }

    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome.outcome {
            Outcome::Done => self.done += 1,
            Outcome::Failed(error) => self.failures.push(TaskFailure {
                file: outcome.file,
                error,
            }),
        }
    }

    /// Number of outcomes recorded so far.
    pub fn received(&self) -> usize {
        self.done + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.missing == 0
    }

    pub fn first_failure(&self) -> Option<&TaskFailure> {
        self.failures.first()
    }

    /// Collapses the report into the single representative result.
    pub fn into_result(self) -> TaskResult<()> {
        if let Some(failure) = self.failures.into_iter().next() {
            return Err(failure.error);
        }
        if self.missing > 0 {
            return Err(TaskError::dispatch(format!(
                "{} of {} task outcomes were never reported",
                self.missing, self.total
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_success() {
        let report = BatchReport::new(0);
        assert!(report.is_success());
        assert_eq!(report.phase, BatchPhase::Idle);
        assert_eq!(report.into_result(), Ok(()));
    }

    #[test]
    fn into_result_returns_first_recorded_failure() {
        let mut report = BatchReport::new(3);
        report.record(TaskOutcome::done("a.png"));
        report.record(TaskOutcome::failed("b.png", TaskError::transform("bad header")));
        report.record(TaskOutcome::failed("c.png", TaskError::unsupported_format("bmp")));

        assert_eq!(report.received(), 3);
        assert_eq!(report.done, 1);
        assert_eq!(report.first_failure().map(|f| f.file.as_str()), Some("b.png"));
        assert_eq!(report.into_result(), Err(TaskError::transform("bad header")));
    }

    #[test]
    fn missing_outcomes_fail_the_batch() {
        let mut report = BatchReport::new(2);
        report.record(TaskOutcome::done("a.png"));
        report.missing = 1;

        assert!(!report.is_success());
        assert!(matches!(report.into_result(), Err(TaskError::Dispatch(_))));
    }
}
