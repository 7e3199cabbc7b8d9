//! Core types shared by the queue, the workers and the aggregator.
//!
//! - [`ImageTask`] / [`BatchRequest`]: what the caller submits
//! - [`Outcome`] / [`BatchReport`]: what comes back
//! - [`BatchEvent`] / [`NotificationSink`]: the progress side channel
//! - [`BatchPhase`]: per-batch lifecycle

mod state;
mod types;
mod task;
mod progress;

pub use state::{BatchPhase, PhaseCell};
pub use types::{Outcome, TaskOutcome, TaskFailure, BatchReport};
pub use task::{ImageTask, BatchRequest, FileInfo, DEFAULT_WORKERS};
pub use progress::{
    BatchEvent,
    ProgressPayload,
    ErrorPayload,
    NotificationSink,
    NoopSink,
    TracingSink,
    JsonLinesSink,
};
