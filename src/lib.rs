// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod worker;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{
    BatchEvent, BatchReport, BatchRequest, ImageTask, NotificationSink, Outcome,
};
pub use processing::{BatchProcessor, ImageTransformer, TransformExecutor, run_batch};
pub use utils::{TaskError, TaskResult};
pub use commands::*;
