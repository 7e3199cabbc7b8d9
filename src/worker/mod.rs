//! Task queue and the worker pool that drains it.

mod pool;
mod queue;

pub use pool::{WorkerContext, WorkerPool};
pub use queue::TaskQueue;
