pub mod batch;
pub mod transform;

pub use batch::{BatchProcessor, DispatchConfig, run_batch};
pub use transform::{ImageTransformer, TransformExecutor};
