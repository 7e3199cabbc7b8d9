mod aggregator;
mod config;
mod metrics;
mod processor;

pub use aggregator::ResultAggregator;
pub use config::DispatchConfig;
pub use metrics::BatchMetrics;
pub use processor::{BatchProcessor, run_batch};
