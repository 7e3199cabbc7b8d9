use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Pending tasks buffered in the queue per worker
    pub queue_depth_per_worker: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_depth_per_worker: 2,
        }
    }
}

impl DispatchConfig {
    /// Effective worker count: `max(1, min(requested, task_count))`.
    pub fn effective_workers(requested: i64, task_count: usize) -> usize {
        let requested = usize::try_from(requested).unwrap_or(0);
        requested.min(task_count).max(1)
    }

    pub fn queue_capacity(&self, workers: usize) -> usize {
        workers.saturating_mul(self.queue_depth_per_worker).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_requests_become_one() {
        assert_eq!(DispatchConfig::effective_workers(0, 10), 1);
        assert_eq!(DispatchConfig::effective_workers(-3, 10), 1);
    }

    #[test]
    fn never_more_workers_than_tasks() {
        assert_eq!(DispatchConfig::effective_workers(16, 3), 3);
        assert_eq!(DispatchConfig::effective_workers(4, 0), 1);
    }

    #[test]
    fn honours_requests_within_range() {
        for requested in 1..=8 {
            assert_eq!(DispatchConfig::effective_workers(requested, 8), requested as usize);
        }
    }

    #[test]
    fn queue_capacity_scales_with_workers() {
        let config = DispatchConfig::default();
        assert_eq!(config.queue_capacity(3), 6);
        assert_eq!(DispatchConfig { queue_depth_per_worker: 0 }.queue_capacity(3), 1);
    }
}
