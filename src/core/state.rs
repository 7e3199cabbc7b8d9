//! Per-batch lifecycle tracking.

use std::sync::atomic::{AtomicU8, Ordering};
use serde::Serialize;
use tracing::debug;

/// Lifecycle of one batch: `Idle → Dispatching → Draining → Complete`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum BatchPhase {
    /// Request validated, queue populated
    #[default]
    Idle = 0,
    /// Workers are pulling and processing tasks
    Dispatching = 1,
    /// Queue closed, waiting for in-flight tasks
    Draining = 2,
    /// Terminal; the result is fixed
    Complete = 3,
}

impl BatchPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Dispatching,
            2 => Self::Draining,
            _ => Self::Complete,
        }
    }
}

/// Shared phase of a running batch. Only moves forward.
#[derive(Debug)]
pub struct PhaseCell(AtomicU8);

impl Default for PhaseCell {
    fn default() -> Self {
        Self(AtomicU8::new(BatchPhase::Idle as u8))
    }
}

impl PhaseCell {
    pub fn get(&self) -> BatchPhase {
        BatchPhase::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Moves to `phase` if it is ahead of the current one.
    ///
    /// Returns true when this call performed the transition.
    pub fn advance(&self, phase: BatchPhase) -> bool {
        let previous = BatchPhase::from_u8(self.0.fetch_max(phase as u8, Ordering::AcqRel));
        let advanced = previous < phase;
        if advanced {
            debug!("Batch phase {:?} -> {:?}", previous, phase);
        }
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_advances_in_order() {
        let phase = PhaseCell::default();
        assert_eq!(phase.get(), BatchPhase::Idle);
        assert!(phase.advance(BatchPhase::Dispatching));
        assert!(phase.advance(BatchPhase::Draining));
        assert!(!phase.advance(BatchPhase::Draining));
        assert_eq!(phase.get(), BatchPhase::Draining);
    }

    #[test]
    fn never_leaves_complete() {
        let phase = PhaseCell::default();
        assert!(phase.advance(BatchPhase::Complete));
        assert!(!phase.advance(BatchPhase::Dispatching));
        assert_eq!(phase.get(), BatchPhase::Complete);
    }
}
