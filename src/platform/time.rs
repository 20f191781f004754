//! Fixed-step timing
//!
//! Converts variable frame times into a whole number of simulation ticks,
//! each stamped with the simulated clock the tick should run at.

use crate::consts::{MAX_SUBSTEPS, TICK_MS};

/// Longest frame delta honoured; longer gaps (tab switches) are cut short
const MAX_FRAME_MS: f64 = 100.0;

/// Frame-time accumulator producing fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator_ms: f64,
    now_ms: u64,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated clock after the last emitted tick
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Feed one frame's elapsed time. Returns the timestamps of the ticks to
    /// run, oldest first, never more than `MAX_SUBSTEPS`.
    pub fn advance(&mut self, frame_ms: f64) -> Vec<u64> {
        self.accumulator_ms += frame_ms.clamp(0.0, MAX_FRAME_MS);

        let step = TICK_MS as f64;
        let mut ticks = Vec::new();
        while self.accumulator_ms >= step && (ticks.len() as u32) < MAX_SUBSTEPS {
            self.accumulator_ms -= step;
            self.now_ms += TICK_MS;
            ticks.push(self.now_ms);
        }
        ticks
    }
}
