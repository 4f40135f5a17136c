//! Fixed-step frame clock
//!
//! Animation frames arrive at whatever rate the display runs. The clock
//! turns real elapsed time into a whole number of simulation ticks so the
//! ball covers the same distance per second on a 60 Hz or a 144 Hz screen.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap honored; anything longer (tab in background) is cut
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add `dt` seconds and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Drop backlog we could not catch up on
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }

        substeps
    }

    /// Forget partial progress (after pause or reset)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
