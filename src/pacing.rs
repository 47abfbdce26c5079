//! Exact step pacing
//!
//! Splits a total duration into a fixed number of whole-millisecond steps.
//! Remainders are spread over the steps so the sum always equals the total,
//! instead of truncating every step to `total / steps`.

use embassy_time::Duration;

/// Distributes `total` over `steps` integer-millisecond steps
#[derive(Debug, Clone, Copy)]
pub struct StepPacer {
    total_ms: u64,
    steps: u32,
    index: u32,
}

impl StepPacer {
    /// Create a new pacer
    ///
    /// Returns `None` when a step would be shorter than one millisecond.
    pub fn new(total: Duration, steps: u32) -> Option<Self> {
        let total_ms = total.as_millis();
        if steps == 0 || total_ms < u64::from(steps) {
            return None;
        }
        Some(Self {
            total_ms,
            steps,
            index: 0,
        })
    }

    /// Nominal (truncated) step delay
    pub const fn nominal(&self) -> Duration {
        Duration::from_millis(self.total_ms / self.steps as u64)
    }

    /// Position of the next step within the cycle
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Start the cycle over
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Duration of the next step; advances the cycle
    pub fn next_step(&mut self) -> Duration {
        let k = u64::from(self.index);
        let steps = u64::from(self.steps);
        let begin = self.total_ms * k / steps;
        let end = self.total_ms * (k + 1) / steps;

        self.index += 1;
        if self.index >= self.steps {
            self.index = 0;
        }

        Duration::from_millis(end - begin)
    }
}
