//! Non-blocking countdown timer
//!
//! A restartable timer driven by the caller's clock. It never sleeps; the
//! owner polls [`ChannelTimer::just_finished`] once per loop iteration and
//! gets `true` exactly once for each expiry.

use embassy_time::{Duration, Instant};

/// Restartable countdown with a one-shot expiry edge
#[derive(Debug, Clone, Copy)]
pub struct ChannelTimer {
    /// Duration used by the last `start`
    duration: Duration,
    /// Time at which the timer expires
    deadline: Instant,
    /// Remaining time captured by `pause`
    paused: Option<Duration>,
    /// Whether the timer counts down (cleared once the expiry is consumed)
    running: bool,
}

impl Default for ChannelTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelTimer {
    /// Create an idle timer
    pub const fn new() -> Self {
        Self {
            duration: Duration::from_millis(0),
            deadline: Instant::from_millis(0),
            paused: None,
            running: false,
        }
    }

    /// Start counting down `duration` from `now`
    pub fn start(&mut self, duration: Duration, now: Instant) {
        self.duration = duration;
        self.deadline = now + duration;
        self.paused = None;
        self.running = true;
    }

    /// Start again with the duration of the last `start`
    pub fn restart(&mut self, now: Instant) {
        self.start(self.duration, now);
    }

    /// Stop the timer without firing
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = None;
    }

    /// Returns `true` once when the timer has expired
    ///
    /// Subsequent calls return `false` until the timer is started again.
    /// A paused timer never fires.
    pub fn just_finished(&mut self, now: Instant) -> bool {
        if !self.running || self.paused.is_some() {
            return false;
        }
        if now < self.deadline {
            return false;
        }
        self.running = false;
        true
    }

    /// Freeze the countdown, keeping the remaining time
    pub fn pause(&mut self, now: Instant) {
        if !self.running || self.paused.is_some() {
            return;
        }
        self.paused = Some(self.remaining(now));
    }

    /// Continue a paused countdown from `now`
    pub fn resume(&mut self, now: Instant) {
        if let Some(remaining) = self.paused.take() {
            self.deadline = now + remaining;
        }
    }

    /// Check if the timer is counting down (or paused mid-countdown)
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Check if the timer is paused
    pub const fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    /// Duration of the current countdown
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left until expiry
    pub fn remaining(&self, now: Instant) -> Duration {
        if let Some(remaining) = self.paused {
            return remaining;
        }
        if !self.running {
            return Duration::from_millis(0);
        }
        self.deadline
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0))
    }
}
