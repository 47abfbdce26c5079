//! Breathing pulse for a single LED
//!
//! Brightness ramps up one unit per step, dwells at the maximum, ramps down
//! and dwells at the minimum, forever. Every step is driven by a
//! [`ChannelTimer`], so `update` never blocks.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::Animation;
use crate::bounds::PixelSpan;
use crate::color::{hue_to_units, percent_to_byte};
use crate::error::AnimationError;
use crate::pacing::StepPacer;
use crate::sink::PixelSink;
use crate::timer::ChannelTimer;

/// Phase of the pulse cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePhase {
    /// Ramping up towards the maximum
    Rise,
    /// Holding the maximum
    OnMax,
    /// Ramping down towards the minimum
    Fall,
    /// Holding the minimum
    OnMin,
}

/// Configuration for a pulse animator
#[derive(Debug, Clone, Copy)]
pub struct PulseConfig {
    /// Pixel index owned by the animator
    pub index: usize,
    /// Brightness held during `OnMax`
    pub max_brightness: u8,
    /// Brightness held during `OnMin`
    pub min_brightness: u8,
    /// Dwell time at the maximum
    pub on_max: Duration,
    /// Dwell time at the minimum
    pub on_min: Duration,
    /// Duration of a full ramp between min and max
    pub pulse: Duration,
    /// Brightness at construction, clamped into the range by the first step
    pub start_brightness: u8,
    /// Hue in degrees
    pub hue: u16,
    /// Saturation in percent (0-100)
    pub saturation: u8,
}

/// Four phase brightness oscillator for one LED
pub struct PulseAnimator<S: PixelSink> {
    sink: S,
    index: usize,
    max_brightness: u8,
    min_brightness: u8,
    current: u8,
    phase: PulsePhase,
    running: bool,

    hue: u16,
    saturation: u8,

    on_max: Duration,
    on_min: Duration,
    pacer: StepPacer,
    step_timer: ChannelTimer,
    on_max_timer: ChannelTimer,
    on_min_timer: ChannelTimer,
}

impl<S: PixelSink> PulseAnimator<S> {
    /// Create a running pulse animator; the first ramp starts at `now`
    pub fn new(config: &PulseConfig, sink: S, now: Instant) -> Result<Self, AnimationError> {
        if config.max_brightness <= config.min_brightness {
            return Err(AnimationError::InvalidRange);
        }
        let steps = u32::from(config.max_brightness - config.min_brightness);
        let mut pacer =
            StepPacer::new(config.pulse, steps).ok_or(AnimationError::InvalidPulseDuration)?;

        let mut step_timer = ChannelTimer::new();
        step_timer.start(pacer.next_step(), now);

        Ok(Self {
            sink,
            index: config.index,
            max_brightness: config.max_brightness,
            min_brightness: config.min_brightness,
            current: config.start_brightness,
            phase: PulsePhase::Rise,
            running: true,
            hue: hue_to_units(config.hue),
            saturation: percent_to_byte(config.saturation),
            on_max: config.on_max,
            on_min: config.on_min,
            pacer,
            step_timer,
            on_max_timer: ChannelTimer::new(),
            on_min_timer: ChannelTimer::new(),
        })
    }

    /// Advance the state machine and write the current color
    pub fn update(&mut self, now: Instant) {
        if !self.running {
            return;
        }

        match self.phase {
            PulsePhase::Rise => {
                if self.step_timer.just_finished(now) {
                    // A start below the range jumps straight to the minimum
                    self.current = self.current.saturating_add(1).max(self.min_brightness);
                    if self.current >= self.max_brightness {
                        self.current = self.max_brightness;
                        self.enter_dwell(PulsePhase::OnMax, now);
                    } else {
                        self.step_timer.start(self.pacer.next_step(), now);
                    }
                }
            }
            PulsePhase::OnMax => {
                if self.on_max_timer.just_finished(now) {
                    self.begin_ramp(PulsePhase::Fall, now);
                }
            }
            PulsePhase::Fall => {
                if self.step_timer.just_finished(now) {
                    self.current = self.current.saturating_sub(1).min(self.max_brightness);
                    if self.current <= self.min_brightness {
                        self.current = self.min_brightness;
                        self.enter_dwell(PulsePhase::OnMin, now);
                    } else {
                        self.step_timer.start(self.pacer.next_step(), now);
                    }
                }
            }
            PulsePhase::OnMin => {
                if self.on_min_timer.just_finished(now) {
                    self.begin_ramp(PulsePhase::Rise, now);
                }
            }
        }

        self.sink
            .write_hsv(self.index, self.hue, self.saturation, self.current);
    }

    /// Resume after `stop`, continuing the active timer where it was frozen
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.step_timer.resume(now);
        self.on_max_timer.resume(now);
        self.on_min_timer.resume(now);
    }

    /// Freeze brightness, phase and timers
    pub fn stop(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        self.running = false;
        self.step_timer.pause(now);
        self.on_max_timer.pause(now);
        self.on_min_timer.pause(now);
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current phase of the cycle
    pub const fn phase(&self) -> PulsePhase {
        self.phase
    }

    /// Current brightness (value channel)
    pub const fn brightness(&self) -> u8 {
        self.current
    }

    pub const fn min_brightness(&self) -> u8 {
        self.min_brightness
    }

    pub const fn max_brightness(&self) -> u8 {
        self.max_brightness
    }

    /// Nominal time per brightness unit, `pulse / (max - min)` truncated
    ///
    /// Actual steps differ by at most one millisecond so that a full ramp
    /// lasts exactly the configured pulse duration.
    pub const fn step_delay(&self) -> Duration {
        self.pacer.nominal()
    }

    /// Pixel index owned by the animator
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Sink the animator writes into
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    fn enter_dwell(&mut self, phase: PulsePhase, now: Instant) {
        match phase {
            PulsePhase::OnMax => self.on_max_timer.start(self.on_max, now),
            PulsePhase::OnMin => self.on_min_timer.start(self.on_min, now),
            PulsePhase::Rise | PulsePhase::Fall => {}
        }
        self.set_phase(phase);
    }

    fn begin_ramp(&mut self, phase: PulsePhase, now: Instant) {
        self.pacer.reset();
        self.step_timer.start(self.pacer.next_step(), now);
        self.set_phase(phase);
    }

    fn set_phase(&mut self, phase: PulsePhase) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[PulseAnimator.update] led {} {:?} -> {:?} at {}",
            self.index, self.phase, phase, self.current
        );
        self.phase = phase;
    }
}

impl<S: PixelSink> Animation for PulseAnimator<S> {
    fn update(&mut self, now: Instant) {
        PulseAnimator::update(self, now);
    }

    fn start(&mut self, now: Instant) {
        PulseAnimator::start(self, now);
    }

    fn stop(&mut self, now: Instant) {
        PulseAnimator::stop(self, now);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn span(&self) -> PixelSpan {
        PixelSpan::single(self.index)
    }
}
