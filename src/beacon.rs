//! Rotating beacon
//!
//! Four LEDs sample a cosine wave at 90 degree offsets while the phase
//! advances one degree per timer expiry. Negative lobes are cut off, so the
//! light appears to sweep around the group like a rotating police light.

use core::f64::consts::PI;

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::Animation;
use crate::bounds::PixelSpan;
use crate::color::hue_to_units;
use crate::error::AnimationError;
use crate::math8::{clamp8, scale8};
use crate::pacing::StepPacer;
use crate::sink::PixelSink;
use crate::timer::ChannelTimer;

/// Number of LEDs driven by one beacon
pub const BEACON_LEDS: usize = 4;

/// Phase steps in one revolution (one per degree)
pub const STEPS_PER_REVOLUTION: u32 = 360;

/// Per LED phase offset, degrees
const LED_OFFSET_DEG: u32 = 90;

/// Sign applied to each LED's cosine sample
const LED_SIGN: [f64; BEACON_LEDS] = [1.0, -1.0, 1.0, -1.0];

/// Beacon saturation is always full
const BEACON_SATURATION: u8 = 255;

/// Configuration for a rotating beacon
#[derive(Debug, Clone, Copy)]
pub struct BeaconConfig {
    /// First of the four contiguous pixels
    pub base_index: usize,
    /// Peak brightness (255 keeps the full cosine amplitude)
    pub max_brightness: u8,
    /// Duration of one full revolution
    pub revolution: Duration,
    /// Hue in degrees
    pub hue: u16,
}

/// Brightness of the four beacon LEDs at a rotation angle
///
/// Samples are `cos(θ)`, `-cos(θ+90°)`, `cos(θ+180°)`, `-cos(θ+270°)` scaled
/// to 255, truncated and clamped at zero.
#[allow(clippy::cast_possible_truncation)]
pub fn beacon_samples(position_deg: u16) -> [u8; BEACON_LEDS] {
    let mut samples = [0; BEACON_LEDS];
    let mut offset = 0;
    for (sample, sign) in samples.iter_mut().zip(LED_SIGN) {
        // Offsets are reduced in degrees so quarter turns land on exact radians.
        let degrees = (u32::from(position_deg) + offset) % 360;
        let radians = f64::from(degrees) * (PI / 180.0);
        *sample = clamp8((sign * libm::cos(radians) * 255.0) as i32);
        offset += LED_OFFSET_DEG;
    }
    samples
}

/// Four LED rotating beacon simulator
pub struct RotationAnimator<S: PixelSink> {
    sink: S,
    base_index: usize,
    max_brightness: u8,
    hue: u16,

    position_deg: u16,
    samples: [u8; BEACON_LEDS],
    running: bool,

    pacer: StepPacer,
    revolution_timer: ChannelTimer,
}

impl<S: PixelSink> RotationAnimator<S> {
    /// Create a running beacon; the first step fires one step after `now`
    pub fn new(config: &BeaconConfig, sink: S, now: Instant) -> Result<Self, AnimationError> {
        let mut pacer = StepPacer::new(config.revolution, STEPS_PER_REVOLUTION)
            .ok_or(AnimationError::InvalidPeriod)?;

        let mut revolution_timer = ChannelTimer::new();
        revolution_timer.start(pacer.next_step(), now);

        Ok(Self {
            sink,
            base_index: config.base_index,
            max_brightness: config.max_brightness,
            hue: hue_to_units(config.hue),
            position_deg: 0,
            samples: [0; BEACON_LEDS],
            running: true,
            pacer,
            revolution_timer,
        })
    }

    /// Advance one degree when the step timer has expired
    pub fn update(&mut self, now: Instant) {
        if !self.running || !self.revolution_timer.just_finished(now) {
            return;
        }

        let samples = beacon_samples(self.position_deg);
        for (i, sample) in samples.into_iter().enumerate() {
            let value = scale8(sample, self.max_brightness);
            self.samples[i] = value;
            self.sink
                .write_hsv(self.base_index + i, self.hue, BEACON_SATURATION, value);
        }

        if self.position_deg >= 359 {
            self.position_deg = 0;
            #[cfg(feature = "esp32-log")]
            println!("[RotationAnimator.update] led {} revolution done", self.base_index);
        } else {
            self.position_deg += 1;
        }

        self.revolution_timer.start(self.pacer.next_step(), now);
    }

    /// Resume after `stop`
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.revolution_timer.resume(now);
    }

    /// Freeze the rotation, keeping the remaining step time
    pub fn stop(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        self.running = false;
        self.revolution_timer.pause(now);
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Angle sampled by the next step, in `0..360`
    pub const fn position_deg(&self) -> u16 {
        self.position_deg
    }

    /// Brightness written to each LED by the last step
    pub const fn samples(&self) -> [u8; BEACON_LEDS] {
        self.samples
    }

    /// Nominal time per degree, `revolution / 360` truncated
    pub const fn step_delay(&self) -> Duration {
        self.pacer.nominal()
    }

    pub const fn base_index(&self) -> usize {
        self.base_index
    }

    pub const fn max_brightness(&self) -> u8 {
        self.max_brightness
    }

    /// Sink the animator writes into
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: PixelSink> Animation for RotationAnimator<S> {
    fn update(&mut self, now: Instant) {
        RotationAnimator::update(self, now);
    }

    fn start(&mut self, now: Instant) {
        RotationAnimator::start(self, now);
    }

    fn stop(&mut self, now: Instant) {
        RotationAnimator::stop(self, now);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn span(&self) -> PixelSpan {
        PixelSpan::new(self.base_index, BEACON_LEDS)
    }
}
