#![no_std]

//! Non-blocking LED animations for vehicle light bars.
//!
//! - [`PulseAnimator`] breathes a single LED through rise, hold, fall, hold.
//! - [`RotationAnimator`] sweeps four LEDs like a rotating beacon.
//!
//! Animators never sleep. The caller passes the current [`Instant`] into
//! every `update`, animators write HSV colors into a [`PixelSink`], and the
//! frame is transmitted once per loop through an [`OutputDriver`].

pub mod animation;
pub mod beacon;
pub mod bounds;
pub mod channel;
pub mod color;
pub mod command;
pub mod error;
pub mod frame_scheduler;
pub mod gamma;
pub mod math8;
pub mod pacing;
pub mod pulse;
pub mod sink;
pub mod timer;

pub use animation::{Animation, AnimationSlot};
pub use beacon::{BEACON_LEDS, BeaconConfig, RotationAnimator, beacon_samples};
pub use bounds::PixelSpan;
pub use command::{CommandChannel, CommandReceiver, CommandSender, RigCommand};
pub use error::AnimationError;
pub use frame_scheduler::{BufferSlot, FrameResult, FrameScheduler};
pub use gamma::ws2812_lut;
pub use pulse::{PulseAnimator, PulseConfig, PulsePhase};
pub use sink::{BufferSink, PixelBuffer, PixelSink};
pub use timer::ChannelTimer;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Receives the whole frame once per tick.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
