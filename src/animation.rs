//! Animation capability shared by all animators
//!
//! All animations are stored in an enum to avoid heap allocations.
//! Each animator implements the [`Animation`] trait.

use embassy_time::Instant;

use crate::beacon::RotationAnimator;
use crate::bounds::PixelSpan;
use crate::pulse::PulseAnimator;
use crate::sink::PixelSink;

/// A non-blocking animation that can be paused
pub trait Animation {
    /// Advance the animation and write its pixels
    ///
    /// Does O(1) work and returns immediately. No-op while stopped.
    fn update(&mut self, now: Instant);

    /// Resume a stopped animation
    fn start(&mut self, now: Instant);

    /// Freeze the animation; timers keep their remaining time
    fn stop(&mut self, now: Instant);

    /// Check if the animation is running
    fn is_running(&self) -> bool;

    /// Pixels written by this animation
    fn span(&self) -> PixelSpan;
}

/// Animation slot - enum containing all animator kinds
pub enum AnimationSlot<S: PixelSink> {
    /// Single LED breathing pulse
    Pulse(PulseAnimator<S>),
    /// Four LED rotating beacon
    Beacon(RotationAnimator<S>),
}

impl<S: PixelSink> AnimationSlot<S> {
    /// Get the pulse animator, if this slot holds one
    pub fn as_pulse(&self) -> Option<&PulseAnimator<S>> {
        match self {
            Self::Pulse(animator) => Some(animator),
            Self::Beacon(_) => None,
        }
    }

    /// Get the beacon animator, if this slot holds one
    pub fn as_beacon(&self) -> Option<&RotationAnimator<S>> {
        match self {
            Self::Beacon(animator) => Some(animator),
            Self::Pulse(_) => None,
        }
    }
}

impl<S: PixelSink> Animation for AnimationSlot<S> {
    fn update(&mut self, now: Instant) {
        match self {
            Self::Pulse(animator) => animator.update(now),
            Self::Beacon(animator) => animator.update(now),
        }
    }

    fn start(&mut self, now: Instant) {
        match self {
            Self::Pulse(animator) => Animation::start(animator, now),
            Self::Beacon(animator) => Animation::start(animator, now),
        }
    }

    fn stop(&mut self, now: Instant) {
        match self {
            Self::Pulse(animator) => Animation::stop(animator, now),
            Self::Beacon(animator) => Animation::stop(animator, now),
        }
    }

    fn is_running(&self) -> bool {
        match self {
            Self::Pulse(animator) => animator.is_running(),
            Self::Beacon(animator) => animator.is_running(),
        }
    }

    fn span(&self) -> PixelSpan {
        match self {
            Self::Pulse(animator) => Animation::span(animator),
            Self::Beacon(animator) => Animation::span(animator),
        }
    }
}

impl<S: PixelSink> From<PulseAnimator<S>> for AnimationSlot<S> {
    fn from(animator: PulseAnimator<S>) -> Self {
        Self::Pulse(animator)
    }
}

impl<S: PixelSink> From<RotationAnimator<S>> for AnimationSlot<S> {
    fn from(animator: RotationAnimator<S>) -> Self {
        Self::Beacon(animator)
    }
}
