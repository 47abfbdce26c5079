//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::animation::{Animation, AnimationSlot};
use crate::command::{CommandReceiver, RigCommand};
use crate::error::AnimationError;
use crate::sink::{BufferSink, PixelBuffer};

/// Default target frame rate (100 FPS, one frame per 10 ms).
pub const DEFAULT_FPS: u32 = 100;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Animation slot writing into a [`PixelBuffer`] of `N` pixels
pub type BufferSlot<'a, const N: usize> = AnimationSlot<BufferSink<'a, N>>;

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Applies pending control commands
/// - Updates every registered animation once
/// - Transmits the pixel buffer once, after all updates
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// static PIXELS: PixelBuffer<7> = PixelBuffer::new();
/// let mut scheduler = FrameScheduler::<_, 7, 4, 4>::new(&PIXELS, driver);
/// scheduler.add(PulseAnimator::new(&config, PIXELS.sink(), now)?.into())?;
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     let result = scheduler.tick(now);
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: OutputDriver,
    const N: usize,
    const MAX_ANIMATIONS: usize,
    const COMMAND_CHANNEL_SIZE: usize,
> {
    output: O,
    pixels: &'a PixelBuffer<N>,
    animations: Vec<BufferSlot<'a, N>, MAX_ANIMATIONS>,
    commands: Option<CommandReceiver<'a, COMMAND_CHANNEL_SIZE>>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<
    'a,
    O: OutputDriver,
    const N: usize,
    const MAX_ANIMATIONS: usize,
    const COMMAND_CHANNEL_SIZE: usize,
> FrameScheduler<'a, O, N, MAX_ANIMATIONS, COMMAND_CHANNEL_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (100 FPS) for frame timing.
    pub fn new(pixels: &'a PixelBuffer<N>, driver: O) -> Self {
        Self::with_frame_duration(pixels, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        pixels: &'a PixelBuffer<N>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            pixels,
            animations: Vec::new(),
            commands: None,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Attach a command receiver drained at the start of every tick.
    #[must_use]
    pub fn with_commands(mut self, commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>) -> Self {
        self.commands = Some(commands);
        self
    }

    /// Register an animation and return its slot number.
    ///
    /// The animation's pixels must fit the buffer and must not overlap any
    /// registered animation. This is the only place spans are checked.
    pub fn add(&mut self, slot: BufferSlot<'a, N>) -> Result<usize, AnimationError> {
        let span = slot.span();
        if !span.fits(N) {
            return Err(AnimationError::OutOfBounds);
        }
        if self
            .animations
            .iter()
            .any(|registered| registered.span().overlaps(span))
        {
            return Err(AnimationError::OverlappingPixels);
        }
        self.animations
            .push(slot)
            .map_err(|_| AnimationError::CapacityExceeded)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[FrameScheduler.add] slot {} owns pixels {}..{}",
            self.animations.len() - 1,
            span.start,
            span.end()
        );
        Ok(self.animations.len() - 1)
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Applies pending control commands
    /// 3. Updates every animation
    /// 4. Writes the pixel buffer to the output driver
    /// 5. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        self.process_commands(now);

        for animation in &mut self.animations {
            animation.update(now);
        }
        self.pixels.flush(&mut self.output);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Apply a control command immediately.
    ///
    /// Commands for unknown slots are ignored.
    pub fn apply(&mut self, command: RigCommand, now: Instant) {
        #[cfg(feature = "esp32-log")]
        println!("[FrameScheduler.apply] {:?}", command);

        match command {
            RigCommand::Start(slot) => {
                if let Some(animation) = self.animations.get_mut(slot) {
                    animation.start(now);
                }
            }
            RigCommand::Stop(slot) => {
                if let Some(animation) = self.animations.get_mut(slot) {
                    animation.stop(now);
                }
            }
            RigCommand::Toggle(slot) => {
                if let Some(animation) = self.animations.get_mut(slot) {
                    if animation.is_running() {
                        animation.stop(now);
                    } else {
                        animation.start(now);
                    }
                }
            }
            RigCommand::StartAll => {
                for animation in &mut self.animations {
                    animation.start(now);
                }
            }
            RigCommand::StopAll => {
                for animation in &mut self.animations {
                    animation.stop(now);
                }
            }
        }
    }

    /// Registered animations, indexed by slot number.
    pub fn animations(&self) -> &[BufferSlot<'a, N>] {
        &self.animations
    }

    /// Get a registered animation by slot number.
    pub fn animation(&self, slot: usize) -> Option<&BufferSlot<'a, N>> {
        self.animations.get(slot)
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Drain pending commands from the channel (non-blocking).
    fn process_commands(&mut self, now: Instant) {
        let Some(commands) = self.commands else {
            return;
        };
        for command in commands.drain() {
            self.apply(command, now);
        }
    }
}
