//! Desktop preview for myrtio-lightbar animations
//!
//! Simulates a 7 LED light bar: three breathing headlight LEDs followed by a
//! four LED rotating beacon. All control goes through the command channel,
//! the same way firmware buttons would drive the rig.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_lightbar::{
    Animation, AnimationError, BeaconConfig, CommandChannel, CommandSender, Duration,
    FrameScheduler, Instant, OutputDriver, PixelBuffer, PulseAnimator, PulseConfig, Rgb,
    RigCommand, RotationAnimator,
};

/// Number of LEDs on the simulated light bar
const LED_COUNT: usize = 7;

/// Number of animations on the light bar
const MAX_ANIMATIONS: usize = 4;

/// Command channel size
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 48.0;

/// Gap between LEDs
const LED_GAP: f32 = 8.0;

/// Shared pixel buffer written by every animation
static PIXELS: PixelBuffer<LED_COUNT> = PixelBuffer::new();

/// Static command channel for communication between UI and scheduler
static COMMANDS: CommandChannel<COMMAND_CHANNEL_SIZE> = CommandChannel::new();

const HEADLIGHT: PulseConfig = PulseConfig {
    index: 0,
    max_brightness: 255,
    min_brightness: 40,
    on_max: Duration::from_millis(300),
    on_min: Duration::from_millis(150),
    pulse: Duration::from_millis(860),
    start_brightness: 40,
    hue: 40,
    saturation: 30,
};

const BEACON: BeaconConfig = BeaconConfig {
    base_index: 3,
    max_brightness: 255,
    revolution: Duration::from_millis(720),
    hue: 220,
};

/// Keeps the last transmitted frame for drawing
#[derive(Default)]
struct PreviewDriver {
    frame: Vec<Rgb>,
}

impl OutputDriver for PreviewDriver {
    fn write(&mut self, colors: &[Rgb]) {
        self.frame.clear();
        self.frame.extend_from_slice(colors);
    }
}

type PreviewScheduler =
    FrameScheduler<'static, PreviewDriver, LED_COUNT, MAX_ANIMATIONS, COMMAND_CHANNEL_SIZE>;

fn build_scheduler() -> Result<PreviewScheduler, AnimationError> {
    let now = Instant::from_millis(0);
    let mut scheduler = PreviewScheduler::with_frame_duration(
        &PIXELS,
        PreviewDriver::default(),
        Duration::from_millis(1),
    )
    .with_commands(COMMANDS.receiver());

    for (index, start_brightness) in [(0, 40), (1, 120), (2, 200)] {
        let config = PulseConfig {
            index,
            start_brightness,
            ..HEADLIGHT
        };
        scheduler.add(PulseAnimator::new(&config, PIXELS.sink(), now)?.into())?;
    }
    scheduler.add(RotationAnimator::new(&BEACON, PIXELS.sink(), now)?.into())?;

    Ok(scheduler)
}

fn main() -> eframe::Result<()> {
    let scheduler = match build_scheduler() {
        Ok(scheduler) => scheduler,
        Err(err) => {
            eprintln!("invalid light bar configuration: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 260.0])
            .with_title("Light Bar Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-lightbar-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new(scheduler)))),
    )
}

struct PreviewApp {
    scheduler: PreviewScheduler,
    commands: CommandSender<'static, COMMAND_CHANNEL_SIZE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether the whole rig is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
}

impl PreviewApp {
    fn new(scheduler: PreviewScheduler) -> Self {
        Self {
            scheduler,
            commands: COMMANDS.sender(),
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
        }
    }

    fn send(&self, command: RigCommand) {
        let _ = self.commands.try_send(command);
    }

    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
        self.send(if self.playing {
            RigCommand::StartAll
        } else {
            RigCommand::StopAll
        });
    }

    /// Advance synthetic time one millisecond at a time so no step is skipped
    fn advance(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delta_ms = if delta_ms_f64.is_finite() {
            delta_ms_f64.clamp(0.0, 1000.0) as u64
        } else {
            0
        };

        if delta_ms == 0 {
            self.scheduler.tick(Instant::from_millis(self.t_ms));
            return;
        }
        for _ in 0..delta_ms {
            self.t_ms += 1;
            self.scheduler.tick(Instant::from_millis(self.t_ms));
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance();
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.toggle_playing();
                }

                ui.add_space(8.0);
                let secs = self.t_ms / 1000;
                let ms = self.t_ms % 1000;
                ui.label(format!("Time: {secs}.{ms:03}s"));

                ui.add_space(8.0);
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                for slot in 0..self.scheduler.animations().len() {
                    let Some(animation) = self.scheduler.animation(slot) else {
                        continue;
                    };
                    let span = animation.span();
                    let label = if animation.as_beacon().is_some() {
                        format!("beacon {}..{}", span.start, span.end())
                    } else {
                        format!("pulse {}", span.start)
                    };
                    let mut running = animation.is_running();
                    if ui.checkbox(&mut running, label).changed() {
                        self.send(RigCommand::Toggle(slot));
                    }
                }
            });

            ui.add_space(16.0);

            let led_pitch = LED_SIZE + LED_GAP;
            #[allow(clippy::cast_precision_loss)]
            let width = LED_COUNT as f32 * led_pitch;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, LED_SIZE), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in self.scheduler.output().frame.iter().enumerate() {
                let x = origin.x + i as f32 * led_pitch;
                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, origin.y),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 6.0, color);
            }
        });
    }
}
