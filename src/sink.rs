//! Pixel sinks
//!
//! Animations never touch raw color bytes. They hand an HSV triple to a
//! [`PixelSink`], which converts it to a device color, gamma-corrects it and
//! stores it at a pixel index. Transmission to the strip is a separate step,
//! see [`PixelBuffer::flush`].

use core::cell::RefCell;

use critical_section::Mutex;

use crate::OutputDriver;
use crate::color::{Rgb, hsv16_to_rgb};
use crate::gamma::gamma_rgb;

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Destination for animation output
pub trait PixelSink {
    /// Store a color at a pixel index
    ///
    /// Indices outside the strip are ignored.
    fn set_pixel_color(&mut self, index: usize, color: Rgb);

    /// Convert hue (0..=65535 circle), saturation and value to a device color
    fn color_from_hsv(&self, hue: u16, sat: u8, val: u8) -> Rgb {
        hsv16_to_rgb(hue, sat, val)
    }

    /// Apply gamma correction to a device color
    fn gamma_correct(&self, color: Rgb) -> Rgb {
        gamma_rgb(color)
    }

    /// Convert, gamma-correct and store a color
    fn write_hsv(&mut self, index: usize, hue: u16, sat: u8, val: u8) {
        let color = self.gamma_correct(self.color_from_hsv(hue, sat, val));
        self.set_pixel_color(index, color);
    }
}

/// Shared pixel buffer for a strip of `N` LEDs
///
/// Storage is guarded by a critical section, so handles can be shared
/// between the main loop and interrupt handlers.
pub struct PixelBuffer<const N: usize> {
    inner: Mutex<RefCell<[Rgb; N]>>,
}

impl<const N: usize> PixelBuffer<N> {
    /// Create a buffer with all pixels off
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new([BLACK; N])),
        }
    }

    /// Get a sink handle writing into this buffer
    ///
    /// Handles are `Copy`; each animation gets its own.
    pub const fn sink(&self) -> BufferSink<'_, N> {
        BufferSink { buffer: self }
    }

    /// Store a color; out of range indices are ignored
    pub fn set(&self, index: usize, color: Rgb) {
        critical_section::with(|cs| {
            if let Some(pixel) = self.inner.borrow(cs).borrow_mut().get_mut(index) {
                *pixel = color;
            }
        });
    }

    /// Read a single pixel
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().get(index).copied())
    }

    /// Copy the whole frame
    pub fn snapshot(&self) -> [Rgb; N] {
        critical_section::with(|cs| *self.inner.borrow(cs).borrow())
    }

    /// Turn every pixel off
    pub fn clear(&self) {
        critical_section::with(|cs| {
            *self.inner.borrow(cs).borrow_mut() = [BLACK; N];
        });
    }

    /// Transmit the current frame to the strip
    ///
    /// The frame is copied first so the driver runs outside the critical
    /// section.
    pub fn flush<O: OutputDriver>(&self, driver: &mut O) {
        let frame = self.snapshot();
        driver.write(&frame);
    }
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sink handle for a [`PixelBuffer`].
///
/// This is a lightweight reference that can be copied and passed around.
#[derive(Clone, Copy)]
pub struct BufferSink<'a, const N: usize> {
    buffer: &'a PixelBuffer<N>,
}

impl<const N: usize> PixelSink for BufferSink<'_, N> {
    fn set_pixel_color(&mut self, index: usize, color: Rgb) {
        self.buffer.set(index, color);
    }
}
