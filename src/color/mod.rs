use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use smart_leds::hsv::hsv2rgb;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Full circle on the 16-bit hue scale used by pixel sinks
pub const HUE_UNITS_PER_TURN: u32 = 65_536;

/// Convert a hue in degrees to the 16-bit hue scale
///
/// Degrees wrap around, so 360 maps to 0.
#[allow(clippy::cast_possible_truncation)]
pub const fn hue_to_units(degrees: u16) -> u16 {
    let degrees = (degrees % 360) as u32;
    ((degrees * HUE_UNITS_PER_TURN) / 360) as u16
}

/// Convert a saturation percentage (0-100) to an 8-bit value
///
/// Values above 100 are clamped.
#[allow(clippy::cast_possible_truncation)]
pub const fn percent_to_byte(percent: u8) -> u8 {
    let percent = if percent > 100 { 100 } else { percent };
    ((percent as u16 * 255) / 100) as u8
}

/// Convert a color with a 16-bit hue to RGB
#[allow(clippy::cast_possible_truncation)]
pub fn hsv16_to_rgb(hue: u16, sat: u8, val: u8) -> Rgb {
    hsv2rgb(Hsv {
        hue: (hue >> 8) as u8,
        sat,
        val,
    })
}
