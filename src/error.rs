//! Construction and registration errors

use core::fmt;

/// Error returned when an animation cannot be built or registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// Maximum brightness is not above minimum brightness
    InvalidRange,
    /// Revolution period is too short for a one degree step
    InvalidPeriod,
    /// Ramp duration is shorter than the number of brightness steps
    InvalidPulseDuration,
    /// Animation pixels do not fit into the pixel buffer
    OutOfBounds,
    /// Animation pixels overlap an already registered animation
    OverlappingPixels,
    /// No free animation slots left
    CapacityExceeded,
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationError::InvalidRange => {
                write!(f, "max brightness must be greater than min brightness")
            }
            AnimationError::InvalidPeriod => write!(f, "revolution period is too short"),
            AnimationError::InvalidPulseDuration => write!(f, "pulse duration is too short"),
            AnimationError::OutOfBounds => write!(f, "pixel index out of bounds"),
            AnimationError::OverlappingPixels => write!(f, "pixel ranges overlap"),
            AnimationError::CapacityExceeded => write!(f, "animation capacity exceeded"),
        }
    }
}
