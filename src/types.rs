//! Configuration for the heading transform

use crate::axes::AxesAlignment;

/// Heading transform settings
///
/// Controls how device orientation is interpreted and how strictly incoming
/// quaternions are checked before use.
///
/// # Example
/// ```
/// use sight_compass::{AxesAlignment, HeadingSettings, HeadingTransform};
///
/// let settings = HeadingSettings {
///     alignment: AxesAlignment::PxPyPz, // phone used flat, like a map
///     max_norm_error: 0.05,
///     ..Default::default()
/// };
/// let transform = HeadingTransform::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingSettings {
    /// Mapping from device axes to the body frame whose Y axis is "forward"
    ///
    /// Defaults to [`AxesAlignment::PORTRAIT`], a phone held upright and
    /// looking through the back camera.
    pub alignment: AxesAlignment,
    /// Whether to rescale the quaternion to unit length before use
    ///
    /// Unit samples are unaffected. Slightly off-unit samples would otherwise
    /// produce a skewed, non-orthonormal matrix.
    pub normalise: bool,
    /// Largest accepted deviation of the quaternion norm from 1
    ///
    /// Samples further away are rejected as sensor glitches. Set to 0 to
    /// disable the check.
    pub max_norm_error: f32,
}

impl HeadingSettings {
    /// Settings that trust the sensor completely: no normalisation, no norm
    /// check, portrait alignment.
    pub const UNCHECKED: HeadingSettings = HeadingSettings {
        alignment: AxesAlignment::PORTRAIT,
        normalise: false,
        max_norm_error: 0.0,
    };
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            alignment: AxesAlignment::PORTRAIT,
            normalise: true,
            max_norm_error: 0.1,
        }
    }
}
