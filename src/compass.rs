//! Compass heading values

use core::fmt;

use crate::math::{FULL_TURN_DEGREES, RAD_TO_DEG};
use crate::orientation::Orientation;

/// Compass heading in degrees, clockwise from north.
///
/// Always within `[0, 360)`. Construct it from an azimuth with
/// [`Heading::from_azimuth`] or [`Heading::from_degrees`]; both fold any
/// finite angle into range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Heading(f32);

impl Heading {
    /// Due north, also the value before any sample arrives.
    pub const NORTH: Heading = Heading(0.0);

    /// Heading from an azimuth in radians, as produced by the transform.
    ///
    /// The azimuth is expected in `[-π, π]`; negative values get a full turn
    /// added.
    ///
    /// # Example
    /// ```
    /// use sight_compass::Heading;
    ///
    /// let heading = Heading::from_azimuth(-core::f32::consts::FRAC_PI_2);
    /// assert!((heading.degrees() - 270.0).abs() < 1e-4);
    /// ```
    pub fn from_azimuth(azimuth: f32) -> Self {
        Self::from_degrees(azimuth * RAD_TO_DEG)
    }

    /// Heading from any angle in degrees.
    ///
    /// Non-finite angles carry no direction and read as north.
    pub fn from_degrees(degrees: f32) -> Self {
        if !degrees.is_finite() {
            return Self::NORTH;
        }

        let mut degrees = degrees % FULL_TURN_DEGREES;
        if degrees < 0.0 {
            degrees += FULL_TURN_DEGREES;
        }

        // Tiny negative angles round up to a full turn, and -0.0 must not leak
        if degrees >= FULL_TURN_DEGREES || degrees == 0.0 {
            return Self::NORTH;
        }

        Heading(degrees)
    }

    /// Degrees clockwise from north, in `[0, 360)`.
    pub fn degrees(self) -> f32 {
        self.0
    }

    /// Signed heading in `(-180, 180]`, handy for steering towards north.
    pub fn signed_degrees(self) -> f32 {
        if self.0 > 180.0 {
            self.0 - FULL_TURN_DEGREES
        } else {
            self.0
        }
    }
}

impl From<Heading> for f32 {
    fn from(heading: Heading) -> Self {
        heading.0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*}°", precision, self.0)
        } else {
            write!(f, "{}°", self.0)
        }
    }
}

/// Converts an orientation into a compass heading.
///
/// The azimuth is converted from radians to degrees and a full turn is added
/// when it is negative.
///
/// # Example
/// ```
/// use sight_compass::{Orientation, to_heading_degrees};
///
/// let orientation = Orientation::new(core::f32::consts::PI, 0.0, 0.0);
/// let heading = to_heading_degrees(&orientation);
/// assert!((heading.degrees() - 180.0).abs() < 1e-4);
/// ```
pub fn to_heading_degrees(orientation: &Orientation) -> Heading {
    Heading::from_azimuth(orientation.azimuth())
}
