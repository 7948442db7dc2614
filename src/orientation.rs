//! Rotation-vector to orientation transform

use nalgebra::{Matrix3, Rotation3, Vector3};
#[cfg(not(feature = "std"))]
use nalgebra::{ComplexField, RealField};

use crate::axes::{AxesAlignment, remap_matrix};
use crate::compass::Heading;
use crate::error::SampleError;
use crate::math::{RAD_TO_DEG, rotation_matrix_from_quaternion};
use crate::sample::RotationSample;
use crate::types::HeadingSettings;

/// Below this squared horizontal length the forward axis counts as vertical
const GIMBAL_LOCK_THRESHOLD: f32 = 1e-10;

/// Device orientation as azimuth, pitch and roll in radians.
///
/// Angles are relative to the body frame chosen by the axes alignment:
/// - `azimuth` turns clockwise from north around the vertical, `[-π, π]`
/// - `pitch` is positive when the forward axis dips below the horizon, `[-π/2, π/2]`
/// - `roll` tilts around the forward axis, `[-π, π]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    azimuth: f32,
    pitch: f32,
    roll: f32,
}

impl Orientation {
    pub fn new(azimuth: f32, pitch: f32, roll: f32) -> Self {
        Self {
            azimuth,
            pitch,
            roll,
        }
    }

    /// Decomposes a body-to-Earth rotation matrix.
    ///
    /// Column 1 of the matrix is the forward axis: its horizontal direction
    /// gives the azimuth and its vertical component the pitch. When the
    /// forward axis points straight up or down the azimuth is taken from
    /// the body Z axis instead (the top edge of a portrait screen), flipped
    /// when looking up, and roll is reported as 0.
    pub fn from_rotation_matrix(matrix: &Matrix3<f32>) -> Self {
        let pitch = (-matrix[(2, 1)]).clamp(-1.0, 1.0).asin();
        let horizontal = matrix[(0, 1)] * matrix[(0, 1)] + matrix[(1, 1)] * matrix[(1, 1)];

        if horizontal < GIMBAL_LOCK_THRESHOLD {
            let azimuth = if matrix[(2, 1)] < 0.0 {
                matrix[(0, 2)].atan2(matrix[(1, 2)])
            } else {
                (-matrix[(0, 2)]).atan2(-matrix[(1, 2)])
            };
            return Self::new(azimuth, pitch, 0.0);
        }

        Self {
            azimuth: matrix[(0, 1)].atan2(matrix[(1, 1)]),
            pitch,
            roll: (-matrix[(2, 0)]).atan2(matrix[(2, 2)]),
        }
    }

    /// Builds the body-to-Earth rotation matrix for these angles.
    ///
    /// Composition is `Rz(-azimuth) · Rx(-pitch) · Ry(roll)`, the inverse of
    /// [`Orientation::from_rotation_matrix`] away from gimbal lock.
    pub fn to_rotation_matrix(&self) -> Matrix3<f32> {
        let yaw = Rotation3::from_axis_angle(&Vector3::z_axis(), -self.azimuth);
        let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), -self.pitch);
        let roll = Rotation3::from_axis_angle(&Vector3::y_axis(), self.roll);
        (yaw * tilt * roll).into_inner()
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Whether all three angles are finite.
    pub fn is_finite(&self) -> bool {
        self.azimuth.is_finite() && self.pitch.is_finite() && self.roll.is_finite()
    }

    /// Compass heading of the forward axis, north when the azimuth is not finite.
    pub fn heading(&self) -> Heading {
        Heading::from_azimuth(self.azimuth)
    }

    /// Azimuth, pitch and roll in degrees.
    pub fn to_degrees(&self) -> Vector3<f32> {
        Vector3::new(self.azimuth, self.pitch, self.roll) * RAD_TO_DEG
    }
}

/// Computes the portrait orientation of a rotation-vector sample.
///
/// Trusts the sample completely: the quaternion is used as-is, without
/// normalisation. Components large enough to overflow give non-finite
/// angles, which still convert to a heading of north. Use
/// [`HeadingTransform`] for configurable alignment, norm checks and
/// overflow rejection.
///
/// # Example
/// ```
/// use sight_compass::{RotationSample, compute_orientation, to_heading_degrees};
///
/// // Phone flat on a table, screen up, top edge pointing north
/// let sample = RotationSample::new(0.0, 0.0, 0.0, 1.0).unwrap();
/// let heading = to_heading_degrees(&compute_orientation(&sample));
/// assert_eq!(heading.degrees(), 0.0);
/// ```
pub fn compute_orientation(sample: &RotationSample) -> Orientation {
    orientation_from_components(
        sample.w(),
        sample.x(),
        sample.y(),
        sample.z(),
        AxesAlignment::PORTRAIT,
    )
}

fn orientation_from_components(
    w: f32,
    x: f32,
    y: f32,
    z: f32,
    alignment: AxesAlignment,
) -> Orientation {
    let device = rotation_matrix_from_quaternion(w, x, y, z);
    let body = remap_matrix(&device, alignment);
    Orientation::from_rotation_matrix(&body)
}

/// Configured rotation-vector transform.
///
/// Stateless apart from its settings, so one instance can serve any number
/// of threads.
///
/// # Example
/// ```
/// use sight_compass::{HeadingTransform, RotationSample};
///
/// let transform = HeadingTransform::new();
///
/// // Upright in portrait, camera facing east
/// let sample = RotationSample::from_slice(&[0.5, -0.5, -0.5, 0.5]).unwrap();
/// let heading = transform.heading(&sample).unwrap();
/// assert!((heading.degrees() - 90.0).abs() < 1e-3);
///
/// // Far from unit length: rejected instead of producing garbage
/// let glitch = RotationSample::new(0.0, 0.0, 0.0, 2.0).unwrap();
/// assert!(transform.heading(&glitch).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingTransform {
    settings: HeadingSettings,
}

impl HeadingTransform {
    /// Create a transform with default (portrait) settings
    pub fn new() -> Self {
        Self::with_settings(HeadingSettings::default())
    }

    /// Create a transform with specified settings
    pub fn with_settings(settings: HeadingSettings) -> Self {
        Self { settings }
    }

    /// Get current settings
    pub fn settings(&self) -> HeadingSettings {
        self.settings
    }

    /// Update settings
    pub fn set_settings(&mut self, settings: HeadingSettings) {
        self.settings = settings;
    }

    /// Computes the orientation of a sample under the configured alignment.
    ///
    /// # Errors
    /// [`SampleError::NotUnit`] when the norm check is enabled and fails,
    /// [`SampleError::ZeroNorm`] when normalisation is enabled and the
    /// quaternion has no length, [`SampleError::Overflow`] when the
    /// components are too large to produce a finite orientation.
    pub fn compute_orientation(
        &self,
        sample: &RotationSample,
    ) -> Result<Orientation, SampleError> {
        let norm = sample.norm();
        let max_norm_error = self.settings.max_norm_error;

        if max_norm_error > 0.0 && (norm - 1.0).abs() > max_norm_error {
            return Err(SampleError::NotUnit { norm });
        }

        if !norm.is_finite() {
            return Err(SampleError::Overflow);
        }

        let (w, x, y, z) = if self.settings.normalise {
            if norm <= f32::EPSILON {
                return Err(SampleError::ZeroNorm);
            }
            let scale = 1.0 / norm;
            (
                sample.w() * scale,
                sample.x() * scale,
                sample.y() * scale,
                sample.z() * scale,
            )
        } else {
            (sample.w(), sample.x(), sample.y(), sample.z())
        };

        let orientation = orientation_from_components(w, x, y, z, self.settings.alignment);
        if !orientation.is_finite() {
            return Err(SampleError::Overflow);
        }

        Ok(orientation)
    }

    /// Computes the compass heading of a sample.
    pub fn heading(&self, sample: &RotationSample) -> Result<Heading, SampleError> {
        self.compute_orientation(sample).map(|orientation| orientation.heading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::DEG_TO_RAD;
    use nalgebra::UnitQuaternion;

    const EPSILON: f32 = 1e-4;

    /// Sample for a phone held upright in portrait with the camera at `heading` degrees
    fn upright_sample(heading: f32) -> RotationSample {
        let yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -heading * DEG_TO_RAD);
        let stand_up = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 90.0 * DEG_TO_RAD);
        let q = yaw * stand_up;
        RotationSample::new(q.i, q.j, q.k, q.w).unwrap()
    }

    #[test]
    fn test_unrotated_phone_points_north() {
        let sample = RotationSample::new(0.0, 0.0, 0.0, 1.0).unwrap();
        let orientation = compute_orientation(&sample);

        assert_eq!(orientation.heading(), Heading::NORTH);
        // Camera looks straight down
        assert!((orientation.pitch() - 90.0 * DEG_TO_RAD).abs() < EPSILON);
        assert_eq!(orientation.roll(), 0.0);
    }

    #[test]
    fn test_flat_phone_uses_top_edge() {
        // Flat, screen up, rotated so the top edge points east
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -90.0 * DEG_TO_RAD);
        let sample = RotationSample::new(q.i, q.j, q.k, q.w).unwrap();
        let heading = compute_orientation(&sample).heading();

        assert!((heading.degrees() - 90.0).abs() < 1e-3, "got {}", heading);
    }

    #[test]
    fn test_face_down_phone_looks_opposite_top_edge() {
        // Screen down, top edge north: the camera looks at the sky
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 180.0 * DEG_TO_RAD);
        let sample = RotationSample::new(q.i, q.j, q.k, q.w).unwrap();
        let orientation = compute_orientation(&sample);

        assert!((orientation.heading().degrees() - 180.0).abs() < 1e-3);
        assert!((orientation.pitch() + 90.0 * DEG_TO_RAD).abs() < 1e-3);
    }

    #[test]
    fn test_upright_cardinal_directions() {
        for expected in [0.0, 45.0, 90.0, 180.0, 270.0, 315.0] {
            let orientation = compute_orientation(&upright_sample(expected));
            let heading = orientation.heading().degrees();
            let error = (heading - expected).abs().min(360.0 - (heading - expected).abs());

            assert!(error < 1e-3, "Expected {}°, got {}°", expected, heading);
            assert!(orientation.pitch().abs() < EPSILON);
            assert!(orientation.roll().abs() < EPSILON);
        }
    }

    #[test]
    fn test_decomposition_round_trip() {
        let cases = [
            (10.0, 20.0, 30.0),
            (-170.0, -45.0, 5.0),
            (179.0, 60.0, -120.0),
            (-90.0, 0.0, 0.0),
        ];

        for (azimuth, pitch, roll) in cases {
            let original =
                Orientation::new(azimuth * DEG_TO_RAD, pitch * DEG_TO_RAD, roll * DEG_TO_RAD);
            let recovered = Orientation::from_rotation_matrix(&original.to_rotation_matrix());

            assert!(
                (recovered.azimuth() - original.azimuth()).abs() < EPSILON,
                "Azimuth {} recovered as {}",
                original.azimuth(),
                recovered.azimuth()
            );
            assert!((recovered.pitch() - original.pitch()).abs() < EPSILON);
            assert!((recovered.roll() - original.roll()).abs() < EPSILON);
        }
    }

    #[test]
    fn test_flat_alignment_heading() {
        let transform = HeadingTransform::with_settings(HeadingSettings {
            alignment: AxesAlignment::PxPyPz,
            ..Default::default()
        });

        // Flat and turned so the top edge points west
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 90.0 * DEG_TO_RAD);
        let sample = RotationSample::new(q.i, q.j, q.k, q.w).unwrap();
        let heading = transform.heading(&sample).unwrap();

        assert!((heading.degrees() - 270.0).abs() < 1e-3, "got {}", heading);
    }

    #[test]
    fn test_normalisation() {
        let transform = HeadingTransform::new();
        let unit = upright_sample(30.0);
        let scaled = RotationSample::new(
            unit.x() * 1.05,
            unit.y() * 1.05,
            unit.z() * 1.05,
            unit.w() * 1.05,
        )
        .unwrap();

        let expected = transform.heading(&unit).unwrap().degrees();
        let actual = transform.heading(&scaled).unwrap().degrees();
        assert!((expected - actual).abs() < 1e-3);
    }

    #[test]
    fn test_norm_rejection() {
        let transform = HeadingTransform::new();
        let glitch = RotationSample::new(0.0, 0.0, 0.0, 1.5).unwrap();

        assert_eq!(
            transform.compute_orientation(&glitch),
            Err(SampleError::NotUnit { norm: 1.5 })
        );
    }

    #[test]
    fn test_zero_norm() {
        let transform = HeadingTransform::with_settings(HeadingSettings {
            max_norm_error: 0.0,
            ..Default::default()
        });
        let zero = RotationSample::new(0.0, 0.0, 0.0, 0.0).unwrap();

        assert_eq!(transform.heading(&zero), Err(SampleError::ZeroNorm));
    }

    #[test]
    fn test_overflowing_components_are_rejected() {
        let unchecked = HeadingTransform::with_settings(HeadingSettings::UNCHECKED);
        let normalising = HeadingTransform::with_settings(HeadingSettings {
            max_norm_error: 0.0,
            ..Default::default()
        });
        // Every component is finite, their squares are not
        let huge = RotationSample::new(1e20, 1e20, 1e20, 1e20).unwrap();

        assert_eq!(unchecked.compute_orientation(&huge), Err(SampleError::Overflow));
        assert_eq!(normalising.heading(&huge), Err(SampleError::Overflow));
        assert!(matches!(
            HeadingTransform::new().heading(&huge),
            Err(SampleError::NotUnit { .. })
        ));
    }

    #[test]
    fn test_free_function_heading_stays_in_range_on_overflow() {
        let huge = RotationSample::new(1e20, 1e20, 1e20, 1e20).unwrap();
        let orientation = compute_orientation(&huge);

        assert!(!orientation.is_finite());
        assert_eq!(orientation.heading(), Heading::NORTH);
    }

    #[test]
    fn test_unchecked_matches_free_function() {
        let transform = HeadingTransform::with_settings(HeadingSettings::UNCHECKED);
        let sample = RotationSample::new(0.3, -0.2, 0.1, 0.8).unwrap();

        assert_eq!(
            transform.compute_orientation(&sample).unwrap(),
            compute_orientation(&sample)
        );
    }

    #[test]
    fn test_set_settings() {
        let mut transform = HeadingTransform::new();
        transform.set_settings(HeadingSettings::UNCHECKED);
        assert_eq!(transform.settings(), HeadingSettings::UNCHECKED);
    }

    #[test]
    fn test_to_degrees() {
        let orientation = Orientation::new(
            90.0 * DEG_TO_RAD,
            -30.0 * DEG_TO_RAD,
            45.0 * DEG_TO_RAD,
        );
        let degrees = orientation.to_degrees();

        assert!((degrees.x - 90.0).abs() < EPSILON);
        assert!((degrees.y + 30.0).abs() < EPSILON);
        assert!((degrees.z - 45.0).abs() < EPSILON);
    }
}
