//! Raw rotation-vector samples as delivered by the platform sensor layer

use nalgebra::Quaternion;
#[cfg(not(feature = "std"))]
use nalgebra::ComplexField;

use crate::error::SampleError;

/// Number of quaternion components at the start of a rotation vector.
pub const QUATERNION_COMPONENTS: usize = 4;

/// Kind of sensor an event came from.
///
/// Only [`SensorKind::RotationVector`] drives the compass. The fused
/// rotation vector is referenced to magnetic north, while the game rotation
/// vector has an arbitrary yaw origin and is useless for a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Fused rotation vector referenced to magnetic north
    RotationVector,
    /// Rotation vector without magnetometer (arbitrary yaw origin)
    GameRotationVector,
    /// Rotation vector from accelerometer and magnetometer only
    GeomagneticRotationVector,
    /// Raw accelerometer
    Accelerometer,
    /// Raw magnetometer
    MagneticField,
    /// Raw gyroscope
    Gyroscope,
    /// Any other platform sensor type code
    Other(i32),
}

impl SensorKind {
    /// Platform sensor type code for this kind.
    pub fn type_code(self) -> i32 {
        match self {
            SensorKind::Accelerometer => 1,
            SensorKind::MagneticField => 2,
            SensorKind::Gyroscope => 4,
            SensorKind::RotationVector => 11,
            SensorKind::GameRotationVector => 15,
            SensorKind::GeomagneticRotationVector => 20,
            SensorKind::Other(code) => code,
        }
    }

    /// Whether this event comes from the fused rotation vector.
    ///
    /// Compares type codes, so `Other(11)` counts as well.
    pub fn is_rotation_vector(self) -> bool {
        self.type_code() == SensorKind::RotationVector.type_code()
    }
}

impl From<i32> for SensorKind {
    fn from(code: i32) -> Self {
        match code {
            1 => SensorKind::Accelerometer,
            2 => SensorKind::MagneticField,
            4 => SensorKind::Gyroscope,
            11 => SensorKind::RotationVector,
            15 => SensorKind::GameRotationVector,
            20 => SensorKind::GeomagneticRotationVector,
            other => SensorKind::Other(other),
        }
    }
}

/// One rotation-vector reading.
///
/// The first four components are the `x, y, z, w` parts of a quaternion
/// rotating device coordinates into the Earth frame (X east, Y north, Z up).
/// An optional fifth component carries the estimated heading accuracy in
/// radians.
///
/// # Example
/// ```
/// use sight_compass::RotationSample;
///
/// let sample = RotationSample::from_slice(&[0.0, 0.0, 0.0, 1.0, 0.05]).unwrap();
/// assert_eq!(sample.w(), 1.0);
/// assert_eq!(sample.heading_accuracy(), Some(0.05));
///
/// assert!(RotationSample::from_slice(&[0.0, 0.0, 1.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSample {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
    heading_accuracy: Option<f32>,
}

impl RotationSample {
    /// Create a sample from quaternion components.
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Result<Self, SampleError> {
        Self::from_slice(&[x, y, z, w])
    }

    /// Parse a raw sensor value array.
    ///
    /// Rejects arrays shorter than four components and non-finite quaternion
    /// components. A missing, negative or non-finite accuracy component is
    /// treated as "unavailable".
    pub fn from_slice(values: &[f32]) -> Result<Self, SampleError> {
        if values.len() < QUATERNION_COMPONENTS {
            return Err(SampleError::TooShort { len: values.len() });
        }

        if let Some(index) = values[..QUATERNION_COMPONENTS]
            .iter()
            .position(|value| !value.is_finite())
        {
            return Err(SampleError::NonFinite { index });
        }

        let heading_accuracy = values
            .get(QUATERNION_COMPONENTS)
            .copied()
            .filter(|accuracy| accuracy.is_finite() && *accuracy >= 0.0);

        Ok(Self {
            x: values[0],
            y: values[1],
            z: values[2],
            w: values[3],
            heading_accuracy,
        })
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn w(&self) -> f32 {
        self.w
    }

    /// Estimated heading accuracy in radians, when the sensor reports one.
    pub fn heading_accuracy(&self) -> Option<f32> {
        self.heading_accuracy
    }

    /// Quaternion as stored, not normalised.
    pub fn quaternion(&self) -> Quaternion<f32> {
        Quaternion::new(self.w, self.x, self.y, self.z)
    }

    /// Euclidean norm of the quaternion part.
    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_components() {
        let sample = RotationSample::from_slice(&[0.1, 0.2, 0.3, 0.9]).unwrap();
        assert_eq!(sample.x(), 0.1);
        assert_eq!(sample.y(), 0.2);
        assert_eq!(sample.z(), 0.3);
        assert_eq!(sample.w(), 0.9);
        assert_eq!(sample.heading_accuracy(), None);
    }

    #[test]
    fn test_accuracy_component() {
        let sample = RotationSample::from_slice(&[0.0, 0.0, 0.0, 1.0, 0.2]).unwrap();
        assert_eq!(sample.heading_accuracy(), Some(0.2));

        // Platforms report -1 when no estimate exists
        let sample = RotationSample::from_slice(&[0.0, 0.0, 0.0, 1.0, -1.0]).unwrap();
        assert_eq!(sample.heading_accuracy(), None);

        let sample = RotationSample::from_slice(&[0.0, 0.0, 0.0, 1.0, f32::NAN]).unwrap();
        assert_eq!(sample.heading_accuracy(), None);
    }

    #[test]
    fn test_rejects_short_arrays() {
        assert_eq!(
            RotationSample::from_slice(&[]),
            Err(SampleError::TooShort { len: 0 })
        );
        assert_eq!(
            RotationSample::from_slice(&[0.0, 0.0, 1.0]),
            Err(SampleError::TooShort { len: 3 })
        );
    }

    #[test]
    fn test_rejects_non_finite_components() {
        assert_eq!(
            RotationSample::from_slice(&[0.0, f32::NAN, 0.0, 1.0]),
            Err(SampleError::NonFinite { index: 1 })
        );
        assert_eq!(
            RotationSample::new(0.0, 0.0, 0.0, f32::INFINITY),
            Err(SampleError::NonFinite { index: 3 })
        );
    }

    #[test]
    fn test_norm_and_quaternion() {
        let sample = RotationSample::new(0.0, 0.0, 0.6, 0.8).unwrap();
        assert!((sample.norm() - 1.0).abs() < 1e-6);

        let q = sample.quaternion();
        assert_eq!(q.w, 0.8);
        assert_eq!(q.k, 0.6);
    }

    #[test]
    fn test_is_rotation_vector_by_code() {
        assert!(SensorKind::RotationVector.is_rotation_vector());
        assert!(SensorKind::Other(11).is_rotation_vector());
        assert!(!SensorKind::GameRotationVector.is_rotation_vector());
        assert!(!SensorKind::Other(15).is_rotation_vector());
    }

    #[test]
    fn test_sensor_kind_codes() {
        assert_eq!(SensorKind::from(11), SensorKind::RotationVector);
        assert_eq!(SensorKind::from(15), SensorKind::GameRotationVector);
        assert_eq!(SensorKind::from(99), SensorKind::Other(99));

        for kind in [
            SensorKind::Accelerometer,
            SensorKind::MagneticField,
            SensorKind::Gyroscope,
            SensorKind::RotationVector,
            SensorKind::GameRotationVector,
            SensorKind::GeomagneticRotationVector,
            SensorKind::Other(42),
        ] {
            assert_eq!(SensorKind::from(kind.type_code()), kind);
        }
    }
}
