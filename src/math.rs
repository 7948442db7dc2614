//! Mathematical utilities for turning rotation-vector quaternions into matrices

use nalgebra::Matrix3;

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Full turn in degrees
pub const FULL_TURN_DEGREES: f32 = 360.0;

/// Builds a rotation matrix from quaternion components.
///
/// Uses the `1 - 2y² - 2z²` form of the quaternion-to-matrix formula, which
/// is only a proper rotation for unit quaternions. No normalisation happens
/// here; callers decide whether to normalise first.
///
/// The matrix maps device coordinates into Earth coordinates (X east,
/// Y north, Z up), so each column is a device axis expressed in the Earth
/// frame.
///
/// # Example
/// ```
/// use sight_compass::math::rotation_matrix_from_quaternion;
/// use nalgebra::Matrix3;
///
/// let matrix = rotation_matrix_from_quaternion(1.0, 0.0, 0.0, 0.0);
/// assert_eq!(matrix, Matrix3::identity());
/// ```
pub fn rotation_matrix_from_quaternion(w: f32, x: f32, y: f32, z: f32) -> Matrix3<f32> {
    let sq_x = 2.0 * x * x;
    let sq_y = 2.0 * y * y;
    let sq_z = 2.0 * z * z;
    let xy = 2.0 * x * y;
    let zw = 2.0 * z * w;
    let xz = 2.0 * x * z;
    let yw = 2.0 * y * w;
    let yz = 2.0 * y * z;
    let xw = 2.0 * x * w;

    Matrix3::new(
        1.0 - sq_y - sq_z,
        xy - zw,
        xz + yw,
        xy + zw,
        1.0 - sq_x - sq_z,
        yz - xw,
        xz - yw,
        yz + xw,
        1.0 - sq_x - sq_y,
    )
}
