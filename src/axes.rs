//! Device-to-body axes remapping
//!
//! The rotation-vector sensor reports orientation relative to the device's
//! natural frame: x to the right, y toward the top edge and z out of the
//! screen. A compass held up in portrait mode cares about where the back
//! camera points instead, so the rotation matrix is re-expressed in a body
//! frame where y runs out of the camera and z toward the top edge.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use sight_compass::{AxesAlignment, axes_swap};
//!
//! // Out of the screen in device coordinates
//! let screen_normal = Vector3::new(0.0, 0.0, 1.0);
//!
//! // In the portrait body frame that is straight back, opposite the camera
//! let body = axes_swap(screen_normal, AxesAlignment::PORTRAIT);
//! assert_eq!(body, Vector3::new(0.0, -1.0, 0.0));
//! ```

use nalgebra::{Matrix3, RowVector3, Vector3};

/// Axes alignment describing the body axes in terms of the device axes.
///
/// The three letter-pairs give the source of body X, Y and Z respectively.
/// `P`/`N` is the sign and `x`/`y`/`z` the device axis, so `PxNzPy` reads:
/// - Body X = +Device X
/// - Body Y = -Device Z
/// - Body Z = +Device Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxesAlignment {
    /// +X+Y+Z (no remapping, phone used flat)
    #[default]
    PxPyPz,
    /// +X-Z+Y (portrait, camera forward)
    PxNzPy,
    /// +X-Y-Z
    PxNyNz,
    /// +X+Z-Y
    PxPzNy,
    /// -X+Y-Z
    NxPyNz,
    /// -X+Z+Y
    NxPzPy,
    /// -X-Y+Z
    NxNyPz,
    /// -X-Z-Y
    NxNzNy,
    /// +Y-X+Z
    PyNxPz,
    /// +Y-Z-X
    PyNzNx,
    /// +Y+X-Z
    PyPxNz,
    /// +Y+Z+X
    PyPzPx,
    /// -Y+X+Z
    NyPxPz,
    /// -Y-Z+X
    NyNzPx,
    /// -Y-X-Z
    NyNxNz,
    /// -Y+Z-X
    NyPzNx,
    /// +Z+Y-X
    PzPyNx,
    /// +Z+X+Y
    PzPxPy,
    /// +Z-Y+X
    PzNyPx,
    /// +Z-X-Y
    PzNxNy,
    /// -Z+Y+X
    NzPyPx,
    /// -Z-X+Y
    NzNxPy,
    /// -Z-Y-X
    NzNyNx,
    /// -Z+X-Y
    NzPxNy,
}

impl AxesAlignment {
    /// Phone held upright in portrait, looking through the back camera.
    pub const PORTRAIT: AxesAlignment = AxesAlignment::PxNzPy;

    /// Every alignment, identity first.
    pub const ALL: [AxesAlignment; 24] = [
        AxesAlignment::PxPyPz,
        AxesAlignment::PxNzPy,
        AxesAlignment::PxNyNz,
        AxesAlignment::PxPzNy,
        AxesAlignment::NxPyNz,
        AxesAlignment::NxPzPy,
        AxesAlignment::NxNyPz,
        AxesAlignment::NxNzNy,
        AxesAlignment::PyNxPz,
        AxesAlignment::PyNzNx,
        AxesAlignment::PyPxNz,
        AxesAlignment::PyPzPx,
        AxesAlignment::NyPxPz,
        AxesAlignment::NyNzPx,
        AxesAlignment::NyNxNz,
        AxesAlignment::NyPzNx,
        AxesAlignment::PzPyNx,
        AxesAlignment::PzPxPy,
        AxesAlignment::PzNyPx,
        AxesAlignment::PzNxNy,
        AxesAlignment::NzPyPx,
        AxesAlignment::NzNxPy,
        AxesAlignment::NzNyNx,
        AxesAlignment::NzPxNy,
    ];
}

/// Swaps device axes into body axes.
///
/// # Arguments
/// * `device` - Vector in device coordinates
/// * `alignment` - Axes alignment describing the body frame
///
/// # Returns
/// The same vector in body coordinates
#[inline]
pub fn axes_swap(device: Vector3<f32>, alignment: AxesAlignment) -> Vector3<f32> {
    let [x, y, z] = swap_components(device.x, device.y, device.z, alignment);
    Vector3::new(x, y, z)
}

/// Re-expresses a device-to-Earth rotation matrix as body-to-Earth.
///
/// Every row is swapped like a vector, which permutes (and negates) the
/// matrix columns: column `i` of the result is the body axis `i` expressed
/// in Earth coordinates. This is a relabelling of axes, no trigonometry is
/// involved, so the result is exactly orthonormal when the input is.
///
/// # Example
/// ```
/// use nalgebra::Matrix3;
/// use sight_compass::{AxesAlignment, remap_matrix};
///
/// let remapped = remap_matrix(&Matrix3::identity(), AxesAlignment::PORTRAIT);
///
/// // Flat on a table the camera looks straight down
/// assert_eq!(remapped.column(1)[2], -1.0);
/// ```
pub fn remap_matrix(matrix: &Matrix3<f32>, alignment: AxesAlignment) -> Matrix3<f32> {
    let mut remapped = Matrix3::zeros();
    for (index, row) in matrix.row_iter().enumerate() {
        let [x, y, z] = swap_components(row[0], row[1], row[2], alignment);
        remapped.set_row(index, &RowVector3::new(x, y, z));
    }
    remapped
}

#[inline]
fn swap_components(x: f32, y: f32, z: f32, alignment: AxesAlignment) -> [f32; 3] {
    match alignment {
        AxesAlignment::PxPyPz => [x, y, z],
        AxesAlignment::PxNzPy => [x, -z, y],
        AxesAlignment::PxNyNz => [x, -y, -z],
        AxesAlignment::PxPzNy => [x, z, -y],
        AxesAlignment::NxPyNz => [-x, y, -z],
        AxesAlignment::NxPzPy => [-x, z, y],
        AxesAlignment::NxNyPz => [-x, -y, z],
        AxesAlignment::NxNzNy => [-x, -z, -y],
        AxesAlignment::PyNxPz => [y, -x, z],
        AxesAlignment::PyNzNx => [y, -z, -x],
        AxesAlignment::PyPxNz => [y, x, -z],
        AxesAlignment::PyPzPx => [y, z, x],
        AxesAlignment::NyPxPz => [-y, x, z],
        AxesAlignment::NyNzPx => [-y, -z, x],
        AxesAlignment::NyNxNz => [-y, -x, -z],
        AxesAlignment::NyPzNx => [-y, z, -x],
        AxesAlignment::PzPyNx => [z, y, -x],
        AxesAlignment::PzPxPy => [z, x, y],
        AxesAlignment::PzNyPx => [z, -y, x],
        AxesAlignment::PzNxNy => [z, -x, -y],
        AxesAlignment::NzPyPx => [-z, y, x],
        AxesAlignment::NzNxPy => [-z, -x, y],
        AxesAlignment::NzNyNx => [-z, -y, -x],
        AxesAlignment::NzPxNy => [-z, x, -y],
    }
}
