//! Errors raised while validating rotation-vector samples

use thiserror::Error;

/// Reasons a rotation-vector sample cannot be turned into a heading.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    /// Fewer than the four quaternion components.
    #[error("rotation vector too short: {len} components, need at least 4")]
    TooShort {
        /// Number of components received.
        len: usize,
    },

    /// A quaternion component is NaN or infinite.
    #[error("rotation vector component {index} is not finite")]
    NonFinite {
        /// Position of the offending component.
        index: usize,
    },

    /// Quaternion norm is too far from 1 to be a sensor reading.
    #[error("rotation vector is not a unit quaternion: norm {norm}")]
    NotUnit {
        /// Norm of the quaternion.
        norm: f32,
    },

    /// Quaternion has zero length and cannot be normalised.
    #[error("rotation vector has zero norm")]
    ZeroNorm,

    /// Components are finite but too large for the orientation math.
    #[error("rotation vector overflows the orientation computation")]
    Overflow,
}
