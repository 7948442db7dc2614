#![cfg_attr(not(feature = "std"), no_std)]

//! Sight Compass - compass heading for a camera-overlay app
//!
//! Turns the fused rotation-vector sensor of a phone into the compass heading
//! of its back camera, for a phone held upright in portrait orientation.
//!
//! The rotation vector is a unit quaternion rotating device coordinates into
//! an Earth frame with X east, Y north and Z up. It is converted to a rotation
//! matrix, the matrix axes are remapped from the device's natural frame to a
//! portrait body frame (Y out of the camera, Z toward the top edge), and the
//! azimuth of the camera axis is read off as the heading.
//!
//! # Features
//!
//! - Pure, allocation-free orientation transform
//! - Any of the 24 axis alignments, portrait by default
//! - Optional quaternion normalisation and glitch rejection
//! - Thread-safe latest-value stream with synchronous observers (`std`)
//! - `#![no_std]` compatible transform when the `std` feature is disabled
//!
//! # Quick Start
//!
//! ```rust
//! use sight_compass::{HeadingStream, SensorKind};
//!
//! let stream = HeadingStream::new();
//! stream.subscribe(|heading| println!("Heading: {:.0}", heading));
//!
//! // Called from the platform sensor callback
//! let values: [f32; 5] = [0.5, -0.5, -0.5, 0.5, 0.1];
//! stream.on_sensor_sample(SensorKind::RotationVector, Some(&values));
//!
//! assert!((stream.latest().degrees() - 90.0).abs() < 1e-3);
//! ```
//!
//! The pure transform can be used on its own:
//!
//! ```rust
//! use sight_compass::{RotationSample, compute_orientation, to_heading_degrees};
//!
//! let sample = RotationSample::from_slice(&[0.5, -0.5, -0.5, 0.5]).unwrap();
//! let orientation = compute_orientation(&sample);
//! let heading = to_heading_degrees(&orientation);
//!
//! assert!((heading.degrees() - 90.0).abs() < 1e-3);
//! ```

pub mod axes;
pub mod compass;
mod error;
pub mod math;
mod orientation;
mod sample;
#[cfg(feature = "std")]
pub mod stream;
mod types;

// Re-export all public types and functions
pub use axes::{AxesAlignment, axes_swap, remap_matrix};
pub use compass::{Heading, to_heading_degrees};
pub use error::SampleError;
pub use math::{DEG_TO_RAD, RAD_TO_DEG};
pub use orientation::{HeadingTransform, Orientation, compute_orientation};
pub use sample::{RotationSample, SensorKind};
#[cfg(feature = "std")]
pub use stream::{HeadingStream, SubscriptionId};
pub use types::*;
