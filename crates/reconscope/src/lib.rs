//! reconscope: camera geometry for visualizing photogrammetric reconstructions.
//!
//! A [`ReconstructionData`] takes a [`PerspectiveCamera`] and its image and
//! exposes the matrices and coordinate transforms a viewer needs to draw
//! overlays: the intrinsic matrix K (3x3 and identity-padded 4x4), the pose
//! matrix RT, the camera center, per-pixel colors and world-to-pixel projection.
//!
//! # Quick Start
//!
//! ```no_run
//! use reconscope::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let image = image::open("frame0001.png")?;
//!     let camera = PerspectiveCamera::look_at(
//!         DVec3::new(0.0, 0.0, -10.0),
//!         DVec3::ZERO,
//!         DVec3::Y,
//!         CameraIntrinsics::new(1000.0, DVec2::new(640.0, 360.0)),
//!     );
//!
//!     let data = ReconstructionData::new(&image, &camera)?;
//!     let pixel = data.transform_world_to_image_position(DVec3::ZERO);
//!     let color = data.color_value(pixel);
//!     println!("origin projects to {pixel} with color {color:?}");
//!
//!     Ok(())
//! }
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel coordinates are rounded from f64
#![allow(clippy::cast_possible_truncation)]

mod init;
pub mod reconstruction_data;
pub mod uniforms;

pub use init::{init_logging, init_logging_with_filter};
pub use reconstruction_data::ReconstructionData;
pub use uniforms::ReconstructionUniforms;

// Re-export core types
pub use reconscope_core::{
    camera::{Camera, CameraIntrinsics, PerspectiveCamera},
    error::{ReconstructionError, Result},
    image_data::{ImageData, ImageOrigin, PointArray},
    options::Options,
    transform::Transform,
    DMat3, DMat4, DQuat, DVec2, DVec3, IVec2, UVec2,
};
