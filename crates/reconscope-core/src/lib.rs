//! Core types for reconscope.
//!
//! This crate provides the building blocks the reconstruction adapter is made of:
//! - [`Camera`] trait and the [`PerspectiveCamera`] model
//! - [`ImageData`] rasters with named per-point arrays
//! - [`Transform`] for chaining coordinate frames
//! - Configuration [`Options`] and the crate error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel and tuple indices move between u32 and usize
#![allow(clippy::cast_possible_truncation)]

pub mod camera;
pub mod error;
pub mod image_data;
pub mod matrix;
pub mod options;
pub mod transform;

pub use camera::{Camera, CameraIntrinsics, PerspectiveCamera};
pub use error::{ReconstructionError, Result};
pub use image_data::{ImageData, ImageOrigin, PointArray};
pub use options::Options;
pub use transform::Transform;

// Re-export glam types for convenience
pub use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, IVec2, UVec2};
