//! Camera geometry adapter for a single reconstruction view.
//!
//! [`ReconstructionData`] holds the intrinsic matrix K, its identity-padded
//! 4x4 form, the pose matrix RT and the color image of one camera. The
//! world-to-camera and camera-to-image transforms are derived from the
//! matrices each time they are requested.

use std::sync::Arc;

use glam::{DMat3, DMat4, DVec2, DVec3, IVec2, UVec2};
use image::DynamicImage;
use reconscope_core::camera::{Camera, PerspectiveCamera};
use reconscope_core::error::{ReconstructionError, Result};
use reconscope_core::image_data::{ImageData, ImageOrigin};
use reconscope_core::matrix::{
    pad_intrinsics, pose_matrix, rotation_block, translation_column, with_affine_bottom_row,
};
use reconscope_core::options::Options;
use reconscope_core::transform::Transform;

/// Extracts the intrinsic matrix K and the pose matrix RT from a camera.
fn extract_camera_data(camera: &dyn Camera) -> Result<(DMat3, DMat4)> {
    let perspective = camera
        .as_any()
        .downcast_ref::<PerspectiveCamera>()
        .ok_or_else(|| ReconstructionError::NotPerspective(camera.type_name().to_string()))?;

    let k = perspective.calibration_matrix();
    let rt = pose_matrix(&perspective.rotation_matrix(), perspective.translation());
    Ok((k, rt))
}

/// Camera matrices and color image of one view of a reconstruction.
#[derive(Debug, Clone)]
pub struct ReconstructionData {
    image: Option<Arc<ImageData>>,
    matrix_k: DMat3,
    matrix_4k: DMat4,
    matrix_rt: DMat4,
    options: Options,
}

impl Default for ReconstructionData {
    fn default() -> Self {
        Self {
            image: None,
            matrix_k: DMat3::IDENTITY,
            matrix_4k: DMat4::IDENTITY,
            matrix_rt: DMat4::IDENTITY,
            options: Options::default(),
        }
    }
}

impl ReconstructionData {
    /// Creates reconstruction data from a decoded image and a camera.
    ///
    /// Fails with [`ReconstructionError::NotPerspective`] if the camera is not
    /// a [`PerspectiveCamera`].
    pub fn new(image: &DynamicImage, camera: &dyn Camera) -> Result<Self> {
        Self::with_options(image, camera, Options::default())
    }

    /// Creates reconstruction data with custom options.
    pub fn with_options(image: &DynamicImage, camera: &dyn Camera, options: Options) -> Result<Self> {
        let data = ImageData::from_dynamic_image(image, &options.color_array_name);
        Self::from_image_data_with_options(Arc::new(data), camera, options)
    }

    /// Creates reconstruction data from an already converted image.
    pub fn from_image_data(image: Arc<ImageData>, camera: &dyn Camera) -> Result<Self> {
        Self::from_image_data_with_options(image, camera, Options::default())
    }

    /// Creates reconstruction data from an already converted image with custom options.
    pub fn from_image_data_with_options(
        image: Arc<ImageData>,
        camera: &dyn Camera,
        options: Options,
    ) -> Result<Self> {
        let (k, rt) = extract_camera_data(camera)?;

        let mut data = Self {
            image: Some(image),
            options,
            ..Self::default()
        };
        data.set_matrix_k(k);
        data.set_matrix_rt(rt);
        Ok(data)
    }

    /// Gets the options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Updates the options.
    pub fn set_options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// Gets the image, if one is set.
    #[must_use]
    pub fn image(&self) -> Option<&Arc<ImageData>> {
        self.image.as_ref()
    }

    /// Gets the image dimensions (width, height), if an image is set.
    #[must_use]
    pub fn image_dimensions(&self) -> Option<UVec2> {
        self.image.as_ref().map(|image| image.dimensions())
    }

    /// Gets the 3x3 intrinsic matrix K.
    #[must_use]
    pub fn matrix_k(&self) -> DMat3 {
        self.matrix_k
    }

    /// Gets the 4x4 identity-padded intrinsic matrix.
    #[must_use]
    pub fn matrix_4k(&self) -> DMat4 {
        self.matrix_4k
    }

    /// Gets the 4x4 pose matrix RT.
    #[must_use]
    pub fn matrix_rt(&self) -> DMat4 {
        self.matrix_rt
    }

    /// Replaces the image. The previous image is released.
    pub fn set_image(&mut self, image: Arc<ImageData>) -> &mut Self {
        self.image = Some(image);
        self
    }

    /// Replaces the intrinsic matrix and recomputes its 4x4 form.
    pub fn set_matrix_k(&mut self, matrix: DMat3) -> &mut Self {
        self.matrix_k = matrix;
        self.matrix_4k = pad_intrinsics(&matrix);
        log::debug!("intrinsic matrix set to {:?}", self.matrix_k);
        self
    }

    /// Replaces the pose matrix.
    ///
    /// The bottom row is reset to `[0, 0, 0, 1]`.
    pub fn set_matrix_rt(&mut self, matrix: DMat4) -> &mut Self {
        self.matrix_rt = with_affine_bottom_row(&matrix);
        log::debug!("pose matrix set to {:?}", self.matrix_rt);
        self
    }

    /// Returns the world-to-camera transform.
    #[must_use]
    pub fn world_to_camera_transform(&self) -> Transform {
        Transform::from_matrix(self.matrix_rt)
    }

    /// Returns the camera-to-image transform.
    #[must_use]
    pub fn camera_to_image_transform(&self) -> Transform {
        Transform::from_matrix(self.matrix_4k)
    }

    /// Returns the RGB color at `pixel`.
    ///
    /// The query row is flipped against the bottom-up image storage unless
    /// [`Options::pixel_origin`] is [`ImageOrigin::LowerLeft`]. Returns `None`
    /// and logs if there is no image, no color array or the pixel is outside
    /// the image.
    #[must_use]
    pub fn color_value(&self, pixel: IVec2) -> Option<DVec3> {
        let Some(image) = self.image.as_deref() else {
            log::error!("Error, no image set");
            return None;
        };

        let Some(color) = image.color_array() else {
            log::error!("Error, no '{}' array exists", self.options.color_array_name);
            return None;
        };

        let id = u32::try_from(pixel.x)
            .ok()
            .zip(u32::try_from(pixel.y).ok())
            .and_then(|(x, y)| {
                let row = match self.options.pixel_origin {
                    ImageOrigin::UpperLeft => image.height().checked_sub(y + 1)?,
                    ImageOrigin::LowerLeft => y,
                };
                image.compute_point_id(x, row)
            });

        let Some(id) = id else {
            log::warn!(
                "pixel ({}, {}) is outside the {}x{} image",
                pixel.x,
                pixel.y,
                image.width(),
                image.height()
            );
            return None;
        };

        color.tuple3(id)
    }

    /// Returns the camera center in world space, `-R^T * T`.
    #[must_use]
    pub fn camera_center(&self) -> DVec3 {
        let rotation = rotation_block(&self.matrix_rt);
        let translation = translation_column(&self.matrix_rt);
        -(rotation.transpose() * translation)
    }

    /// Projects a world point to sub-pixel image coordinates.
    ///
    /// Points at zero depth yield non-finite coordinates.
    #[must_use]
    pub fn project_world_to_image(&self, world: DVec3) -> DVec2 {
        let camera = self.world_to_camera_transform().transform_point(world);
        let image = self.camera_to_image_transform().transform_vector(camera);
        image.truncate() / image.z
    }

    /// Projects a world point to the nearest integer pixel.
    ///
    /// Non-finite projections saturate instead of panicking.
    #[must_use]
    pub fn transform_world_to_image_position(&self, world: DVec3) -> IVec2 {
        let image = self.project_world_to_image(world);
        IVec2::new(image.x.round() as i32, image.y.round() as i32)
    }
}
