//! GPU-ready snapshot of the reconstruction matrices.

use crate::reconstruction_data::ReconstructionData;

/// Camera matrices in the layout the overlay shaders expect.
///
/// Matrices are column-major and single precision.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ReconstructionUniforms {
    /// Identity-padded intrinsic matrix.
    pub matrix_4k: [[f32; 4]; 4],
    /// Pose matrix (world to camera).
    pub matrix_rt: [[f32; 4]; 4],
    /// Camera center in world space.
    pub camera_center: [f32; 3],
    /// Padding for alignment.
    pub _padding: f32,
}

impl From<&ReconstructionData> for ReconstructionUniforms {
    fn from(data: &ReconstructionData) -> Self {
        Self {
            matrix_4k: data.matrix_4k().as_mat4().to_cols_array_2d(),
            matrix_rt: data.matrix_rt().as_mat4().to_cols_array_2d(),
            camera_center: data.camera_center().as_vec3().to_array(),
            _padding: 0.0,
        }
    }
}

impl Default for ReconstructionUniforms {
    fn default() -> Self {
        Self::from(&ReconstructionData::default())
    }
}
