//! Matrix helpers for intrinsic and pose matrices.
//!
//! glam stores matrices column-major. Camera libraries usually hand out
//! row-major `(row, col)` data, so the helpers here take and return that
//! layout explicitly.

use glam::{DMat3, DMat4, DVec3};

/// Builds a 3x3 matrix from row-major data.
pub fn mat3_from_rows(rows: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols_array_2d(&rows).transpose()
}

/// Returns the rows of a 3x3 matrix.
pub fn mat3_to_rows(m: &DMat3) -> [[f64; 3]; 3] {
    m.transpose().to_cols_array_2d()
}

/// Builds a 4x4 matrix from row-major data.
pub fn mat4_from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Returns the rows of a 4x4 matrix.
pub fn mat4_to_rows(m: &DMat4) -> [[f64; 4]; 4] {
    m.transpose().to_cols_array_2d()
}

/// Returns element `(row, col)` of a 4x4 matrix.
pub fn element4(m: &DMat4, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}

/// Returns element `(row, col)` of a 3x3 matrix.
pub fn element3(m: &DMat3, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}

/// Pads an intrinsic matrix to 4x4 with the identity.
///
/// The top-left block is `k`, the fourth row and column are `[0, 0, 0, 1]`.
pub fn pad_intrinsics(k: &DMat3) -> DMat4 {
    DMat4::from_mat3(*k)
}

/// Builds a pose matrix from a rotation and a translation.
///
/// The bottom row is always `[0, 0, 0, 1]`.
pub fn pose_matrix(rotation: &DMat3, translation: DVec3) -> DMat4 {
    DMat4::from_cols(
        rotation.x_axis.extend(0.0),
        rotation.y_axis.extend(0.0),
        rotation.z_axis.extend(0.0),
        translation.extend(1.0),
    )
}

/// Returns the rotation block of a pose matrix.
pub fn rotation_block(rt: &DMat4) -> DMat3 {
    DMat3::from_mat4(*rt)
}

/// Returns the translation column (rows 0-2 of column 3) of a pose matrix.
pub fn translation_column(rt: &DMat4) -> DVec3 {
    rt.w_axis.truncate()
}

/// Returns `rt` with its bottom row reset to `[0, 0, 0, 1]`.
pub fn with_affine_bottom_row(rt: &DMat4) -> DMat4 {
    let mut fixed = *rt;
    fixed.x_axis.w = 0.0;
    fixed.y_axis.w = 0.0;
    fixed.z_axis.w = 0.0;
    fixed.w_axis.w = 1.0;
    fixed
}
