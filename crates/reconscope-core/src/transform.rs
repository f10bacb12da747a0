//! Linear coordinate transforms.

use glam::{DMat3, DMat4, DVec3};

/// A linear transform backed by a 4x4 matrix.
///
/// Points are mapped through the upper 3x3 block plus the translation column.
/// Vectors are mapped through the upper 3x3 block only. The bottom row of the
/// matrix does not take part in either mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix: DMat4::IDENTITY,
        }
    }
}

impl Transform {
    /// Creates a new identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a transform from a 4x4 matrix.
    #[must_use]
    pub fn from_matrix(matrix: DMat4) -> Self {
        Self { matrix }
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Replaces the underlying matrix.
    pub fn set_matrix(&mut self, matrix: DMat4) {
        self.matrix = matrix;
    }

    /// Returns the linear (upper 3x3) part.
    #[must_use]
    pub fn linear(&self) -> DMat3 {
        DMat3::from_mat4(self.matrix)
    }

    /// Returns the translation column.
    #[must_use]
    pub fn translation(&self) -> DVec3 {
        self.matrix.w_axis.truncate()
    }

    /// Transforms a point, including translation.
    #[must_use]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.linear() * point + self.translation()
    }

    /// Transforms a vector: linear part only, no translation.
    #[must_use]
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.linear() * vector
    }

    /// Returns the transform that applies `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Transform) -> Transform {
        Transform::from_matrix(next.matrix * self.matrix)
    }

    /// Returns the inverse transform.
    ///
    /// The result is non-finite if the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Transform {
        Transform::from_matrix(self.matrix.inverse())
    }
}

impl From<DMat4> for Transform {
    fn from(matrix: DMat4) -> Self {
        Self::from_matrix(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(t.transform_point(p), p);
        assert_eq!(t.transform_vector(p), p);
    }

    #[test]
    fn test_point_vs_vector() {
        let t = Transform::from_matrix(DMat4::from_translation(DVec3::new(10.0, 0.0, 0.0)));
        let p = DVec3::new(1.0, 1.0, 1.0);
        assert_eq!(t.transform_point(p), DVec3::new(11.0, 1.0, 1.0));
        assert_eq!(t.transform_vector(p), p);
    }

    #[test]
    fn test_bottom_row_is_ignored() {
        let mut m = DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0));
        m.x_axis.w = 3.0;
        m.w_axis.w = 7.0;
        let t = Transform::from_matrix(m);
        assert_eq!(t.transform_point(DVec3::ONE), DVec3::new(1.0, 1.0, 6.0));
    }

    #[test]
    fn test_composition_order() {
        let rotate = Transform::from_matrix(DMat4::from_rotation_z(std::f64::consts::FRAC_PI_2));
        let shift = Transform::from_matrix(DMat4::from_translation(DVec3::X));

        // Rotate X onto Y, then shift along X
        let combined = rotate.then(&shift);
        assert!(approx(combined.transform_point(DVec3::X), DVec3::new(1.0, 1.0, 0.0)));

        // Shift first, then rotate
        let combined = shift.then(&rotate);
        assert!(approx(combined.transform_point(DVec3::X), DVec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_inverse() {
        let t = Transform::from_matrix(
            DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0)) * DMat4::from_rotation_y(0.4),
        );
        let p = DVec3::new(-3.0, 0.5, 8.0);
        assert!(approx(t.inverse().transform_point(t.transform_point(p)), p));
    }
}
