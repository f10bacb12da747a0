//! Camera models (intrinsics and pose).
//!
//! Cameras follow the computer-vision convention: the camera looks down +Z,
//! +X points right and +Y points down in the image.

use std::any::Any;

use glam::{DMat3, DMat4, DQuat, DVec2, DVec3};

use crate::matrix::{element3, pose_matrix};

/// A camera model that can be handed to a reconstruction adapter.
///
/// Only [`PerspectiveCamera`] carries the intrinsics and pose the adapter
/// needs; other models are rejected at construction time.
pub trait Camera: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the type name of this camera model (e.g., "`PerspectiveCamera`").
    fn type_name(&self) -> &'static str;
}

/// Camera intrinsics parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length in pixels along x.
    pub focal_length: f64,
    /// Principal point in pixels.
    pub principal_point: DVec2,
    /// Ratio of the x focal length to the y focal length.
    pub aspect_ratio: f64,
    /// Skew between the image axes.
    pub skew: f64,
}

impl CameraIntrinsics {
    /// Creates intrinsics with square pixels and no skew.
    pub fn new(focal_length: f64, principal_point: DVec2) -> Self {
        Self {
            focal_length,
            principal_point,
            aspect_ratio: 1.0,
            skew: 0.0,
        }
    }

    /// Sets the aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Sets the skew.
    #[must_use]
    pub fn with_skew(mut self, skew: f64) -> Self {
        self.skew = skew;
        self
    }

    /// Recovers intrinsics from an upper-triangular calibration matrix.
    pub fn from_matrix(k: &DMat3) -> Self {
        let focal_length = element3(k, 0, 0);
        Self {
            focal_length,
            principal_point: DVec2::new(element3(k, 0, 2), element3(k, 1, 2)),
            aspect_ratio: focal_length / element3(k, 1, 1),
            skew: element3(k, 0, 1),
        }
    }

    /// Returns the calibration matrix K.
    ///
    /// ```text
    /// [ f  s       cx ]
    /// [ 0  f / a   cy ]
    /// [ 0  0       1  ]
    /// ```
    pub fn as_matrix(&self) -> DMat3 {
        DMat3::from_cols(
            DVec3::new(self.focal_length, 0.0, 0.0),
            DVec3::new(self.skew, self.focal_length / self.aspect_ratio, 0.0),
            self.principal_point.extend(1.0),
        )
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self::new(1.0, DVec2::ZERO)
    }
}

/// A pinhole camera with a pose in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Camera center in world space.
    pub center: DVec3,
    /// Rotation from world to camera coordinates.
    pub rotation: DQuat,
    /// Intrinsic parameters.
    pub intrinsics: CameraIntrinsics,
}

impl PerspectiveCamera {
    /// Creates a camera from its center, world-to-camera rotation and intrinsics.
    pub fn new(center: DVec3, rotation: DQuat, intrinsics: CameraIntrinsics) -> Self {
        Self {
            center,
            rotation,
            intrinsics,
        }
    }

    /// Creates a camera from a world-to-camera rotation and translation.
    pub fn from_translation(
        translation: DVec3,
        rotation: DQuat,
        intrinsics: CameraIntrinsics,
    ) -> Self {
        let center = -(rotation.inverse() * translation);
        Self::new(center, rotation, intrinsics)
    }

    /// Creates a camera at `center` looking at `target`.
    ///
    /// `up` is the world direction that should appear upward in the image.
    pub fn look_at(center: DVec3, target: DVec3, up: DVec3, intrinsics: CameraIntrinsics) -> Self {
        let forward = (target - center).normalize();
        let right = (-up).cross(forward).normalize();
        // Re-orthogonalize down
        let down = forward.cross(right);
        // Rows of the rotation are the camera axes in world space
        let rotation = DMat3::from_cols(right, down, forward).transpose();
        Self::new(center, DQuat::from_mat3(&rotation), intrinsics)
    }

    /// Returns the rotation matrix R.
    pub fn rotation_matrix(&self) -> DMat3 {
        DMat3::from_quat(self.rotation)
    }

    /// Returns the translation T = -R * center.
    pub fn translation(&self) -> DVec3 {
        -(self.rotation * self.center)
    }

    /// Returns the calibration matrix K.
    pub fn calibration_matrix(&self) -> DMat3 {
        self.intrinsics.as_matrix()
    }

    /// Returns the 4x4 pose matrix [R | T].
    pub fn pose_matrix(&self) -> DMat4 {
        pose_matrix(&self.rotation_matrix(), self.translation())
    }

    /// Returns the depth of a world point along the optical axis.
    pub fn depth(&self, point: DVec3) -> f64 {
        (self.rotation * (point - self.center)).z
    }

    /// Projects a world point to sub-pixel image coordinates.
    pub fn project(&self, point: DVec3) -> DVec2 {
        let camera_point = self.rotation * (point - self.center);
        let image_point = self.calibration_matrix() * camera_point;
        image_point.truncate() / image_point.z
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DQuat::IDENTITY, CameraIntrinsics::default())
    }
}

impl Camera for PerspectiveCamera {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "PerspectiveCamera"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intrinsics() -> CameraIntrinsics {
        CameraIntrinsics::new(800.0, DVec2::new(320.0, 240.0))
            .with_aspect_ratio(1.25)
            .with_skew(0.5)
    }

    #[test]
    fn test_intrinsics_matrix() {
        let k = intrinsics().as_matrix();
        assert_eq!(element3(&k, 0, 0), 800.0);
        assert_eq!(element3(&k, 0, 1), 0.5);
        assert_eq!(element3(&k, 0, 2), 320.0);
        assert_eq!(element3(&k, 1, 1), 640.0);
        assert_eq!(element3(&k, 1, 2), 240.0);
        assert_eq!(element3(&k, 2, 2), 1.0);
        assert_eq!(element3(&k, 1, 0), 0.0);
        assert_eq!(element3(&k, 2, 0), 0.0);
    }

    #[test]
    fn test_intrinsics_from_matrix() {
        let recovered = CameraIntrinsics::from_matrix(&intrinsics().as_matrix());
        assert!((recovered.aspect_ratio - 1.25).abs() < 1e-12);
        assert_eq!(recovered.focal_length, 800.0);
        assert_eq!(recovered.skew, 0.5);
        assert_eq!(recovered.principal_point, DVec2::new(320.0, 240.0));
    }

    #[test]
    fn test_look_at_frame() {
        let camera = PerspectiveCamera::look_at(
            DVec3::new(0.0, 0.0, 5.0),
            DVec3::ZERO,
            DVec3::Y,
            CameraIntrinsics::default(),
        );
        let r = camera.rotation_matrix();
        // Camera +Z maps to world -Z, camera +Y (down) to world -Y
        assert!((r.row(2) - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
        assert!((r.row(1) - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-9);
        assert!((r.row(0) - DVec3::new(1.0, 0.0, 0.0)).length() < 1e-9);
        assert!((camera.depth(DVec3::ZERO) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_target_hits_principal_point() {
        let camera = PerspectiveCamera::look_at(
            DVec3::new(3.0, -2.0, 1.0),
            DVec3::new(0.5, 0.5, 0.5),
            DVec3::Z,
            intrinsics(),
        );
        let pixel = camera.project(DVec3::new(0.5, 0.5, 0.5));
        assert!((pixel - DVec2::new(320.0, 240.0)).length() < 1e-6);
    }

    #[test]
    fn test_translation_round_trip() {
        let rotation = DQuat::from_euler(glam::EulerRot::XYZ, 0.1, -0.4, 0.9);
        let camera = PerspectiveCamera::new(DVec3::new(1.0, 2.0, 3.0), rotation, intrinsics());
        let rebuilt =
            PerspectiveCamera::from_translation(camera.translation(), rotation, intrinsics());
        assert!((rebuilt.center - camera.center).length() < 1e-9);
    }

    #[test]
    fn test_downcast() {
        let camera: Box<dyn Camera> = Box::new(PerspectiveCamera::default());
        assert_eq!(camera.type_name(), "PerspectiveCamera");
        assert!(camera.as_any().downcast_ref::<PerspectiveCamera>().is_some());
    }
}
