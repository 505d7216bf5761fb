//! Perspective camera for the 3D viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Eye position (w = 1).
    pub eye: [f32; 4],
}

/// Perspective camera with a cached projection matrix
///
/// Changing `fov`, `aspect`, `near` or `far` has no effect on rendering until
/// [`PerspectiveCamera::update_projection_matrix`] is called.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// World-space position
    pub position: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// Up direction
    pub up: Vec3,
    projection: Mat4,
    projection_updates: u64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl PerspectiveCamera {
    /// Create a camera looking at the origin
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 1.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
            projection_updates: 0,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Create a camera from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(
            config.fov_degrees,
            config.aspect,
            config.near_plane,
            config.far_plane,
        );
        camera.position = config.position;
        camera
    }

    /// Recompute the cached projection matrix from fov, aspect, near and far
    pub fn update_projection_matrix(&mut self) {
        let aspect = if self.aspect.is_finite() && self.aspect > 0.0 {
            self.aspect
        } else {
            1.0
        };
        self.projection = Mat4::perspective_rh(self.fov, aspect, self.near, self.far);
        self.projection_updates += 1;
    }

    /// Number of projection recomputations so far
    pub fn projection_updates(&self) -> u64 {
        self.projection_updates
    }

    /// Get field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }

    /// Get the cached projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view_proj = self.projection * self.view_matrix();
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_matches_demo_camera() {
        let camera = PerspectiveCamera::default();
        assert_relative_eq!(camera.fov_degrees(), 45.0, epsilon = 1e-4);
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.position, Vec3::new(0.0, 10.0, 20.0));
        assert_eq!(camera.projection_updates(), 1);
    }

    #[test]
    fn test_projection_is_cached_until_updated() {
        let mut camera = PerspectiveCamera::default();
        let before = camera.projection_matrix();

        camera.aspect = 1.0;
        assert_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
        assert_eq!(camera.projection_matrix(), Mat4::perspective_rh(camera.fov, 1.0, 0.1, 100.0));
    }

    #[test]
    fn test_degenerate_aspect_does_not_poison_projection() {
        let mut camera = PerspectiveCamera::default();
        camera.aspect = f32::INFINITY;
        camera.update_projection_matrix();
        assert!(camera.projection_matrix().is_finite());
    }
}
