//! Renderer configuration structures
//!
//! This module provides configurable settings for the renderer that can be
//! serialized and loaded from configuration files.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Viewport shading configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Ambient light color (RGB)
    pub ambient_color: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Phong specular exponent
    pub shininess: f32,
    /// Specular highlight strength
    pub specular_strength: f32,
    /// Whether the spot light helper cone is drawn
    pub show_helper: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_strength: 0.0,
            shininess: 30.0,
            specular_strength: 0.07,
            show_helper: true,
        }
    }
}

/// Camera default configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Initial aspect ratio, replaced by the display size on the first frame
    pub aspect: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial camera position
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect: 2.0,
            near_plane: 0.1,
            far_plane: 100.0,
            position: Vec3::new(0.0, 10.0, 20.0),
        }
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Smooth camera motion over several frames
    pub enable_damping: bool,
    /// Fraction of the remaining motion applied per update (0..=1)
    pub damping_factor: f32,
    /// Orbit sensitivity multiplier
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier
    pub zoom_speed: f32,
    /// Minimum distance from the target
    pub min_distance: f32,
    /// Maximum distance from the target
    pub max_distance: f32,
    /// Advance the controls on every frame instead of only on input
    pub update_controls_each_frame: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 5.0, 0.0),
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 90.0,
            update_controls_each_frame: true,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit controls settings
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::new();
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.camera.far_plane, 100.0);
        assert_eq!(config.controls.target, Vec3::new(0.0, 5.0, 0.0));
        assert!(config.controls.update_controls_each_frame);
    }

    #[test]
    fn test_partial_ron() {
        let config: RendererConfig =
            ron::from_str("(controls: (update_controls_each_frame: false))").unwrap();
        assert!(!config.controls.update_controls_each_frame);
        assert_eq!(config.controls.damping_factor, 0.05);
        assert_eq!(config.camera, CameraConfig::default());
    }
}
