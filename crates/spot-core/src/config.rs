//! Scene configuration structures
//!
//! These settings can be serialized and loaded from configuration files.
//! Every field falls back to the built-in scene when omitted.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants;

/// Spot light configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// Light color
    pub color: Color,
    /// Luminous intensity in candela
    pub intensity: f32,
    /// Maximum range (0 = unlimited)
    pub distance: f32,
    /// Cone half-angle in degrees
    pub angle_degrees: f32,
    /// Penumbra fraction (0..=1)
    pub penumbra: f32,
    /// Distance decay exponent
    pub decay: f32,
    /// Light position
    pub position: Vec3,
    /// Light target position
    pub target: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: Color::from_hex(constants::light::COLOR),
            intensity: constants::light::INTENSITY,
            distance: 0.0,
            angle_degrees: constants::light::ANGLE_DEGREES,
            penumbra: 0.0,
            decay: constants::light::DECAY,
            position: Vec3::from_array(constants::light::POSITION),
            target: Vec3::from_array(constants::light::TARGET),
        }
    }
}

/// Scene content configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene background color
    pub background: Color,
    /// Ground plane edge length
    pub plane_size: f32,
    /// Checker texture path for the ground plane
    pub checker_texture: String,
    /// Cube edge length
    pub cube_size: f32,
    /// Cube color
    pub cube_color: Color,
    /// Sphere radius
    pub sphere_radius: f32,
    /// Sphere segments around the vertical axis
    pub sphere_width_segments: u32,
    /// Sphere segments from pole to pole
    pub sphere_height_segments: u32,
    /// Sphere color
    pub sphere_color: Color,
    /// Spot light settings
    pub light: LightConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            plane_size: constants::PLANE_SIZE,
            checker_texture: constants::CHECKER_TEXTURE_PATH.to_string(),
            cube_size: constants::CUBE_SIZE,
            cube_color: Color::parse(constants::CUBE_COLOR).unwrap_or(Color::WHITE),
            sphere_radius: constants::SPHERE_RADIUS,
            sphere_width_segments: constants::SPHERE_WIDTH_SEGMENTS,
            sphere_height_segments: constants::SPHERE_HEIGHT_SEGMENTS,
            sphere_color: Color::parse(constants::SPHERE_COLOR).unwrap_or(Color::WHITE),
            light: LightConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Texture repeat count on each axis: one checker tile per 2 units
    pub fn checker_repeats(&self) -> f32 {
        self.plane_size / 2.0
    }
}
