//! Spot light helper geometry
//!
//! A wireframe cone that visualizes a [`SpotLight`]'s direction, range and
//! angle. The cone is built in a unit local frame (apex at the origin, opening
//! along +Z with a rim of radius 1 at z = 1) and then scaled and rotated to
//! match the light. It is recomputed only when [`SpotLightHelper::update`] is
//! called, so callers must refresh it after editing the light.

use glam::{Quat, Vec3};

use crate::color::Color;
use crate::constants::helper::{CONE_SEGMENTS, MAX_ANGLE, UNLIMITED_LENGTH};
use crate::light::SpotLight;

/// Line segment in world space
pub type LineSegment = [Vec3; 2];

/// Wireframe cone matching a spot light
#[derive(Debug, Clone)]
pub struct SpotLightHelper {
    local_segments: Vec<LineSegment>,
    segments: Vec<LineSegment>,
    color: Color,
    cone_length: f32,
    cone_width: f32,
    revision: u64,
}

impl SpotLightHelper {
    /// Create a helper and fit it to the light
    pub fn new(light: &SpotLight) -> Self {
        let mut helper = Self {
            local_segments: unit_cone_segments(),
            segments: Vec::new(),
            color: light.color,
            cone_length: 0.0,
            cone_width: 0.0,
            revision: 0,
        };
        helper.update(light);
        helper
    }

    /// Refit the cone to the light's current position, target, range and angle
    pub fn update(&mut self, light: &SpotLight) {
        let length = if light.has_range() {
            light.distance
        } else {
            UNLIMITED_LENGTH
        };
        // tan diverges at a right angle and flips sign just past it
        let width = length * light.angle.clamp(0.0, MAX_ANGLE).tan();
        let scale = Vec3::new(width, width, length);
        let rotation = Quat::from_rotation_arc(Vec3::Z, light.direction());

        self.segments.clear();
        self.segments.extend(self.local_segments.iter().map(|[a, b]| {
            [
                light.position + rotation * (*a * scale),
                light.position + rotation * (*b * scale),
            ]
        }));
        self.color = light.color;
        self.cone_length = length;
        self.cone_width = width;
        self.revision += 1;
    }

    /// World-space line segments
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Line color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Cone length along the light direction
    pub fn cone_length(&self) -> f32 {
        self.cone_length
    }

    /// Cone rim radius
    pub fn cone_width(&self) -> f32 {
        self.cone_width
    }

    /// Incremented on every update; renderers re-upload when it changes
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Unit cone: five spokes from the apex plus the rim circle
fn unit_cone_segments() -> Vec<LineSegment> {
    let mut segments = vec![
        [Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)],
        [Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)],
        [Vec3::ZERO, Vec3::new(-1.0, 0.0, 1.0)],
        [Vec3::ZERO, Vec3::new(0.0, 1.0, 1.0)],
        [Vec3::ZERO, Vec3::new(0.0, -1.0, 1.0)],
    ];

    for i in 0..CONE_SEGMENTS {
        let p1 = i as f32 / CONE_SEGMENTS as f32 * std::f32::consts::TAU;
        let p2 = (i + 1) as f32 / CONE_SEGMENTS as f32 * std::f32::consts::TAU;
        segments.push([
            Vec3::new(p1.cos(), p1.sin(), 1.0),
            Vec3::new(p2.cos(), p2.sin(), 1.0),
        ]);
    }

    segments
}
