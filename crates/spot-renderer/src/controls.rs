//! Orbit camera controls
//!
//! Input is accumulated between updates and applied by
//! [`OrbitControls::update`], which moves the camera on a sphere around the
//! target. With damping enabled the accumulated motion decays over several
//! updates, so the controls must be updated every frame to settle.

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::config::ControlsConfig;

const EPSILON: f32 = 1e-6;

/// Closest the polar angle may get to either pole
const POLE_MARGIN: f32 = 1e-3;

/// Orbit controller around a target point
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Whether accumulated motion decays over several updates
    pub enable_damping: bool,
    /// Fraction of the remaining motion applied per update
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
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_config(&ControlsConfig::default())
    }
}

impl OrbitControls {
    /// Create controls from configuration
    pub fn from_config(config: &ControlsConfig) -> Self {
        Self {
            target: config.target,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            pan_speed: config.pan_speed,
            zoom_speed: config.zoom_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance.max(config.min_distance),
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Orbit by a pointer drag of `(dx, dy)` pixels in a viewport `height` pixels tall
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        let height = height.max(1.0);
        self.delta_theta -= std::f32::consts::TAU * dx / height * self.rotate_speed;
        self.delta_phi -= std::f32::consts::TAU * dy / height * self.rotate_speed;
    }

    /// Pan by a pointer drag of `(dx, dy)` pixels in a viewport `height` pixels tall
    ///
    /// The target moves so that points at the target's depth follow the pointer.
    pub fn pan(&mut self, camera: &PerspectiveCamera, dx: f32, dy: f32, height: f32) {
        let offset = camera.position - self.target;
        let target_distance = offset.length() * (camera.fov / 2.0).tan();
        let units_per_pixel = 2.0 * target_distance / height.max(1.0) * self.pan_speed;

        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        self.pan_offset += right * (-dx * units_per_pixel) + up * (dy * units_per_pixel);
    }

    /// Zoom by scroll `steps`; positive values move towards the target
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= 0.95_f32.powf(steps * self.zoom_speed);
    }

    /// Whether there is accumulated motion left to apply
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > EPSILON
            || self.delta_phi.abs() > EPSILON
            || self.pan_offset.length_squared() > EPSILON * EPSILON
            || (self.scale - 1.0).abs() > EPSILON
    }

    /// Apply accumulated input to the camera; returns whether the camera moved
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let old_position = camera.position;
        let old_look_at = camera.look_at;

        let offset = camera.position - self.target;
        let radius = offset.length().max(EPSILON);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        theta += self.delta_theta * factor;
        phi = (phi + self.delta_phi * factor)
            .clamp(POLE_MARGIN, std::f32::consts::PI - POLE_MARGIN);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        camera.position = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
        camera.look_at = self.target;

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(old_position) > EPSILON
            || camera.look_at.distance_squared(old_look_at) > EPSILON
    }
}
