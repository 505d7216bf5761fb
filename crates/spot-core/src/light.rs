//! Spot light definition

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::binding::Property;
use crate::color::Color;
use crate::config::LightConfig;

/// Cone-shaped light pointing from `position` towards `target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    /// Light color (sRGB)
    pub color: Color,
    /// Luminous intensity in candela
    pub intensity: f32,
    /// Maximum range; 0 means unlimited
    pub distance: f32,
    /// Cone half-angle in radians (at most PI / 2)
    pub angle: f32,
    /// Fraction of the cone that is attenuated, 0..=1
    pub penumbra: f32,
    /// Falloff exponent with distance
    pub decay: f32,
    /// World-space position
    pub position: Vec3,
    /// World-space point the light aims at
    pub target: Vec3,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0)
    }
}

impl SpotLight {
    /// Create a light with the given color and intensity and default cone
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            distance: 0.0,
            angle: std::f32::consts::FRAC_PI_3,
            penumbra: 0.0,
            decay: 2.0,
            position: Vec3::Y,
            target: Vec3::ZERO,
        }
    }

    /// Create a light from configuration
    pub fn from_config(config: &LightConfig) -> Self {
        Self {
            color: config.color,
            intensity: config.intensity,
            distance: config.distance,
            angle: config.angle_degrees.to_radians(),
            penumbra: config.penumbra,
            decay: config.decay,
            position: config.position,
            target: config.target,
        }
    }

    /// Normalized direction from the light towards its target
    ///
    /// Falls back to straight down when position and target coincide.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y)
    }

    /// Cosines of the outer and inner cone angles
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.clamp(0.0, std::f32::consts::FRAC_PI_2);
        let inner = outer * (1.0 - self.penumbra.clamp(0.0, 1.0));
        (outer.cos(), inner.cos())
    }

    /// Whether the light has a finite range
    pub fn has_range(&self) -> bool {
        self.distance > 0.0
    }
}

/// Bindable properties of [`SpotLight`]
pub mod props {
    use super::*;

    pub fn color() -> Property<SpotLight, Color> {
        Property::new("color", |l: &SpotLight| l.color, |l: &mut SpotLight, v| {
            l.color = v
        })
    }

    pub fn intensity() -> Property<SpotLight, f32> {
        Property::new(
            "intensity",
            |l: &SpotLight| l.intensity,
            |l: &mut SpotLight, v| l.intensity = v,
        )
    }

    pub fn distance() -> Property<SpotLight, f32> {
        Property::new(
            "distance",
            |l: &SpotLight| l.distance,
            |l: &mut SpotLight, v| l.distance = v,
        )
    }

    /// Cone angle in radians
    pub fn angle() -> Property<SpotLight, f32> {
        Property::new("angle", |l: &SpotLight| l.angle, |l: &mut SpotLight, v| {
            l.angle = v
        })
    }

    pub fn penumbra() -> Property<SpotLight, f32> {
        Property::new(
            "penumbra",
            |l: &SpotLight| l.penumbra,
            |l: &mut SpotLight, v| l.penumbra = v,
        )
    }

    pub fn position() -> Property<SpotLight, Vec3> {
        Property::new(
            "position",
            |l: &SpotLight| l.position,
            |l: &mut SpotLight, v| l.position = v,
        )
    }

    pub fn target() -> Property<SpotLight, Vec3> {
        Property::new("target", |l: &SpotLight| l.target, |l: &mut SpotLight, v| {
            l.target = v
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_config_converts_angle() {
        let light = SpotLight::from_config(&LightConfig::default());
        assert_relative_eq!(light.angle, std::f32::consts::FRAC_PI_3, epsilon = 1e-6);
        assert_eq!(light.position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(light.intensity, 150.0);
        assert_eq!(light.color, Color::WHITE);
    }

    #[test]
    fn test_direction() {
        let mut light = SpotLight::default();
        light.position = Vec3::new(0.0, 10.0, 0.0);
        light.target = Vec3::new(10.0, 10.0, 0.0);
        assert_eq!(light.direction(), Vec3::X);

        light.target = light.position;
        assert_eq!(light.direction(), Vec3::NEG_Y);
    }

    #[test]
    fn test_cone_cosines_with_penumbra() {
        let mut light = SpotLight::default();
        light.angle = std::f32::consts::FRAC_PI_4;
        light.penumbra = 0.0;
        let (outer, inner) = light.cone_cosines();
        assert_relative_eq!(outer, inner);

        light.penumbra = 1.0;
        let (outer, inner) = light.cone_cosines();
        assert_relative_eq!(outer, std::f32::consts::FRAC_PI_4.cos());
        assert_relative_eq!(inner, 1.0);
    }

    #[test]
    fn test_property_accessors() {
        let mut light = SpotLight::default();
        let prop = props::distance();
        assert_eq!(prop.key(), "distance");
        prop.set(&mut light, 12.5);
        assert_eq!(prop.get(&light), 12.5);
        assert!(light.has_range());
    }
}
