//! Light controller
//!
//! Owns the scene's spot light and its helper, and registers the light's
//! controls with a [`BindingPanel`]. Controls that change the cone's shape or
//! placement refresh the helper right after the write.

use std::sync::Arc;

use crate::binding::{BindingHandle, BindingPanel, ChangeCallback, DegreesRadians, Identity};
use crate::constants::controls;
use crate::helper::SpotLightHelper;
use crate::light::{SpotLight, props};
use crate::scene::SceneGraph;
use crate::{Shared, shared};

/// Handles of the controls registered by [`LightController::register`]
#[derive(Debug, Clone, Copy)]
pub struct LightBindings {
    pub color: BindingHandle,
    pub intensity: BindingHandle,
    pub distance: BindingHandle,
    pub angle: BindingHandle,
    pub penumbra: BindingHandle,
    pub position: BindingHandle,
    pub target: BindingHandle,
}

/// Spot light with its helper
#[derive(Clone)]
pub struct LightController {
    light: Shared<SpotLight>,
    helper: Shared<SpotLightHelper>,
}

impl LightController {
    /// Create a controller for a new light, fitting a helper to it
    pub fn new(light: SpotLight) -> Self {
        let helper = SpotLightHelper::new(&light);
        Self {
            light: shared(light),
            helper: shared(helper),
        }
    }

    /// Control the light that lives in a scene graph
    pub fn from_scene(scene: &SceneGraph) -> Self {
        Self {
            light: scene.light().clone(),
            helper: scene.helper().clone(),
        }
    }

    pub fn light(&self) -> &Shared<SpotLight> {
        &self.light
    }

    pub fn helper(&self) -> &Shared<SpotLightHelper> {
        &self.helper
    }

    /// Callback that refits the helper, for use as a binding's `on_change`
    pub fn refresh_callback(&self) -> ChangeCallback {
        let light = self.light.clone();
        let helper = self.helper.clone();
        Arc::new(move || refresh(&light, &helper))
    }

    /// Register the light's controls
    pub fn register(&self, panel: &mut BindingPanel) -> LightBindings {
        let refresh = self.refresh_callback();

        let color = panel.bind_color(&self.light, props::color()).handle();

        let (min, max, step) = controls::INTENSITY;
        let intensity = panel
            .bind(&self.light, props::intensity(), Identity::<f32>::new())
            .range(min, max)
            .step(step)
            .handle();

        let (min, max) = controls::DISTANCE;
        let distance = panel
            .bind_number(&self.light, props::distance())
            .range(min, max)
            .on_change(refresh.clone())
            .handle();

        let (min, max) = controls::ANGLE_DEGREES;
        let angle = panel
            .bind(&self.light, props::angle(), DegreesRadians)
            .range(min, max)
            .on_change(refresh.clone())
            .handle();

        let (min, max, step) = controls::PENUMBRA;
        let penumbra = panel
            .bind_number(&self.light, props::penumbra())
            .range(min, max)
            .step(step)
            .handle();

        let position = panel
            .bind_vector3(
                &self.light,
                props::position(),
                "position",
                Some(refresh.clone()),
            )
            .handle();

        let target = panel
            .bind_vector3(&self.light, props::target(), "target", Some(refresh))
            .handle();

        tracing::debug!("Registered {} light controls", panel.entries().len());

        LightBindings {
            color,
            intensity,
            distance,
            angle,
            penumbra,
            position,
            target,
        }
    }
}

// Never holds both locks at once.
fn refresh(light: &Shared<SpotLight>, helper: &Shared<SpotLightHelper>) {
    let snapshot = *light.lock();
    helper.lock().update(&snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Binding, PanelEntry};
    use crate::color::Color;
    use crate::config::LightConfig;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn setup() -> (LightController, BindingPanel, LightBindings) {
        let controller = LightController::new(SpotLight::from_config(&LightConfig::default()));
        let mut panel = BindingPanel::new("Light");
        let bindings = controller.register(&mut panel);
        (controller, panel, bindings)
    }

    #[test]
    fn test_registration_order() {
        let (_, panel, _) = setup();
        let labels: Vec<&str> = panel
            .entries()
            .iter()
            .map(|entry| match entry {
                PanelEntry::Binding(binding) => binding.label(),
                PanelEntry::Group(group) => group.name(),
            })
            .collect();
        assert_eq!(
            labels,
            [
                "color",
                "intensity",
                "distance",
                "angle",
                "penumbra",
                "position",
                "target"
            ]
        );
    }

    #[test]
    fn test_intensity_zero_is_stored() {
        let (controller, panel, bindings) = setup();
        panel.number(bindings.intensity).unwrap().set_value(0.0).unwrap();
        assert_eq!(controller.light().lock().intensity, 0.0);
    }

    #[test]
    fn test_color_round_trip() {
        let (controller, panel, bindings) = setup();
        let color = panel.color(bindings.color).unwrap();
        color.set_value("#ff00ff").unwrap();
        assert_eq!(controller.light().lock().color, Color::new(1.0, 0.0, 1.0));
        assert_eq!(color.value(), "#ff00ff");
    }

    #[test]
    fn test_angle_is_edited_in_degrees() {
        let (controller, panel, bindings) = setup();
        let angle = panel.number(bindings.angle).unwrap();
        assert_relative_eq!(angle.value(), 60.0, epsilon = 1e-4);

        angle.set_value(45.0).unwrap();
        assert_relative_eq!(
            controller.light().lock().angle,
            std::f32::consts::FRAC_PI_4,
            epsilon = 1e-6
        );
        assert_relative_eq!(angle.value(), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_distance_edit_refreshes_helper() {
        let (controller, panel, bindings) = setup();
        let before = controller.helper().lock().revision();

        panel.number(bindings.distance).unwrap().set_value(12.0).unwrap();

        let helper = controller.helper().lock();
        assert_eq!(helper.revision(), before + 1);
        assert_eq!(helper.cone_length(), 12.0);
    }

    #[test]
    fn test_angle_slider_maximum_keeps_helper_finite() {
        let (controller, panel, bindings) = setup();
        panel.number(bindings.distance).unwrap().set_value(10.0).unwrap();
        let stored = panel.number(bindings.angle).unwrap().set_value(90.0).unwrap();
        assert_eq!(stored, 90.0);

        let helper = controller.helper().lock();
        assert!(helper.cone_width().is_finite());
        assert!(helper.cone_width() >= 0.0);
        assert_eq!(helper.cone_length(), 10.0);
    }

    #[test]
    fn test_penumbra_does_not_refresh_helper() {
        let (controller, panel, bindings) = setup();
        let before = controller.helper().lock().revision();
        let stored = panel
            .number(bindings.penumbra)
            .unwrap()
            .set_value(0.333)
            .unwrap();
        assert_relative_eq!(stored, 0.33, epsilon = 1e-6);
        assert_eq!(controller.helper().lock().revision(), before);
    }

    #[test]
    fn test_target_axis_edit_reaims_helper() {
        let (controller, panel, bindings) = setup();
        let group = panel.group(bindings.target).unwrap();
        let x = match &group.bindings()[0] {
            Binding::Number(binding) => binding.handle(),
            Binding::Color(_) => panic!("expected number binding"),
        };

        panel.number(x).unwrap().set_value(10.0).unwrap();

        let light = *controller.light().lock();
        assert_eq!(light.target, Vec3::new(10.0, 0.0, 0.0));
        let helper = controller.helper().lock();
        let [apex, tip] = helper.segments()[0];
        let axis = (tip - apex).normalize();
        assert_relative_eq!(axis.dot(light.direction()), 1.0, epsilon = 1e-4);
    }
}
