//! Light controls window
//!
//! Renders a [`BindingPanel`]: a slider per number binding, a color button per
//! color binding and a collapsing header per group. Edits are written through
//! the binding immediately, before the viewport draws this frame.

use spot_core::{Binding, BindingPanel, Color, ColorBinding, NumberBinding, PanelEntry};

/// Floating window listing the registered controls
pub struct ControlsPanel {
    open: bool,
}

impl ControlsPanel {
    pub fn new() -> Self {
        Self { open: true }
    }

    pub fn show(&mut self, ctx: &egui::Context, panel: &mut BindingPanel) {
        egui::Window::new(panel.title().to_string())
            .open(&mut self.open)
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| panel_ui(ui, panel));
    }

    /// Reopen the window after the user closed it
    pub fn reopen(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Default for ControlsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn panel_ui(ui: &mut egui::Ui, panel: &mut BindingPanel) {
    for (index, entry) in panel.entries_mut().iter_mut().enumerate() {
        match entry {
            PanelEntry::Binding(binding) => binding_ui(ui, binding),
            PanelEntry::Group(group) => {
                let response = egui::CollapsingHeader::new(group.name().to_string())
                    .id_salt(("binding_group", index))
                    .default_open(group.is_open())
                    .show(ui, |ui| {
                        for binding in group.bindings() {
                            binding_ui(ui, binding);
                        }
                    });
                group.set_open(response.openness > 0.0);
            }
        }
    }
}

fn binding_ui(ui: &mut egui::Ui, binding: &Binding) {
    match binding {
        Binding::Number(number) => number_ui(ui, number),
        Binding::Color(color) => color_ui(ui, color),
    }
}

fn number_ui(ui: &mut egui::Ui, binding: &NumberBinding) {
    let mut value = binding.value();
    let response = match binding.numeric_range() {
        Some(range) => {
            let mut slider =
                egui::Slider::new(&mut value, range.min..=range.max).text(binding.label());
            if let Some(step) = range.step {
                slider = slider.step_by(step as f64);
            }
            ui.add(slider)
        }
        None => {
            ui.horizontal(|ui| {
                let response = ui.add(egui::DragValue::new(&mut value).speed(0.1));
                ui.label(binding.label());
                response
            })
            .inner
        }
    };

    if response.changed()
        && let Err(e) = binding.set_value(value)
    {
        tracing::warn!("Rejected value for {}: {}", binding.label(), e);
    }
}

fn color_ui(ui: &mut egui::Ui, binding: &ColorBinding) {
    let Some(mut rgb) = hex_to_srgb(&binding.value()) else {
        ui.label(format!("{}: {}", binding.label(), binding.value()));
        return;
    };

    ui.horizontal(|ui| {
        if ui.color_edit_button_srgb(&mut rgb).changed()
            && let Err(e) = binding.set_value(&srgb_to_hex(rgb))
        {
            tracing::warn!("Rejected color for {}: {}", binding.label(), e);
        }
        ui.label(binding.label());
    });
}

/// `"#rrggbb"` to 8-bit sRGB channels
pub fn hex_to_srgb(hex: &str) -> Option<[u8; 3]> {
    let [_, r, g, b] = Color::parse(hex).ok()?.to_hex().to_be_bytes();
    Some([r, g, b])
}

/// 8-bit sRGB channels to `"#rrggbb"`
pub fn srgb_to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_srgb() {
        assert_eq!(hex_to_srgb("#ff00ff"), Some([255, 0, 255]));
        assert_eq!(hex_to_srgb("#88aacc"), Some([0x88, 0xaa, 0xcc]));
        assert_eq!(hex_to_srgb("not a color"), None);
    }

    #[test]
    fn test_srgb_to_hex_is_lowercase() {
        assert_eq!(srgb_to_hex([0xAB, 0x01, 0xFF]), "#ab01ff");
    }

    #[test]
    fn test_picker_edit_reaches_light() {
        let light = spot_core::LightController::new(spot_core::SpotLight::default());
        let mut panel = BindingPanel::new("Light");
        let bindings = light.register(&mut panel);

        let color = panel.color(bindings.color).unwrap();
        color.set_value(&srgb_to_hex([255, 0, 255])).unwrap();

        assert_eq!(hex_to_srgb(&color.value()), Some([255, 0, 255]));
        assert_eq!(light.light().lock().color, Color::new(1.0, 0.0, 1.0));
    }
}
