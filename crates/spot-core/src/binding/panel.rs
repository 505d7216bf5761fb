//! Binding panel: the registered controls a GUI renders

use std::sync::Arc;

use glam::Vec3;

use super::property::{Accessor, Property, PropertyAccessor, VectorAxisAccessor};
use super::transform::{HexColor, Identity, UnitTransform};
use super::BindingError;
use crate::color::Color;
use crate::constants::controls;
use crate::Shared;

/// Callback fired synchronously after every successful write
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Slider range with optional step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
}

impl NumericRange {
    /// Range between `min` and `max`, in either order
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            step: None,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = (step > 0.0).then_some(step);
        self
    }

    /// Snap to the step (relative to `min`) and clamp into the range
    pub fn apply(&self, value: f32) -> f32 {
        let snapped = match self.step {
            Some(step) => self.min + ((value - self.min) / step).round() * step,
            None => value,
        };
        snapped.clamp(self.min, self.max)
    }
}

/// Stable reference to a registered binding
///
/// `slot` is set for bindings that live inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingHandle {
    entry: usize,
    slot: Option<usize>,
}

/// Numeric control bound to a property
pub struct NumberBinding {
    label: String,
    handle: BindingHandle,
    accessor: Box<dyn Accessor<f32>>,
    range: Option<NumericRange>,
    step: Option<f32>,
    on_change: Option<ChangeCallback>,
}

impl NumberBinding {
    fn new(handle: BindingHandle, accessor: Box<dyn Accessor<f32>>) -> Self {
        Self {
            label: accessor.key().to_string(),
            handle,
            accessor,
            range: None,
            step: None,
            on_change: None,
        }
    }

    /// Set the display label (defaults to the property key)
    pub fn name(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    /// Restrict values to the range between `min` and `max`, in either order
    pub fn range(&mut self, min: f32, max: f32) -> &mut Self {
        let range = NumericRange::new(min, max);
        self.range = Some(match self.step {
            Some(step) => range.with_step(step),
            None => range,
        });
        self
    }

    /// Snap values to multiples of `step` from the range minimum
    ///
    /// May be called before or after [`NumberBinding::range`]; without a range
    /// the step has no effect.
    pub fn step(&mut self, step: f32) -> &mut Self {
        self.step = (step > 0.0).then_some(step);
        if let Some(range) = self.range {
            self.range = Some(NumericRange {
                step: self.step,
                ..range
            });
        }
        self
    }

    /// Callback fired after every write
    pub fn on_change(&mut self, callback: ChangeCallback) -> &mut Self {
        self.on_change = Some(callback);
        self
    }

    pub fn handle(&self) -> BindingHandle {
        self.handle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &'static str {
        self.accessor.key()
    }

    pub fn numeric_range(&self) -> Option<NumericRange> {
        self.range
    }

    /// Current value in the control's domain
    pub fn value(&self) -> f32 {
        self.accessor.get()
    }

    /// Write a control value, returning the value actually stored
    ///
    /// The value is snapped and clamped to the range, converted, assigned and
    /// then the change callback fires.
    pub fn set_value(&self, value: f32) -> Result<f32, BindingError> {
        if !value.is_finite() {
            return Err(BindingError::NonFinite {
                key: self.accessor.key(),
            });
        }
        let value = self.range.map_or(value, |r| r.apply(value));
        self.accessor.set(value)?;
        if let Some(callback) = &self.on_change {
            callback();
        }
        Ok(value)
    }
}

/// Color control bound to a property through a hex string
pub struct ColorBinding {
    label: String,
    handle: BindingHandle,
    accessor: Box<dyn Accessor<String>>,
    on_change: Option<ChangeCallback>,
}

impl ColorBinding {
    pub fn name(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    pub fn on_change(&mut self, callback: ChangeCallback) -> &mut Self {
        self.on_change = Some(callback);
        self
    }

    pub fn handle(&self) -> BindingHandle {
        self.handle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &'static str {
        self.accessor.key()
    }

    /// Current value as `#rrggbb`
    pub fn value(&self) -> String {
        self.accessor.get()
    }

    /// Write a hex color string; malformed input leaves the property untouched
    pub fn set_value(&self, hex: &str) -> Result<(), BindingError> {
        self.accessor.set(hex.to_string())?;
        if let Some(callback) = &self.on_change {
            callback();
        }
        Ok(())
    }
}

/// A single bound control
pub enum Binding {
    Number(NumberBinding),
    Color(ColorBinding),
}

impl Binding {
    pub fn label(&self) -> &str {
        match self {
            Binding::Number(b) => b.label(),
            Binding::Color(b) => b.label(),
        }
    }

    pub fn handle(&self) -> BindingHandle {
        match self {
            Binding::Number(b) => b.handle(),
            Binding::Color(b) => b.handle(),
        }
    }
}

/// Named folder of bindings
pub struct BindingGroup {
    name: String,
    handle: BindingHandle,
    open: bool,
    bindings: Vec<Binding>,
}

impl BindingGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> BindingHandle {
        self.handle
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) -> &mut Self {
        self.open = open;
        self
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    fn add_number(&mut self, accessor: Box<dyn Accessor<f32>>) -> &mut NumberBinding {
        let handle = BindingHandle {
            entry: self.handle.entry,
            slot: Some(self.bindings.len()),
        };
        self.bindings
            .push(Binding::Number(NumberBinding::new(handle, accessor)));
        match self.bindings.last_mut() {
            Some(Binding::Number(binding)) => binding,
            _ => unreachable!("number binding was just pushed"),
        }
    }
}

/// Top-level panel entry
pub enum PanelEntry {
    Binding(Binding),
    Group(BindingGroup),
}

/// Ordered collection of bindings and folders
pub struct BindingPanel {
    title: String,
    entries: Vec<PanelEntry>,
}

impl BindingPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[PanelEntry] {
        &self.entries
    }

    /// Mutable entries, for GUIs that toggle folder state
    pub fn entries_mut(&mut self) -> &mut [PanelEntry] {
        &mut self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bind a numeric property through a unit transform
    pub fn bind<T, X>(
        &mut self,
        target: &Shared<T>,
        property: Property<T, X::Property>,
        transform: X,
    ) -> &mut NumberBinding
    where
        T: Send + 'static,
        X: UnitTransform<Control = f32>,
    {
        let accessor = PropertyAccessor::new(target.clone(), property, transform);
        let handle = self.next_handle();
        self.entries.push(PanelEntry::Binding(Binding::Number(
            NumberBinding::new(handle, Box::new(accessor)),
        )));
        match self.entries.last_mut() {
            Some(PanelEntry::Binding(Binding::Number(binding))) => binding,
            _ => unreachable!("number binding was just pushed"),
        }
    }

    /// Bind a plain `f32` property
    pub fn bind_number<T: Send + 'static>(
        &mut self,
        target: &Shared<T>,
        property: Property<T, f32>,
    ) -> &mut NumberBinding {
        self.bind(target, property, Identity::<f32>::new())
    }

    /// Bind a color property as a `#rrggbb` string
    pub fn bind_color<T: Send + 'static>(
        &mut self,
        target: &Shared<T>,
        property: Property<T, Color>,
    ) -> &mut ColorBinding {
        let accessor = PropertyAccessor::new(target.clone(), property, HexColor);
        let handle = self.next_handle();
        self.entries
            .push(PanelEntry::Binding(Binding::Color(ColorBinding {
                label: property.key().to_string(),
                handle,
                accessor: Box::new(accessor),
                on_change: None,
            })));
        match self.entries.last_mut() {
            Some(PanelEntry::Binding(Binding::Color(binding))) => binding,
            _ => unreachable!("color binding was just pushed"),
        }
    }

    /// Bind the x, y and z components of a vector property as one open folder
    ///
    /// Each axis is an independent slider (x and z in -10..=10, y in 0..=10).
    /// `on_change` is shared and fires once per individual axis edit.
    pub fn bind_vector3<T: Send + 'static>(
        &mut self,
        target: &Shared<T>,
        property: Property<T, Vec3>,
        name: impl Into<String>,
        on_change: Option<ChangeCallback>,
    ) -> &mut BindingGroup {
        let mut group = BindingGroup {
            name: name.into(),
            handle: self.next_handle(),
            open: true,
            bindings: Vec::with_capacity(3),
        };

        let axes = [
            ("x", controls::VECTOR_X),
            ("y", controls::VECTOR_Y),
            ("z", controls::VECTOR_Z),
        ];
        for (axis, (label, (min, max))) in axes.into_iter().enumerate() {
            let accessor = VectorAxisAccessor::new(target.clone(), property, axis);
            let binding = group.add_number(Box::new(accessor));
            binding.name(label).range(min, max);
            if let Some(callback) = &on_change {
                binding.on_change(callback.clone());
            }
        }

        self.entries.push(PanelEntry::Group(group));
        match self.entries.last_mut() {
            Some(PanelEntry::Group(group)) => group,
            _ => unreachable!("group was just pushed"),
        }
    }

    /// Look up a binding by handle
    pub fn binding(&self, handle: BindingHandle) -> Option<&Binding> {
        match (self.entries.get(handle.entry)?, handle.slot) {
            (PanelEntry::Binding(binding), None) => Some(binding),
            (PanelEntry::Group(group), Some(slot)) => group.bindings.get(slot),
            _ => None,
        }
    }

    /// Look up a numeric binding by handle
    pub fn number(&self, handle: BindingHandle) -> Option<&NumberBinding> {
        match self.binding(handle)? {
            Binding::Number(binding) => Some(binding),
            Binding::Color(_) => None,
        }
    }

    /// Look up a color binding by handle
    pub fn color(&self, handle: BindingHandle) -> Option<&ColorBinding> {
        match self.binding(handle)? {
            Binding::Color(binding) => Some(binding),
            Binding::Number(_) => None,
        }
    }

    /// Look up a folder by handle
    pub fn group(&self, handle: BindingHandle) -> Option<&BindingGroup> {
        match self.entries.get(handle.entry)? {
            PanelEntry::Group(group) => Some(group),
            PanelEntry::Binding(_) => None,
        }
    }

    fn next_handle(&self) -> BindingHandle {
        BindingHandle {
            entry: self.entries.len(),
            slot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::binding::DegreesRadians;
    use crate::shared;

    #[derive(Debug, Default)]
    struct Lamp {
        power: f32,
        tilt: f32,
        tint: Color,
        offset: Vec3,
    }

    fn power() -> Property<Lamp, f32> {
        Property::new("power", |l: &Lamp| l.power, |l: &mut Lamp, v| l.power = v)
    }

    fn tilt() -> Property<Lamp, f32> {
        Property::new("tilt", |l: &Lamp| l.tilt, |l: &mut Lamp, v| l.tilt = v)
    }

    fn tint() -> Property<Lamp, Color> {
        Property::new("tint", |l: &Lamp| l.tint, |l: &mut Lamp, v| l.tint = v)
    }

    fn offset() -> Property<Lamp, Vec3> {
        Property::new("offset", |l: &Lamp| l.offset, |l: &mut Lamp, v| l.offset = v)
    }

    fn counter() -> (Arc<AtomicUsize>, ChangeCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (
            count,
            Arc::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn test_numeric_range_snaps_and_clamps() {
        let range = NumericRange::new(0.0, 1.0).with_step(0.01);
        assert!((range.apply(0.123) - 0.12).abs() < 1e-6);
        assert_eq!(range.apply(-3.0), 0.0);
        assert_eq!(range.apply(7.0), 1.0);
        assert_eq!(NumericRange::new(0.0, 10.0).apply(3.33), 3.33);
    }

    #[test]
    fn test_number_binding_defaults_label_to_key() {
        let lamp = shared(Lamp::default());
        let mut panel = BindingPanel::new("Lamp");
        let handle = panel.bind_number(&lamp, power()).handle();
        let binding = panel.number(handle).unwrap();
        assert_eq!(binding.label(), "power");
        assert_eq!(binding.key(), "power");
        assert!(binding.numeric_range().is_none());
    }

    #[test]
    fn test_set_value_clamps_and_fires_callback() {
        let lamp = shared(Lamp::default());
        let (count, callback) = counter();
        let mut panel = BindingPanel::new("Lamp");
        let handle = panel
            .bind_number(&lamp, power())
            .range(0.0, 250.0)
            .step(1.0)
            .on_change(callback)
            .handle();

        let stored = panel.number(handle).unwrap().set_value(300.4).unwrap();
        assert_eq!(stored, 250.0);
        assert_eq!(lamp.lock().power, 250.0);

        panel.number(handle).unwrap().set_value(0.0).unwrap();
        assert_eq!(lamp.lock().power, 0.0);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_step_before_range_is_kept() {
        let lamp = shared(Lamp::default());
        let mut panel = BindingPanel::new("Lamp");
        let handle = panel
            .bind_number(&lamp, power())
            .step(1.0)
            .range(0.0, 250.0)
            .handle();

        let binding = panel.number(handle).unwrap();
        assert_eq!(binding.numeric_range().unwrap().step, Some(1.0));
        assert_eq!(binding.set_value(12.6).unwrap(), 13.0);
    }

    #[test]
    fn test_reversed_range_is_normalized() {
        let lamp = shared(Lamp::default());
        let mut panel = BindingPanel::new("Lamp");
        let handle = panel.bind_number(&lamp, power()).range(10.0, -10.0).handle();

        let binding = panel.number(handle).unwrap();
        let range = binding.numeric_range().unwrap();
        assert_eq!((range.min, range.max), (-10.0, 10.0));
        assert_eq!(binding.set_value(25.0).unwrap(), 10.0);
        assert_eq!(lamp.lock().power, 10.0);
    }

    #[test]
    fn test_non_finite_write_is_rejected() {
        let lamp = shared(Lamp {
            power: 5.0,
            ..Default::default()
        });
        let (count, callback) = counter();
        let mut panel = BindingPanel::new("Lamp");
        let handle = panel.bind_number(&lamp, power()).on_change(callback).handle();

        let err = panel.number(handle).unwrap().set_value(f32::NAN);
        assert_eq!(err, Err(BindingError::NonFinite { key: "power" }));
        assert_eq!(lamp.lock().power, 5.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_transformed_binding_reads_in_control_domain() {
        let lamp = shared(Lamp::default());
        let mut panel = BindingPanel::new("Lamp");
        let handle = panel
            .bind(&lamp, tilt(), DegreesRadians)
            .name("tilt (deg)")
            .range(0.0, 90.0)
            .handle();

        let binding = panel.number(handle).unwrap();
        binding.set_value(45.0).unwrap();
        assert!((lamp.lock().tilt - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!((binding.value() - 45.0).abs() < 1e-4);
        assert_eq!(binding.label(), "tilt (deg)");
    }

    #[test]
    fn test_color_binding_rejects_malformed_hex() {
        let lamp = shared(Lamp::default());
        let (count, callback) = counter();
        let mut panel = BindingPanel::new("Lamp");
        let handle = panel.bind_color(&lamp, tint()).on_change(callback).handle();
        let binding = panel.color(handle).unwrap();

        binding.set_value("#00ff00").unwrap();
        assert_eq!(binding.value(), "#00ff00");

        assert!(binding.set_value("#00ff0").is_err());
        assert_eq!(lamp.lock().tint, Color::from_hex(0x00ff00));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_vector3_group_shares_callback_per_axis_edit() {
        let lamp = shared(Lamp::default());
        let (count, callback) = counter();
        let mut panel = BindingPanel::new("Lamp");
        let group_handle = panel
            .bind_vector3(&lamp, offset(), "offset", Some(callback))
            .handle();

        let group = panel.group(group_handle).unwrap();
        assert_eq!(group.name(), "offset");
        assert!(group.is_open());
        let labels: Vec<_> = group.bindings().iter().map(Binding::label).collect();
        assert_eq!(labels, ["x", "y", "z"]);

        let handles: Vec<_> = group.bindings().iter().map(Binding::handle).collect();
        panel.number(handles[0]).unwrap().set_value(-4.0).unwrap();
        panel.number(handles[1]).unwrap().set_value(-1.0).unwrap();
        panel.number(handles[2]).unwrap().set_value(12.0).unwrap();

        assert_eq!(lamp.lock().offset, Vec3::new(-4.0, 0.0, 10.0));
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_handles_do_not_cross_kinds() {
        let lamp = shared(Lamp::default());
        let mut panel = BindingPanel::new("Lamp");
        let color = panel.bind_color(&lamp, tint()).handle();
        let group = panel.bind_vector3(&lamp, offset(), "offset", None).handle();

        assert!(panel.number(color).is_none());
        assert!(panel.color(color).is_some());
        assert!(panel.binding(group).is_none());
        assert_eq!(panel.entries().len(), 2);
    }
}
