//! Unit-conversion transforms between control and property domains

use std::marker::PhantomData;

use super::BindingError;
use crate::color::Color;

/// Bidirectional mapping between a control's value and a property's value
pub trait UnitTransform: Send + Sync + 'static {
    /// Value type shown by the control
    type Control;
    /// Value type stored in the property
    type Property;

    /// Property → control (used on read)
    fn to_control(&self, value: Self::Property) -> Self::Control;

    /// Control → property (used on write)
    fn to_property(&self, value: Self::Control) -> Result<Self::Property, BindingError>;
}

/// Passes values through unchanged
pub struct Identity<V>(PhantomData<fn(V) -> V>);

impl<V> Identity<V> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<V> Default for Identity<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> UnitTransform for Identity<V> {
    type Control = V;
    type Property = V;

    fn to_control(&self, value: V) -> V {
        value
    }

    fn to_property(&self, value: V) -> Result<V, BindingError> {
        Ok(value)
    }
}

/// Control shows degrees, property stores radians
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreesRadians;

impl UnitTransform for DegreesRadians {
    type Control = f32;
    type Property = f32;

    fn to_control(&self, radians: f32) -> f32 {
        radians.to_degrees()
    }

    fn to_property(&self, degrees: f32) -> Result<f32, BindingError> {
        Ok(degrees.to_radians())
    }
}

/// Control shows a `#rrggbb` string, property stores a [`Color`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HexColor;

impl UnitTransform for HexColor {
    type Control = String;
    type Property = Color;

    fn to_control(&self, color: Color) -> String {
        format!("#{}", color.hex_string())
    }

    fn to_property(&self, hex: String) -> Result<Color, BindingError> {
        Ok(Color::parse(&hex)?)
    }
}
