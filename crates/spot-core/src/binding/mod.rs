//! Parameter binding layer
//!
//! Connects GUI controls to properties of shared objects:
//!
//! - [`Property`]: a named field of a target type with reader and writer
//! - [`UnitTransform`]: a bidirectional mapping between the control's domain
//!   and the property's domain ([`Identity`], [`DegreesRadians`], [`HexColor`])
//! - [`Accessor`]: the get/set capability of a property on a shared target,
//!   seen through a transform
//! - [`BindingPanel`]: the ordered set of registered bindings and folders that
//!   a GUI renders
//!
//! Reads go property → control through the inverse transform, writes go
//! control → property through the forward transform, are assigned immediately,
//! and then fire the binding's change callback.

mod panel;
mod property;
mod transform;

pub use panel::{
    Binding, BindingGroup, BindingHandle, BindingPanel, ChangeCallback, ColorBinding,
    NumberBinding, NumericRange, PanelEntry,
};
pub use property::{Accessor, Property, PropertyAccessor, VectorAxisAccessor};
pub use transform::{DegreesRadians, HexColor, Identity, UnitTransform};

use crate::color::ColorError;

/// Binding errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error("Invalid color value: {0}")]
    Color(#[from] ColorError),
    #[error("Value for '{key}' is not a finite number")]
    NonFinite { key: &'static str },
}
