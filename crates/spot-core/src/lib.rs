//! Spotlight demo core
//!
//! Engine-agnostic scene model and parameter binding for the spotlight demo.
//!
//! # Module Structure
//!
//! ```text
//! spot-core/
//! ├── color.rs             # sRGB color with hex string conversion
//! ├── primitive/           # Plane, box and sphere mesh generation
//! ├── scene.rs             # SceneObject, SceneGraph and the scene builder
//! ├── light.rs             # SpotLight and its bindable properties
//! ├── helper.rs            # Spot light cone helper geometry
//! ├── binding/             # Parameter binding layer (properties, transforms, panel)
//! ├── light_controller.rs  # Registers the light's controls
//! ├── status.rs            # Status / error reporting hooks
//! └── config.rs            # Scene configuration
//! ```

pub mod binding;
pub mod color;
pub mod config;
pub mod constants;
pub mod helper;
pub mod light;
pub mod light_controller;
pub mod primitive;
pub mod scene;
pub mod status;

use std::sync::Arc;

use parking_lot::Mutex;

pub use binding::{
    Binding, BindingError, BindingGroup, BindingHandle, BindingPanel, ChangeCallback,
    ColorBinding, DegreesRadians, HexColor, Identity, NumberBinding, NumericRange, PanelEntry,
    Property, UnitTransform,
};
pub use color::{Color, ColorError};
pub use config::{LightConfig, SceneConfig};
pub use helper::SpotLightHelper;
pub use light::SpotLight;
pub use light_controller::{LightBindings, LightController};
pub use primitive::MeshData;
pub use scene::{
    Geometry, GeometryKind, Material, SceneGraph, SceneObject, TextureFilter, TextureRef,
    TextureWrap, Transform, build_scene,
};
pub use status::{StatusError, StatusReporter, TracingReporter, notify_loaded, notify_running};

/// Shared, lock-protected handle to session state.
///
/// Bindings and the renderer both hold one of these for the light, so a binding
/// can never outlive the object it edits.
pub type Shared<T> = Arc<Mutex<T>>;

/// Wrap a value in a [`Shared`] handle
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}
