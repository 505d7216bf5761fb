//! Properties and accessors over shared targets

use glam::Vec3;

use super::{BindingError, UnitTransform};
use crate::Shared;

/// A named field of `T` holding a `V`
pub struct Property<T, V> {
    key: &'static str,
    read: fn(&T) -> V,
    write: fn(&mut T, V),
}

impl<T, V> Clone for Property<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Property<T, V> {}

impl<T, V> Property<T, V> {
    /// Create a property from its key and field reader/writer
    pub fn new(key: &'static str, read: fn(&T) -> V, write: fn(&mut T, V)) -> Self {
        Self { key, read, write }
    }

    /// Property key
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Read the property from a target
    pub fn get(&self, target: &T) -> V {
        (self.read)(target)
    }

    /// Write the property on a target
    pub fn set(&self, target: &mut T, value: V) {
        (self.write)(target, value)
    }
}

/// Get/set capability exposed to a control
pub trait Accessor<V>: Send + Sync {
    /// Key of the underlying property
    fn key(&self) -> &'static str;

    /// Current value in the control's domain
    fn get(&self) -> V;

    /// Convert `value` into the property's domain and assign it
    fn set(&self, value: V) -> Result<(), BindingError>;
}

/// Accessor for a property of a shared target, seen through a transform
pub struct PropertyAccessor<T, X: UnitTransform> {
    target: Shared<T>,
    property: Property<T, X::Property>,
    transform: X,
}

impl<T, X: UnitTransform> PropertyAccessor<T, X> {
    pub fn new(target: Shared<T>, property: Property<T, X::Property>, transform: X) -> Self {
        Self {
            target,
            property,
            transform,
        }
    }
}

impl<T, X> Accessor<X::Control> for PropertyAccessor<T, X>
where
    T: Send + 'static,
    X: UnitTransform,
{
    fn key(&self) -> &'static str {
        self.property.key()
    }

    fn get(&self) -> X::Control {
        let value = self.property.get(&self.target.lock());
        self.transform.to_control(value)
    }

    fn set(&self, value: X::Control) -> Result<(), BindingError> {
        let value = self.transform.to_property(value)?;
        self.property.set(&mut self.target.lock(), value);
        Ok(())
    }
}

/// Accessor for one component (0 = x, 1 = y, 2 = z) of a vector property
pub struct VectorAxisAccessor<T> {
    target: Shared<T>,
    property: Property<T, Vec3>,
    axis: usize,
}

impl<T> VectorAxisAccessor<T> {
    pub fn new(target: Shared<T>, property: Property<T, Vec3>, axis: usize) -> Self {
        debug_assert!(axis < 3, "vector axis out of range: {axis}");
        Self {
            target,
            property,
            axis,
        }
    }
}

impl<T: Send + 'static> Accessor<f32> for VectorAxisAccessor<T> {
    fn key(&self) -> &'static str {
        self.property.key()
    }

    fn get(&self) -> f32 {
        self.property.get(&self.target.lock())[self.axis]
    }

    fn set(&self, value: f32) -> Result<(), BindingError> {
        let mut target = self.target.lock();
        let mut vector = self.property.get(&target);
        vector[self.axis] = value;
        self.property.set(&mut target, vector);
        Ok(())
    }
}
