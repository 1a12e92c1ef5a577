//! Property system for Lattice Morph.
//!
//! Properties hold the observable state of hosts and controllers. When a
//! property changes, its owner emits the matching [`Signal`](crate::Signal)
//! so that interested parties can react.
//!
//! # Example
//!
//! ```
//! use lattice_morph_core::{Property, Signal};
//!
//! struct Toggle {
//!     visible: Property<bool>,
//!     visibility_changed: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn set_visible(&self, visible: bool) {
//!         if self.visible.set(visible) {
//!             self.visibility_changed.emit(visible);
//!         }
//!     }
//! }
//!
//! let toggle = Toggle { visible: Property::new(true), visibility_changed: Signal::new() };
//! toggle.set_visible(false);
//! assert!(!toggle.visible.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `set()` compares the new value with the current one and reports whether
/// the value actually changed; the owner decides whether to notify.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Property<bool>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_reports_change() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
        assert!(!prop.set(42));
        assert!(prop.set(100));
        assert_eq!(prop.get(), 100);
    }

    #[test]
    fn test_property_replace() {
        let prop = Property::new(Some(3.0_f32));
        assert_eq!(prop.replace(Some(3.0)), None);
        assert_eq!(prop.replace(None), Some(Some(3.0)));
        assert_eq!(prop.get(), None);
    }

    #[test]
    fn test_property_with_and_silent() {
        let prop = Property::new(vec![1, 2, 3]);
        assert_eq!(prop.with(|v| v.len()), 3);
        prop.set_silent(Vec::new());
        assert!(prop.with(|v| v.is_empty()));
    }

    #[test]
    fn test_property_clone_is_independent() {
        let a = Property::new(1);
        let b = a.clone();
        a.set(2);
        assert_eq!(b.get(), 1);
    }
}
