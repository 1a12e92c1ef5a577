//! Prelude module for Lattice Morph.
//!
//! ```ignore
//! use lattice_morph::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot and property system (`Signal`, `Property`)
//! - Animation (`AnimationController`, `Easing`, `Tween`)
//! - Container transforms (`ContainerTransform`, `ContainerTransformRoute`, ...)
//! - Geometry and drawing types (`Rect`, `Size`, `Color`, `DisplayList`)

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::{ConnectionId, FrameScheduler, Property, Signal};

// ============================================================================
// Animation
// ============================================================================

pub use crate::animation::{
    Animatable, AnimationController, AnimationStatus, Curve, Easing, Tween, TweenSequence,
};

// ============================================================================
// Container Transforms
// ============================================================================

pub use crate::container::{
    ClipBehavior, CloseHandle, ClosedStateHost, ContainerTransform, ContainerTransformRoute,
    Content, HostRegistry, NavigationHost, Tag, TransitionKind, TransitionRoute, TransitionStyle,
};
pub use crate::layout::LayoutBox;
pub use crate::{MorphError, MorphResult};

// ============================================================================
// Geometry and Drawing
// ============================================================================

pub use crate::render::{Color, DisplayList, Point, Rect, Renderer, ShapeBorder, Size};
