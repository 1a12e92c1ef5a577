//! Animation primitives for container transforms.
//!
//! This module provides easing curves, value tweens, weighted tween sequences
//! and the controller that drives transition progress.
//!
//! # Example
//!
//! ```
//! use lattice_morph::animation::{Animatable, Curve, Easing, Tween};
//!
//! let curve = Curve::new(Easing::FastOutSlowIn);
//! let elevation = Tween::new(1.0_f32, 4.0);
//! let value = elevation.transform(curve.transform(0.5));
//! assert!(value > 2.5);
//! ```

mod controller;
mod curve;
mod sequence;
mod tween;

pub use controller::{AnimationController, AnimationStatus};
pub use curve::{CubicBezier, Curve, Easing, curved_progress, ease, lerp_eased};
pub use sequence::{FlippableSequence, SequenceError, TweenSequence, WeightedSegment};
pub use tween::{Animatable, ConstantTween, Lerp, Tween};
