//! Value interpolation.
//!
//! [`Lerp`] is implemented for every value a container transform animates.
//! [`Animatable`] is the common interface of tweens and tween sequences: map a
//! progress value in `[0, 1]` to a value.

use lattice_morph_render::{Color, CornerRadii, Point, Rect, ShapeBorder, Size};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Clone + Send + Sync + 'static {
    /// Interpolate from `self` toward `other` by `t`.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

macro_rules! impl_lerp_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Lerp for $ty {
                #[inline]
                fn lerp(&self, other: &Self, t: f32) -> Self {
                    (*self).lerp(*other, t)
                }
            }
        )*
    };
}

impl_lerp_by_value!(Color, CornerRadii, Point, Rect, ShapeBorder, Size);

/// Something that produces a value for a progress in `[0, 1]`.
pub trait Animatable<T>: Send + Sync {
    /// The value at progress `t`.
    fn transform(&self, t: f32) -> T;
}

/// Interpolates between `begin` and `end`.
///
/// Progress of exactly 0 and 1 yields `begin` and `end` unchanged, without
/// going through [`Lerp`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    pub begin: T,
    pub end: T,
}

impl<T> Tween<T> {
    pub const fn new(begin: T, end: T) -> Self {
        Self { begin, end }
    }

    /// The same tween running from `end` to `begin`.
    pub fn reversed(self) -> Self {
        Self {
            begin: self.end,
            end: self.begin,
        }
    }
}

impl<T: Lerp> Animatable<T> for Tween<T> {
    fn transform(&self, t: f32) -> T {
        if t <= 0.0 {
            self.begin.clone()
        } else if t >= 1.0 {
            self.end.clone()
        } else {
            self.begin.lerp(&self.end, t)
        }
    }
}

/// Holds one value regardless of progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantTween<T> {
    pub value: T,
}

impl<T> ConstantTween<T> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Send + Sync> Animatable<T> for ConstantTween<T> {
    fn transform(&self, _t: f32) -> T {
        self.value.clone()
    }
}
