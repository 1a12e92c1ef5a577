//! Easing curves for transition progress.
//!
//! Easing functions map a linear progress value (0.0 to 1.0) to a transformed
//! value that creates smoother, more natural-looking motion. [`Curve`] wraps an
//! easing with a direction so the same easing can be played mirrored when a
//! transition runs backwards.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::controller::AnimationStatus;

/// A cubic Bézier easing through `(0, 0)`, `(a, b)`, `(c, d)` and `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl CubicBezier {
    /// Accuracy of the curve parameter search.
    const ERROR_BOUND: f32 = 0.001;
    /// Upper bound on bisection steps; the interval halves each time.
    const MAX_ITERATIONS: u32 = 64;

    /// The standard Material motion curve: quick start, long gentle settle.
    pub const FAST_OUT_SLOW_IN: Self = Self::new(0.4, 0.0, 0.2, 1.0);

    /// Create a curve from its two inner control points.
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    #[inline]
    fn evaluate_cubic(a: f32, b: f32, m: f32) -> f32 {
        3.0 * a * (1.0 - m) * (1.0 - m) * m + 3.0 * b * (1.0 - m) * m * m + m * m * m
    }

    /// Map `t` through the curve. The endpoints map to themselves exactly.
    pub fn transform(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        let mut start = 0.0_f32;
        let mut end = 1.0_f32;
        for _ in 0..Self::MAX_ITERATIONS {
            let midpoint = (start + end) / 2.0;
            let estimate = Self::evaluate_cubic(self.a, self.c, midpoint);
            if (t - estimate).abs() < Self::ERROR_BOUND {
                return Self::evaluate_cubic(self.b, self.d, midpoint);
            }
            if estimate < t {
                start = midpoint;
            } else {
                end = midpoint;
            }
        }
        Self::evaluate_cubic(self.b, self.d, (start + end) / 2.0)
    }
}

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
    /// Cubic ease-in (more pronounced than quadratic).
    EaseInCubic,
    /// Cubic ease-out (more pronounced than quadratic).
    EaseOutCubic,
    /// Cubic ease-in-out (more pronounced than quadratic).
    EaseInOutCubic,
    /// Sinusoidal ease-in.
    EaseInSine,
    /// Sinusoidal ease-out.
    EaseOutSine,
    /// Sinusoidal ease-in-out.
    EaseInOutSine,
    /// Material "standard" motion, `cubic(0.4, 0.0, 0.2, 1.0)`.
    FastOutSlowIn,
    /// An arbitrary cubic Bézier.
    Cubic(CubicBezier),
}

/// Apply an easing function to a progress value.
///
/// # Example
///
/// ```
/// use lattice_morph::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::FastOutSlowIn, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => ease_in_quad(t),
        Easing::EaseOut => ease_out_quad(t),
        Easing::EaseInOut => ease_in_out_quad(t),
        Easing::EaseInCubic => ease_in_cubic(t),
        Easing::EaseOutCubic => ease_out_cubic(t),
        Easing::EaseInOutCubic => ease_in_out_cubic(t),
        Easing::EaseInSine => ease_in_sine(t),
        Easing::EaseOutSine => ease_out_sine(t),
        Easing::EaseInOutSine => ease_in_out_sine(t),
        Easing::FastOutSlowIn => CubicBezier::FAST_OUT_SLOW_IN.transform(t),
        Easing::Cubic(bezier) => bezier.transform(t),
    }
}

/// Interpolate between two values using an easing function.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    let eased_t = ease(easing, t);
    start + (end - start) * eased_t
}

// =============================================================================
// Quadratic Easing
// =============================================================================

#[inline]
fn ease_in_quad(t: f32) -> f32 {
    t * t
}

#[inline]
fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

// =============================================================================
// Cubic Easing
// =============================================================================

#[inline]
fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// =============================================================================
// Sinusoidal Easing
// =============================================================================

#[inline]
fn ease_in_sine(t: f32) -> f32 {
    1.0 - ((t * PI) / 2.0).cos()
}

#[inline]
fn ease_out_sine(t: f32) -> f32 {
    ((t * PI) / 2.0).sin()
}

#[inline]
fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

// =============================================================================
// Directional Curves
// =============================================================================

/// An easing that can be played mirrored.
///
/// The flipped form of `f` is `1 - f(1 - t)`: the same motion seen with time
/// running backwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Curve {
    easing: Easing,
    flipped: bool,
}

impl Curve {
    /// A curve that plays `easing` as-is.
    pub const fn new(easing: Easing) -> Self {
        Self {
            easing,
            flipped: false,
        }
    }

    /// The underlying easing.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Whether this curve is the mirrored form of its easing.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The mirrored curve. Flipping twice gives back the original.
    pub fn flipped(self) -> Self {
        Self {
            easing: self.easing,
            flipped: !self.flipped,
        }
    }

    /// Map `t` through the curve.
    pub fn transform(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self.flipped {
            1.0 - ease(self.easing, 1.0 - t)
        } else {
            ease(self.easing, t)
        }
    }
}

impl From<Easing> for Curve {
    fn from(easing: Easing) -> Self {
        Self::new(easing)
    }
}

/// Apply `curve` to raw controller progress.
///
/// While the controller runs in reverse and a `reverse_curve` is given, that
/// curve is used instead. Progress of exactly 0 or 1 is returned untouched.
pub fn curved_progress(
    progress: f32,
    status: AnimationStatus,
    curve: Curve,
    reverse_curve: Option<Curve>,
) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        return t;
    }
    match (status, reverse_curve) {
        (AnimationStatus::Reverse, Some(reverse)) => reverse.transform(t),
        _ => curve.transform(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(ease(Easing::Linear, 0.0), 0.0);
        assert_eq!(ease(Easing::Linear, 0.5), 0.5);
        assert_eq!(ease(Easing::Linear, 1.0), 1.0);
    }

    #[test]
    fn test_ease_in_out() {
        assert_eq!(ease(Easing::EaseInOut, 0.0), 0.0);
        assert_eq!(ease(Easing::EaseInOut, 0.5), 0.5);
        assert_eq!(ease(Easing::EaseInOut, 1.0), 1.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(ease(Easing::Linear, -0.5), 0.0);
        assert_eq!(ease(Easing::Linear, 1.5), 1.0);
    }

    #[test]
    fn test_lerp_eased() {
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 0.0), 100.0);
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 0.5), 150.0);
        assert_eq!(lerp_eased(Easing::Linear, 100.0, 200.0, 1.0), 200.0);
    }

    #[test]
    fn test_fast_out_slow_in_shape() {
        assert_eq!(ease(Easing::FastOutSlowIn, 0.0), 0.0);
        assert_eq!(ease(Easing::FastOutSlowIn, 1.0), 1.0);
        // Decelerating: ahead of linear throughout the middle.
        for t in [0.25, 0.5, 0.75] {
            assert!(ease(Easing::FastOutSlowIn, t) > t);
        }
        let mid = ease(Easing::FastOutSlowIn, 0.5);
        assert!((mid - 0.774).abs() < 0.01, "got {mid}");
    }

    #[test]
    fn test_cubic_is_monotonic() {
        let bezier = CubicBezier::FAST_OUT_SLOW_IN;
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = bezier.transform(step as f32 / 20.0);
            assert!(value >= previous - CubicBezier::ERROR_BOUND);
            previous = value;
        }
    }

    #[test]
    fn test_flipped_curve() {
        let curve = Curve::new(Easing::FastOutSlowIn);
        let flipped = curve.flipped();
        assert!(flipped.is_flipped());
        assert_eq!(flipped.flipped(), curve);

        assert_eq!(flipped.transform(0.0), 0.0);
        assert_eq!(flipped.transform(1.0), 1.0);
        let t = 0.3;
        assert!((flipped.transform(t) - (1.0 - curve.transform(1.0 - t))).abs() < 1e-6);
        // The mirrored decelerating curve accelerates.
        assert!(flipped.transform(0.5) < 0.5);
    }

    #[test]
    fn test_curved_progress_direction() {
        let curve = Curve::new(Easing::FastOutSlowIn);
        let reverse = Some(curve.flipped());

        let forward = curved_progress(0.4, AnimationStatus::Forward, curve, reverse);
        assert_eq!(forward, curve.transform(0.4));

        let backward = curved_progress(0.4, AnimationStatus::Reverse, curve, reverse);
        assert_eq!(backward, curve.flipped().transform(0.4));

        let no_reverse = curved_progress(0.4, AnimationStatus::Reverse, curve, None);
        assert_eq!(no_reverse, forward);

        assert_eq!(curved_progress(1.0, AnimationStatus::Reverse, curve, reverse), 1.0);
        assert_eq!(curved_progress(0.0, AnimationStatus::Forward, curve, reverse), 0.0);
    }

    #[test]
    fn test_easing_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            easing: Easing,
        }
        let holder: Holder = toml::from_str("easing = \"fast_out_slow_in\"").unwrap();
        assert_eq!(holder.easing, Easing::FastOutSlowIn);

        let holder: Holder =
            toml::from_str("[easing.cubic]\na = 0.4\nb = 0.0\nc = 0.2\nd = 1.0").unwrap();
        assert_eq!(holder.easing, Easing::Cubic(CubicBezier::FAST_OUT_SLOW_IN));
    }
}
