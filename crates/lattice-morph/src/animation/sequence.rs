//! Weighted tween sequences.
//!
//! A [`TweenSequence`] splits the unit interval into consecutive segments whose
//! lengths are proportional to their weights, and plays one tween per segment.
//! [`FlippableSequence`] keeps a sequence together with its mirrored
//! counterpart (segments in the same order, weights in reverse order), which
//! is how the reverse choreography of a transition is derived.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::tween::Animatable;

/// Errors from building a [`TweenSequence`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceError {
    #[error("a tween sequence needs at least one segment")]
    Empty,
    #[error("segment {index} has weight {weight}; weights must be finite and positive")]
    InvalidWeight { index: usize, weight: f32 },
}

/// One tween and the share of the timeline it occupies.
pub struct WeightedSegment<T> {
    pub tween: Arc<dyn Animatable<T>>,
    pub weight: f32,
}

impl<T> WeightedSegment<T> {
    pub fn new(tween: impl Animatable<T> + 'static, weight: f32) -> Self {
        Self {
            tween: Arc::new(tween),
            weight,
        }
    }
}

impl<T> Clone for WeightedSegment<T> {
    fn clone(&self) -> Self {
        Self {
            tween: Arc::clone(&self.tween),
            weight: self.weight,
        }
    }
}

impl<T> fmt::Debug for WeightedSegment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedSegment")
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Interval {
    start: f32,
    end: f32,
}

/// Consecutive tweens over weighted sub-intervals of `[0, 1]`.
///
/// Each interval is half-open, `[start, end)`, so a boundary value belongs to
/// the segment that begins there. Progress of exactly 1 is mapped to the end
/// of the last segment.
pub struct TweenSequence<T> {
    segments: Vec<WeightedSegment<T>>,
    intervals: Vec<Interval>,
}

impl<T> TweenSequence<T> {
    /// Build a sequence, rejecting an empty segment list and weights that are
    /// not finite and strictly positive.
    pub fn new(segments: Vec<WeightedSegment<T>>) -> Result<Self, SequenceError> {
        if segments.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some((index, segment)) = segments
            .iter()
            .enumerate()
            .find(|(_, s)| !s.weight.is_finite() || s.weight <= 0.0)
        {
            return Err(SequenceError::InvalidWeight {
                index,
                weight: segment.weight,
            });
        }
        Ok(Self::from_validated(segments))
    }

    fn from_validated(segments: Vec<WeightedSegment<T>>) -> Self {
        let total: f32 = segments.iter().map(|s| s.weight).sum();
        let mut intervals = Vec::with_capacity(segments.len());
        let mut accumulated = 0.0_f32;
        for segment in &segments {
            let start = accumulated / total;
            accumulated += segment.weight;
            intervals.push(Interval {
                start,
                end: accumulated / total,
            });
        }
        if let Some(last) = intervals.last_mut() {
            last.end = 1.0;
        }
        Self {
            segments,
            intervals,
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment weights, in order.
    pub fn weights(&self) -> Vec<f32> {
        self.segments.iter().map(|s| s.weight).collect()
    }

    /// Segment boundaries from 0 to 1 inclusive.
    pub fn boundaries(&self) -> Vec<f32> {
        let mut boundaries: Vec<f32> = self.intervals.iter().map(|i| i.start).collect();
        boundaries.push(1.0);
        boundaries
    }

    /// The same segments, in the same order, with the weights reversed.
    ///
    /// Boundary `b` of this sequence becomes `1 - b` of the result.
    pub fn mirrored(&self) -> Self {
        let weights = self.segments.iter().rev().map(|s| s.weight);
        let segments = self
            .segments
            .iter()
            .zip(weights)
            .map(|(segment, weight)| WeightedSegment {
                tween: Arc::clone(&segment.tween),
                weight,
            })
            .collect();
        Self::from_validated(segments)
    }

    /// The value at progress `t`, clamped to `[0, 1]`.
    pub fn evaluate(&self, t: f32) -> T {
        let t = t.clamp(0.0, 1.0);
        let last = self.segments.len() - 1;
        if t >= 1.0 {
            return self.segments[last].tween.transform(1.0);
        }
        let index = self
            .intervals
            .iter()
            .position(|i| t >= i.start && t < i.end)
            .unwrap_or(last);
        let Interval { start, end } = self.intervals[index];
        let local = if end > start { (t - start) / (end - start) } else { 0.0 };
        self.segments[index].tween.transform(local)
    }
}

impl<T> Animatable<T> for TweenSequence<T> {
    fn transform(&self, t: f32) -> T {
        self.evaluate(t)
    }
}

impl<T> Clone for TweenSequence<T> {
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            intervals: self.intervals.clone(),
        }
    }
}

impl<T> fmt::Debug for TweenSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenSequence")
            .field("boundaries", &self.boundaries())
            .finish()
    }
}

/// A tween sequence paired with its mirrored form.
///
/// Both forms are built once; [`flipped`](Self::flipped) swaps them without
/// recomputing anything.
pub struct FlippableSequence<T> {
    forward: Arc<TweenSequence<T>>,
    mirrored: Arc<TweenSequence<T>>,
}

impl<T> FlippableSequence<T> {
    pub fn new(segments: Vec<WeightedSegment<T>>) -> Result<Self, SequenceError> {
        Ok(Self::from_sequence(TweenSequence::new(segments)?))
    }

    pub fn from_sequence(sequence: TweenSequence<T>) -> Self {
        let mirrored = sequence.mirrored();
        Self {
            forward: Arc::new(sequence),
            mirrored: Arc::new(mirrored),
        }
    }

    /// The sequence as currently oriented.
    pub fn sequence(&self) -> &TweenSequence<T> {
        &self.forward
    }

    /// The sequence with mirrored weights.
    pub fn flipped(&self) -> Self {
        Self {
            forward: Arc::clone(&self.mirrored),
            mirrored: Arc::clone(&self.forward),
        }
    }

    /// Evaluate either the sequence or its mirror.
    pub fn evaluate(&self, t: f32, flipped: bool) -> T {
        if flipped {
            self.mirrored.evaluate(t)
        } else {
            self.forward.evaluate(t)
        }
    }
}

impl<T> Clone for FlippableSequence<T> {
    fn clone(&self) -> Self {
        Self {
            forward: Arc::clone(&self.forward),
            mirrored: Arc::clone(&self.mirrored),
        }
    }
}

impl<T> fmt::Debug for FlippableSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlippableSequence")
            .field("forward", &self.forward)
            .field("mirrored", &self.mirrored)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tween::{ConstantTween, Tween};

    fn three_step() -> TweenSequence<f32> {
        TweenSequence::new(vec![
            WeightedSegment::new(Tween::new(0.0_f32, 1.0), 1.0),
            WeightedSegment::new(ConstantTween::new(1.0_f32), 1.0),
            WeightedSegment::new(Tween::new(1.0_f32, 0.0), 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            TweenSequence::<f32>::new(Vec::new()).unwrap_err(),
            SequenceError::Empty
        );
        let err = TweenSequence::new(vec![
            WeightedSegment::new(ConstantTween::new(0.0_f32), 1.0),
            WeightedSegment::new(ConstantTween::new(0.0_f32), 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, SequenceError::InvalidWeight { index: 1, weight: 0.0 });
        assert!(
            TweenSequence::new(vec![WeightedSegment::new(
                ConstantTween::new(0.0_f32),
                f32::NAN
            )])
            .is_err()
        );
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(three_step().boundaries(), vec![0.0, 0.2, 0.4, 1.0]);
    }

    #[test]
    fn test_boundary_belongs_to_next_segment() {
        let sequence = three_step();
        assert_eq!(sequence.evaluate(0.0), 0.0);
        assert!((sequence.evaluate(0.1) - 0.5).abs() < 1e-5);
        // 0.2 starts the constant segment.
        assert_eq!(sequence.evaluate(0.2), 1.0);
        // 0.4 starts the final fade.
        assert_eq!(sequence.evaluate(0.4), 1.0);
        assert!((sequence.evaluate(0.7) - 0.5).abs() < 1e-5);
        assert_eq!(sequence.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_clamps_progress() {
        let sequence = three_step();
        assert_eq!(sequence.evaluate(-1.0), 0.0);
        assert_eq!(sequence.evaluate(2.0), 0.0);
    }

    #[test]
    fn test_mirrored_boundaries() {
        let sequence = three_step();
        let mirrored = sequence.mirrored();
        assert_eq!(mirrored.weights(), vec![3.0, 1.0, 1.0]);
        for (b, m) in sequence
            .boundaries()
            .iter()
            .rev()
            .zip(mirrored.boundaries().iter())
        {
            assert!((1.0 - b - m).abs() < 1e-6);
        }
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let flippable = FlippableSequence::from_sequence(three_step());
        let twice = flippable.flipped().flipped();
        for step in 0..=20 {
            let t = step as f32 / 20.0;
            assert_eq!(twice.sequence().evaluate(t), flippable.sequence().evaluate(t));
        }
        assert_eq!(flippable.evaluate(0.5, true), flippable.flipped().sequence().evaluate(0.5));
    }
}
