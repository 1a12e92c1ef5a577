//! The choreography of a container transform.
//!
//! [`MorphTweens`] holds every tween a transition evaluates per frame, built
//! once from a [`TransitionStyle`]. [`MorphTweens::frame`] turns raw progress
//! and controller status into a [`MorphFrame`], the complete set of values the
//! paint layer needs.
//!
//! Geometry (bounds, shape, elevation) follows the eased progress. Colors and
//! opacities follow the raw progress through weighted sequences; when a fully
//! open container closes, those sequences are played mirrored so that the
//! closing motion is the opening motion run backwards.

use lattice_morph_render::{Color, Rect, ShapeBorder, Size};

use super::style::{TransitionKind, TransitionStyle};
use crate::animation::{
    Animatable, AnimationStatus, ConstantTween, Curve, FlippableSequence, SequenceError, Tween,
    TweenSequence, WeightedSegment, curved_progress,
};

/// Scrim drawn over the navigator while a container is open.
pub const SCRIM_COLOR: Color = Color::BLACK_54;

/// Everything needed to paint one frame of a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphFrame {
    /// Raw controller progress.
    pub progress: f32,
    /// Progress after the easing curve.
    pub curved: f32,
    /// Whether the mirrored choreography was used.
    pub flipped: bool,
    pub scrim: Color,
    /// Surface bounds in viewport coordinates.
    pub rect: Rect,
    pub shape: ShapeBorder,
    pub elevation: f32,
    pub color: Color,
    pub shadow_color: Color,
    pub surface_tint_color: Color,
    pub closed_opacity: f32,
    pub open_opacity: f32,
    /// Natural size of the closed content.
    pub closed_size: Size,
    /// Natural size of the open content.
    pub open_size: Size,
}

impl MorphFrame {
    /// A fully open container filling `viewport`, with no scrim.
    pub fn settled_open(style: &TransitionStyle, viewport: Rect) -> Self {
        Self {
            progress: 1.0,
            curved: 1.0,
            flipped: false,
            scrim: Color::TRANSPARENT,
            rect: viewport,
            shape: style.open_shape,
            elevation: style.open_elevation,
            color: style.open_color,
            shadow_color: style.open_shadow_color,
            surface_tint_color: style.open_surface_tint_color,
            closed_opacity: 0.0,
            open_opacity: 1.0,
            closed_size: viewport.size,
            open_size: viewport.size,
        }
    }
}

/// Every tween of a transition.
#[derive(Debug, Clone)]
pub struct MorphTweens {
    pub curve: Curve,
    pub color: FlippableSequence<Color>,
    pub closed_opacity: FlippableSequence<f32>,
    pub open_opacity: FlippableSequence<f32>,
    pub scrim_fade_in: TweenSequence<Color>,
    pub scrim_fade_out: Tween<Color>,
    pub shape: Tween<ShapeBorder>,
    pub elevation: Tween<f32>,
    pub shadow_color: Tween<Color>,
    pub surface_tint_color: Tween<Color>,
}

impl MorphTweens {
    /// Build the tweens for `style`. `middle_color` is used when the style
    /// does not name one.
    pub fn new(style: &TransitionStyle, middle_color: Color) -> Result<Self, SequenceError> {
        let kind = style.transition_kind;
        let middle = style.middle_color.unwrap_or(middle_color);
        Ok(Self {
            curve: Curve::new(style.easing),
            color: color_sequence(kind, style.closed_color, style.open_color, middle)?,
            closed_opacity: closed_opacity_sequence(kind)?,
            open_opacity: open_opacity_sequence(kind)?,
            scrim_fade_in: scrim_fade_in_sequence()?,
            scrim_fade_out: Tween::new(Color::TRANSPARENT, SCRIM_COLOR),
            shape: Tween::new(style.closed_shape, style.open_shape),
            elevation: Tween::new(style.closed_elevation, style.open_elevation),
            shadow_color: Tween::new(style.closed_shadow_color, style.open_shadow_color),
            surface_tint_color: Tween::new(
                style.closed_surface_tint_color,
                style.open_surface_tint_color,
            ),
        })
    }

    /// Evaluate one frame.
    ///
    /// `interrupted` tells whether the controller changed direction while
    /// still running. The mirrored choreography and the reverse curve are
    /// used only for a reverse run that started from rest, so an interrupted
    /// transition retraces exactly the values it was showing.
    pub fn frame(
        &self,
        progress: f32,
        status: AnimationStatus,
        interrupted: bool,
        begin: Rect,
        end: Rect,
        closed_size: Size,
    ) -> MorphFrame {
        let flipped = status == AnimationStatus::Reverse && !interrupted;
        let reverse_curve = (!interrupted).then(|| self.curve.flipped());
        let curved = curved_progress(progress, status, self.curve, reverse_curve);

        let scrim = if flipped {
            self.scrim_fade_out.transform(curved)
        } else {
            self.scrim_fade_in.evaluate(curved)
        };

        MorphFrame {
            progress,
            curved,
            flipped,
            scrim,
            rect: Tween::new(begin, end).transform(curved),
            shape: self.shape.transform(curved),
            elevation: self.elevation.transform(curved),
            color: self.color.evaluate(progress, flipped),
            shadow_color: self.shadow_color.transform(curved),
            surface_tint_color: self.surface_tint_color.transform(curved),
            closed_opacity: self.closed_opacity.evaluate(progress, flipped),
            open_opacity: self.open_opacity.evaluate(progress, flipped),
            closed_size,
            open_size: end.size,
        }
    }
}

/// Surface color from `closed` to `open`.
///
/// A fade holds the closed color for the first fifth, blends over the second
/// and holds the open color after. A fade-through blends to `middle` over the
/// first fifth and on to `open` over the rest.
pub fn color_sequence(
    kind: TransitionKind,
    closed: Color,
    open: Color,
    middle: Color,
) -> Result<FlippableSequence<Color>, SequenceError> {
    let segments = match kind {
        TransitionKind::Fade => vec![
            WeightedSegment::new(ConstantTween::new(closed), 1.0),
            WeightedSegment::new(Tween::new(closed, open), 1.0),
            WeightedSegment::new(ConstantTween::new(open), 3.0),
        ],
        TransitionKind::FadeThrough => vec![
            WeightedSegment::new(Tween::new(closed, middle), 1.0),
            WeightedSegment::new(Tween::new(middle, open), 4.0),
        ],
    };
    FlippableSequence::new(segments)
}

/// Opacity of the closed content.
pub fn closed_opacity_sequence(kind: TransitionKind) -> Result<FlippableSequence<f32>, SequenceError> {
    let segments = match kind {
        TransitionKind::Fade => vec![WeightedSegment::new(ConstantTween::new(1.0_f32), 1.0)],
        TransitionKind::FadeThrough => vec![
            WeightedSegment::new(Tween::new(1.0_f32, 0.0), 1.0),
            WeightedSegment::new(ConstantTween::new(0.0_f32), 4.0),
        ],
    };
    FlippableSequence::new(segments)
}

/// Opacity of the open content.
pub fn open_opacity_sequence(kind: TransitionKind) -> Result<FlippableSequence<f32>, SequenceError> {
    let segments = match kind {
        TransitionKind::Fade => vec![
            WeightedSegment::new(ConstantTween::new(0.0_f32), 1.0),
            WeightedSegment::new(Tween::new(0.0_f32, 1.0), 1.0),
            WeightedSegment::new(ConstantTween::new(1.0_f32), 3.0),
        ],
        TransitionKind::FadeThrough => vec![
            WeightedSegment::new(ConstantTween::new(0.0_f32), 1.0),
            WeightedSegment::new(Tween::new(0.0_f32, 1.0), 4.0),
        ],
    };
    FlippableSequence::new(segments)
}

/// Scrim darkening over the first fifth, then held.
pub fn scrim_fade_in_sequence() -> Result<TweenSequence<Color>, SequenceError> {
    TweenSequence::new(vec![
        WeightedSegment::new(Tween::new(Color::TRANSPARENT, SCRIM_COLOR), 1.0),
        WeightedSegment::new(ConstantTween::new(SCRIM_COLOR), 4.0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn tweens(kind: TransitionKind) -> MorphTweens {
        let style = TransitionStyle::default()
            .with_kind(kind)
            .with_closed_color(Color::RED)
            .with_open_color(Color::BLUE);
        MorphTweens::new(&style, Color::WHITE).unwrap()
    }

    #[test]
    fn test_fade_color_holds_then_blends() {
        let color = color_sequence(TransitionKind::Fade, Color::RED, Color::BLUE, Color::WHITE).unwrap();
        assert_eq!(color.evaluate(0.0, false), Color::RED);
        assert_eq!(color.evaluate(0.1, false), Color::RED);
        assert!(color.evaluate(0.3, false).approx_eq(&Color::new(0.5, 0.0, 0.5, 1.0), EPS));
        assert_eq!(color.evaluate(0.4, false), Color::BLUE);
        assert_eq!(color.evaluate(1.0, false), Color::BLUE);
    }

    #[test]
    fn test_fade_through_passes_middle() {
        let color =
            color_sequence(TransitionKind::FadeThrough, Color::RED, Color::BLUE, Color::WHITE).unwrap();
        assert_eq!(color.evaluate(0.2, false), Color::WHITE);
        assert_eq!(color.evaluate(1.0, false), Color::BLUE);

        let closed = closed_opacity_sequence(TransitionKind::FadeThrough).unwrap();
        let open = open_opacity_sequence(TransitionKind::FadeThrough).unwrap();
        assert!((closed.evaluate(0.1, false) - 0.5).abs() < EPS);
        assert_eq!(closed.evaluate(0.2, false), 0.0);
        assert_eq!(open.evaluate(0.2, false), 0.0);
        assert!((open.evaluate(0.6, false) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_scrim_reaches_full_at_first_boundary() {
        let scrim = scrim_fade_in_sequence().unwrap();
        assert_eq!(scrim.evaluate(0.0), Color::TRANSPARENT);
        assert_eq!(scrim.evaluate(0.2), SCRIM_COLOR);
        assert_eq!(scrim.evaluate(0.9), SCRIM_COLOR);
    }

    #[test]
    fn test_frame_geometry_uses_curve() {
        let tweens = tweens(TransitionKind::Fade);
        let begin = Rect::new(16.0, 200.0, 368.0, 96.0);
        let end = Rect::new(0.0, 0.0, 400.0, 800.0);
        let frame = tweens.frame(0.5, AnimationStatus::Forward, false, begin, end, begin.size);

        let curved = tweens.curve.transform(0.5);
        assert_eq!(frame.curved, curved);
        assert!(!frame.flipped);
        assert!((frame.rect.width() - (368.0 + 32.0 * curved)).abs() < 1e-3);
        assert!((frame.elevation - (1.0 + 3.0 * curved)).abs() < 1e-5);
        assert_eq!(frame.color, Color::BLUE);
        assert_eq!(frame.scrim, SCRIM_COLOR);
        assert_eq!(frame.open_size, end.size);
        assert_eq!(frame.closed_size, begin.size);
    }

    #[test]
    fn test_frame_endpoints() {
        let tweens = tweens(TransitionKind::FadeThrough);
        let begin = Rect::new(16.0, 200.0, 368.0, 96.0);
        let end = Rect::new(0.0, 0.0, 400.0, 800.0);

        let start = tweens.frame(0.0, AnimationStatus::Forward, false, begin, end, begin.size);
        assert_eq!(start.rect, begin);
        assert_eq!(start.color, Color::RED);
        assert_eq!(start.closed_opacity, 1.0);
        assert_eq!(start.open_opacity, 0.0);

        let finish = tweens.frame(1.0, AnimationStatus::Completed, false, begin, end, begin.size);
        assert_eq!(finish.rect, end);
        assert_eq!(finish.shape, ShapeBorder::rectangle());
        assert_eq!(finish.elevation, 4.0);
        assert_eq!(finish.open_opacity, 1.0);
    }

    #[test]
    fn test_reverse_from_rest_is_flipped() {
        let tweens = tweens(TransitionKind::Fade);
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let frame = tweens.frame(0.9, AnimationStatus::Reverse, false, rect, rect, rect.size);
        assert!(frame.flipped);
        assert_eq!(frame.curved, tweens.curve.flipped().transform(0.9));
        assert_eq!(frame.scrim, tweens.scrim_fade_out.transform(frame.curved));
        // Mirrored open opacity: the open content is still fully shown at 0.9.
        assert_eq!(frame.open_opacity, 1.0);

        let interrupted = tweens.frame(0.9, AnimationStatus::Reverse, true, rect, rect, rect.size);
        assert!(!interrupted.flipped);
        assert_eq!(interrupted.curved, tweens.curve.transform(0.9));
    }
}
