//! Core renderer trait defining the 2D drawing interface.
//!
//! This module defines the [`Renderer`] trait used by the transition paint
//! layer and by content, plus [`RenderStateStack`], a reusable implementation
//! of save/restore, transform, clip and opacity bookkeeping.

use crate::paint::{BoxShadow, Paint, Stroke};
use crate::transform::Transform2D;
use crate::types::{Color, CornerRadii, Rect, RoundedRect, Size};

/// Statistics from a recorded frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of draw commands recorded.
    pub draw_calls: u32,
    /// Number of draw commands skipped because they were invisible or clipped out.
    pub culled: u32,
    /// Deepest save/restore nesting reached.
    pub max_depth: u32,
}

/// The 2D rendering interface.
///
/// # Frame Lifecycle
///
/// ```ignore
/// renderer.begin_frame(Color::WHITE, viewport_size);
///
/// renderer.save();
/// renderer.translate(10.0, 10.0);
/// renderer.fill_rect(rect, Color::RED);
/// renderer.restore();
///
/// let stats = renderer.end_frame();
/// ```
///
/// # State Stack
///
/// `save()`/`restore()` capture the transform, clip and opacity.
pub trait Renderer {
    /// Begin a new frame cleared to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// End the current frame.
    fn end_frame(&mut self) -> FrameStats;

    // =========================================================================
    // State Management
    // =========================================================================

    /// Save the current render state (transform, clip, opacity).
    fn save(&mut self);

    /// Restore the previously saved render state.
    fn restore(&mut self);

    // =========================================================================
    // Transform Operations
    // =========================================================================

    /// Get the current transform.
    fn transform(&self) -> &Transform2D;

    /// Concatenate a transform with the current one (applied before it).
    fn concat_transform(&mut self, transform: &Transform2D);

    /// Apply a translation.
    fn translate(&mut self, tx: f32, ty: f32);

    /// Apply a scale.
    fn scale(&mut self, sx: f32, sy: f32);

    // =========================================================================
    // Clipping
    // =========================================================================

    /// Intersect the clip with a rectangle in local coordinates.
    fn clip_rect(&mut self, rect: Rect);

    /// Intersect the clip with a rounded rectangle in local coordinates.
    fn clip_rounded_rect(&mut self, rect: RoundedRect);

    /// Device-space bounds of the current clip, if any.
    fn clip_bounds(&self) -> Option<Rect>;

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>);

    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, paint: impl Into<Paint>);

    /// Stroke the outline of a rounded rectangle.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke);

    /// Draw the outer shadow of a rounded rectangle.
    fn draw_box_shadow_rounded(&mut self, rect: RoundedRect, shadow: &BoxShadow);

    // =========================================================================
    // Opacity
    // =========================================================================

    /// Set the opacity multiplied into everything drawn afterwards.
    fn set_opacity(&mut self, opacity: f32);

    /// The current opacity.
    fn opacity(&self) -> f32;
}

/// Saved renderer state for save/restore operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Transform at this state.
    pub transform: Transform2D,
    /// Device-space clip bounds.
    pub clip: Option<Rect>,
    /// Device-space rounded clip, when the innermost clip is rounded.
    pub rounded_clip: Option<RoundedRect>,
    /// Opacity at this state.
    pub opacity: f32,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            clip: None,
            rounded_clip: None,
            opacity: 1.0,
        }
    }
}

/// Common state management for renderers.
#[derive(Debug, Clone, Default)]
pub struct RenderStateStack {
    stack: Vec<RenderState>,
    current: RenderState,
}

impl RenderStateStack {
    /// Create a new state stack with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    #[inline]
    pub fn current(&self) -> &RenderState {
        &self.current
    }

    /// Save the current state.
    pub fn save(&mut self) {
        self.stack.push(self.current.clone());
    }

    /// Restore the previously saved state. Returns `false` if nothing was saved.
    pub fn restore(&mut self) -> bool {
        match self.stack.pop() {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    /// Reset to default state and clear the stack.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = RenderState::default();
    }

    /// Get the current transform.
    #[inline]
    pub fn transform(&self) -> &Transform2D {
        &self.current.transform
    }

    /// Concatenate a transform with the current transform.
    #[inline]
    pub fn concat_transform(&mut self, transform: &Transform2D) {
        self.current.transform = self.current.transform.then(transform);
    }

    /// Apply a translation.
    #[inline]
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat_transform(&Transform2D::translate(tx, ty));
    }

    /// Apply a scale.
    #[inline]
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat_transform(&Transform2D::scale_xy(sx, sy));
    }

    /// Intersect the clip with a local-space rectangle.
    pub fn clip_rect(&mut self, rect: Rect) {
        let transformed = self.current.transform.transform_rect(&rect);
        self.intersect_clip(transformed);
    }

    /// Intersect the clip with a local-space rounded rectangle.
    pub fn clip_rounded_rect(&mut self, rect: RoundedRect) {
        let bounds = self.current.transform.transform_rect(&rect.rect);
        let (sx, sy) = self.current.transform.scale_factors();
        let scale = sx.min(sy);
        let radii = CornerRadii {
            top_left: rect.radii.top_left * scale,
            top_right: rect.radii.top_right * scale,
            bottom_right: rect.radii.bottom_right * scale,
            bottom_left: rect.radii.bottom_left * scale,
        };
        self.intersect_clip(bounds);
        self.current.rounded_clip = Some(RoundedRect::with_radii(bounds, radii));
    }

    fn intersect_clip(&mut self, device_rect: Rect) {
        self.current.clip = Some(match self.current.clip {
            Some(existing) => existing
                .intersect(&device_rect)
                .unwrap_or(Rect::new(device_rect.left(), device_rect.top(), 0.0, 0.0)),
            None => device_rect,
        });
    }

    /// Get the current clip bounds.
    #[inline]
    pub fn clip_bounds(&self) -> Option<Rect> {
        self.current.clip
    }

    /// Set the opacity, clamped to `[0, 1]`.
    #[inline]
    pub fn set_opacity(&mut self, opacity: f32) {
        self.current.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Get the stack depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
