//! A recording renderer backend.
//!
//! [`DisplayList`] implements [`Renderer`] by recording every draw call
//! together with the transform, clip and opacity in effect at that moment.
//! The recorded commands can be replayed by a rasterizing backend or inspected
//! directly.

use crate::error::{RenderError, RenderResult};
use crate::paint::{BoxShadow, Paint, Stroke};
use crate::renderer::{FrameStats, RenderStateStack, Renderer};
use crate::transform::Transform2D;
use crate::types::{Color, Rect, RoundedRect, Size};

/// A single drawing operation in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, paint: Paint },
    FillRoundedRect { rect: RoundedRect, paint: Paint },
    StrokeRoundedRect { rect: RoundedRect, stroke: Stroke },
    BoxShadow { rect: RoundedRect, shadow: BoxShadow },
}

impl DrawOp {
    /// Bounds touched by the operation, in local coordinates.
    pub fn local_bounds(&self) -> Rect {
        match self {
            Self::FillRect { rect, .. } => *rect,
            Self::FillRoundedRect { rect, .. } => rect.rect,
            Self::StrokeRoundedRect { rect, stroke } => rect.rect.inflate(stroke.width / 2.0),
            Self::BoxShadow { rect, shadow } => shadow.expanded_bounds(rect.rect),
        }
    }

    /// The color the operation paints with, before opacity.
    pub fn color(&self) -> Color {
        match self {
            Self::FillRect { paint, .. } | Self::FillRoundedRect { paint, .. } => paint.color(),
            Self::StrokeRoundedRect { stroke, .. } => stroke.paint.color(),
            Self::BoxShadow { shadow, .. } => shadow.color,
        }
    }
}

/// A recorded draw operation with the render state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub op: DrawOp,
    pub transform: Transform2D,
    pub clip: Option<Rect>,
    pub rounded_clip: Option<RoundedRect>,
    pub opacity: f32,
}

impl DrawCommand {
    /// Bounds of the operation in device space, ignoring the clip.
    pub fn device_bounds(&self) -> Rect {
        self.transform.transform_rect(&self.op.local_bounds())
    }

    /// Bounds of the operation in device space after clipping.
    pub fn visible_bounds(&self) -> Option<Rect> {
        let bounds = self.device_bounds();
        match self.clip {
            Some(clip) => clip.intersect(&bounds),
            None => Some(bounds),
        }
    }

    /// The premultiplied color that reaches the target.
    pub fn effective_color(&self) -> Color {
        self.op.color().multiply_alpha(self.opacity)
    }

    /// Whether this is a rectangle or rounded-rectangle fill.
    pub fn is_fill(&self) -> bool {
        matches!(self.op, DrawOp::FillRect { .. } | DrawOp::FillRoundedRect { .. })
    }
}

/// Records draw calls for later replay or inspection.
#[derive(Debug, Clone)]
pub struct DisplayList {
    state: RenderStateStack,
    commands: Vec<DrawCommand>,
    clear_color: Color,
    viewport_size: Size,
    stats: FrameStats,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self {
            state: RenderStateStack::new(),
            commands: Vec::new(),
            clear_color: Color::TRANSPARENT,
            viewport_size: Size::ZERO,
            stats: FrameStats::default(),
        }
    }

    /// The recorded commands, in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Color the frame was cleared to.
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Viewport size passed to `begin_frame`.
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Statistics of the frame recorded so far.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Current save/restore depth.
    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    /// Recorded fill commands, in paint order.
    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| c.is_fill())
    }

    /// Consume the list, returning its commands if save/restore calls balanced.
    pub fn finish(self) -> RenderResult<Vec<DrawCommand>> {
        match self.state.depth() {
            0 => Ok(self.commands),
            depth => Err(RenderError::UnbalancedState { depth }),
        }
    }

    fn record(&mut self, op: DrawOp) {
        let state = self.state.current();
        let clipped_out = state.clip.is_some_and(|clip| clip.is_empty());
        if state.opacity <= 0.0 || op.color().is_transparent() || clipped_out {
            self.stats.culled += 1;
            return;
        }

        self.commands.push(DrawCommand {
            op,
            transform: state.transform,
            clip: state.clip,
            rounded_clip: state.rounded_clip,
            opacity: state.opacity,
        });
        self.stats.draw_calls += 1;
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DisplayList {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.state.reset();
        self.commands.clear();
        self.stats = FrameStats::default();
        self.clear_color = clear_color;
        self.viewport_size = viewport_size;
    }

    fn end_frame(&mut self) -> FrameStats {
        if self.state.depth() > 0 {
            tracing::warn!(
                target: "lattice_morph_render::display_list",
                depth = self.state.depth(),
                "frame ended with unbalanced save/restore"
            );
        }
        self.stats
    }

    fn save(&mut self) {
        self.state.save();
        self.stats.max_depth = self.stats.max_depth.max(self.state.depth() as u32);
    }

    fn restore(&mut self) {
        if !self.state.restore() {
            tracing::warn!(target: "lattice_morph_render::display_list", "restore without matching save");
        }
    }

    fn transform(&self) -> &Transform2D {
        self.state.transform()
    }

    fn concat_transform(&mut self, transform: &Transform2D) {
        self.state.concat_transform(transform);
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.state.translate(tx, ty);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale(sx, sy);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clip_rounded_rect(&mut self, rect: RoundedRect) {
        self.state.clip_rounded_rect(rect);
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip_bounds()
    }

    fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        self.record(DrawOp::FillRect {
            rect,
            paint: paint.into(),
        });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, paint: impl Into<Paint>) {
        self.record(DrawOp::FillRoundedRect {
            rect,
            paint: paint.into(),
        });
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke) {
        if stroke.width <= 0.0 {
            self.stats.culled += 1;
            return;
        }
        self.record(DrawOp::StrokeRoundedRect {
            rect,
            stroke: *stroke,
        });
    }

    fn draw_box_shadow_rounded(&mut self, rect: RoundedRect, shadow: &BoxShadow) {
        self.record(DrawOp::BoxShadow {
            rect,
            shadow: *shadow,
        });
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.state.set_opacity(opacity);
    }

    fn opacity(&self) -> f32 {
        self.state.current().opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_state_with_commands() {
        let mut list = DisplayList::new();
        list.begin_frame(Color::WHITE, Size::new(400.0, 800.0));
        list.save();
        list.translate(10.0, 20.0);
        list.set_opacity(0.5);
        list.fill_rect(Rect::new(0.0, 0.0, 50.0, 50.0), Color::RED);
        list.restore();
        list.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLUE);
        let stats = list.end_frame();

        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.max_depth, 1);
        let first = &list.commands()[0];
        assert_eq!(first.device_bounds(), Rect::new(10.0, 20.0, 50.0, 50.0));
        assert_eq!(first.effective_color(), Color::new(0.5, 0.0, 0.0, 0.5));
        assert_eq!(list.commands()[1].opacity, 1.0);
    }

    #[test]
    fn test_culls_invisible_draws() {
        let mut list = DisplayList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::TRANSPARENT);
        list.set_opacity(0.0);
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        list.set_opacity(1.0);
        list.stroke_rounded_rect(
            RoundedRect::new(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0),
            &Stroke::new(Color::BLACK, 0.0),
        );

        assert!(list.is_empty());
        assert_eq!(list.stats().culled, 3);
    }

    #[test]
    fn test_clip_applies_to_visible_bounds() {
        let mut list = DisplayList::new();
        list.clip_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        list.fill_rect(Rect::new(10.0, 10.0, 50.0, 50.0), Color::RED);
        assert_eq!(
            list.commands()[0].visible_bounds(),
            Some(Rect::new(10.0, 10.0, 10.0, 10.0))
        );
    }

    #[test]
    fn test_finish_reports_unbalanced_state() {
        let mut list = DisplayList::new();
        list.save();
        assert_eq!(list.finish(), Err(RenderError::UnbalancedState { depth: 1 }));

        let mut balanced = DisplayList::new();
        balanced.save();
        balanced.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        balanced.restore();
        assert_eq!(balanced.finish().unwrap().len(), 1);
    }
}
