//! Painting a transition frame.
//!
//! The layer stack, bottom to top: scrim over the viewport, the surface's
//! shadow, the surface fill and its elevation tint, the closed and open
//! contents clipped to the surface, and finally the surface border.
//!
//! Contents are painted at their natural size and scaled to the surface's
//! width, anchored at its top-left corner, so their layout never changes
//! while the surface morphs.

use lattice_morph_render::{BoxShadow, DisplayList, Rect, Renderer, Size, Transform2D};

use super::content::Content;
use super::style::ClipBehavior;
use super::tweens::MorphFrame;

/// Opacity of the surface tint at each elevation step; linear in between.
const TINT_OPACITIES: [(f32, f32); 6] = [
    (0.0, 0.0),
    (1.0, 0.05),
    (3.0, 0.08),
    (6.0, 0.11),
    (8.0, 0.12),
    (12.0, 0.14),
];

/// How strongly the surface tint shows at `elevation`.
pub fn surface_tint_opacity(elevation: f32) -> f32 {
    if elevation <= TINT_OPACITIES[0].0 {
        return TINT_OPACITIES[0].1;
    }
    for pair in TINT_OPACITIES.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if elevation < upper.0 {
            let t = (elevation - lower.0) / (upper.0 - lower.0);
            return lower.1 + (upper.1 - lower.1) * t;
        }
    }
    TINT_OPACITIES[TINT_OPACITIES.len() - 1].1
}

/// Layout bookkeeping for content painted at a natural size.
///
/// The content is laid out again only when its natural size changes.
#[derive(Debug, Default)]
pub struct FittedChild {
    laid_out: Option<Size>,
    layout_passes: u32,
}

impl FittedChild {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the content has been laid out.
    pub fn layout_passes(&self) -> u32 {
        self.layout_passes
    }

    /// The transform that scales `natural` to the width of `target` and
    /// places it at `target`'s top-left corner.
    pub fn fit_transform(natural: Size, target: Rect) -> Option<Transform2D> {
        if natural.width <= 0.0 || natural.height <= 0.0 {
            return None;
        }
        let scale = target.width() / natural.width;
        Some(Transform2D::translate(target.left(), target.top()).then(&Transform2D::scale(scale)))
    }

    /// Lay out if needed, then paint `content` into `target` at `opacity`.
    pub fn paint(
        &mut self,
        list: &mut DisplayList,
        content: &dyn Content,
        natural: Size,
        target: Rect,
        opacity: f32,
    ) {
        if self.laid_out != Some(natural) {
            content.layout(natural);
            self.laid_out = Some(natural);
            self.layout_passes += 1;
        }
        if opacity <= 0.0 {
            return;
        }
        let Some(transform) = Self::fit_transform(natural, target) else {
            return;
        };
        list.save();
        list.concat_transform(&transform);
        list.set_opacity(list.opacity() * opacity);
        content.paint(list, natural);
        list.restore();
    }
}

/// Content to paint inside the surface, with its layout bookkeeping.
pub struct LayerChild<'a> {
    pub content: &'a dyn Content,
    pub fitted: &'a mut FittedChild,
}

/// Paint one frame of a transition.
///
/// `closed` is `None` while the closed content is composited by its host.
pub fn paint_morph(
    list: &mut DisplayList,
    frame: &MorphFrame,
    clip: ClipBehavior,
    viewport: Rect,
    closed: Option<LayerChild<'_>>,
    open: Option<LayerChild<'_>>,
) {
    if !frame.scrim.is_transparent() {
        list.fill_rect(viewport, frame.scrim);
    }

    let outline = frame.shape.resolve(frame.rect);
    let shadow = BoxShadow::for_elevation(frame.elevation, frame.shadow_color);
    if frame.elevation > 0.0 && shadow.is_visible() {
        list.draw_box_shadow_rounded(outline, &shadow);
    }
    list.fill_rounded_rect(outline, frame.color);
    let tint = frame
        .surface_tint_color
        .multiply_alpha(surface_tint_opacity(frame.elevation));
    if !tint.is_transparent() {
        list.fill_rounded_rect(outline, tint);
    }

    list.save();
    match clip {
        ClipBehavior::None => {}
        ClipBehavior::HardEdge => list.clip_rect(frame.rect),
        ClipBehavior::AntiAlias => list.clip_rounded_rect(outline),
    }
    if let Some(child) = closed {
        child
            .fitted
            .paint(list, child.content, frame.closed_size, frame.rect, frame.closed_opacity);
    }
    if let Some(child) = open {
        child
            .fitted
            .paint(list, child.content, frame.open_size, frame.rect, frame.open_opacity);
    }
    list.restore();

    if frame.shape.side.is_visible() {
        list.stroke_rounded_rect(outline, &frame.shape.side.to_stroke());
    }
}

/// Paint a fully open container: the surface and the open content only.
pub fn paint_open_only(
    list: &mut DisplayList,
    frame: &MorphFrame,
    clip: ClipBehavior,
    open: LayerChild<'_>,
) {
    paint_morph(list, frame, clip, frame.rect, None, Some(open));
}
