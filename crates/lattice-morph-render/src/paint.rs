//! Paint styles for filling and stroking shapes, and elevation shadows.

use crate::types::{Color, Point, Rect};

/// A paint style for filling shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Solid color fill.
    Solid(Color),
}

impl Paint {
    /// Create a solid color paint.
    #[inline]
    pub const fn solid(color: Color) -> Self {
        Self::Solid(color)
    }

    /// The paint's color.
    #[inline]
    pub fn color(&self) -> Color {
        match self {
            Self::Solid(c) => *c,
        }
    }

    /// The same paint with its alpha scaled by `opacity`.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        match self {
            Self::Solid(c) => Self::Solid(c.multiply_alpha(opacity)),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::Solid(Color::BLACK)
    }
}

/// A stroke style for outlining shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// The paint used for the stroke.
    pub paint: Paint,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Stroke {
    /// Create a new stroke with the given paint and width.
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Self {
            paint: paint.into(),
            width: width.max(0.0),
        }
    }
}

/// A box shadow cast by a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    /// Shadow color (with alpha for transparency).
    pub color: Color,
    /// Horizontal offset in pixels. Positive moves shadow right.
    pub offset_x: f32,
    /// Vertical offset in pixels. Positive moves shadow down.
    pub offset_y: f32,
    /// Blur radius in pixels (2 * sigma of the Gaussian).
    pub blur_radius: f32,
    /// Spread radius in pixels. Expands (positive) or contracts (negative) the shadow shape.
    pub spread_radius: f32,
}

impl BoxShadow {
    /// Create a new box shadow with the given color and no offset, blur or spread.
    #[inline]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            offset_x: 0.0,
            offset_y: 0.0,
            blur_radius: 0.0,
            spread_radius: 0.0,
        }
    }

    /// The key shadow of a surface raised to `elevation`.
    ///
    /// The light source sits above the surface, so the shadow drops downward
    /// by half the elevation and softens linearly with it.
    pub fn for_elevation(elevation: f32, color: Color) -> Self {
        let elevation = elevation.max(0.0);
        Self::new(color)
            .with_offset(0.0, elevation * 0.5)
            .with_blur(elevation * 2.0)
    }

    /// Set the shadow offset.
    #[inline]
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the blur radius.
    #[inline]
    pub fn with_blur(mut self, radius: f32) -> Self {
        self.blur_radius = radius.max(0.0);
        self
    }

    /// Whether the shadow would draw anything.
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.color.is_transparent()
    }

    /// Bounds covered by the shadow of `rect`, including offset, blur and spread.
    pub fn expanded_bounds(&self, rect: Rect) -> Rect {
        let expand = self.blur_radius + self.spread_radius.max(0.0);
        let left = rect.left() - expand + self.offset_x.min(0.0);
        let top = rect.top() - expand + self.offset_y.min(0.0);
        let right = rect.right() + expand + self.offset_x.max(0.0);
        let bottom = rect.bottom() + expand + self.offset_y.max(0.0);
        Rect::from_corners(Point::new(left, top), Point::new(right, bottom))
    }

    /// The sigma (standard deviation) for Gaussian blur.
    #[inline]
    pub fn sigma(&self) -> f32 {
        (self.blur_radius / 2.0).max(0.001)
    }
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self::new(Color::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_opacity() {
        let paint = Paint::from(Color::WHITE).with_opacity(0.25);
        assert_eq!(paint.color(), Color::new(0.25, 0.25, 0.25, 0.25));
    }

    #[test]
    fn test_shadow_for_elevation() {
        let shadow = BoxShadow::for_elevation(4.0, Color::BLACK);
        assert_eq!(shadow.offset_y, 2.0);
        assert_eq!(shadow.blur_radius, 8.0);
        assert!(shadow.is_visible());
        assert!(!BoxShadow::for_elevation(4.0, Color::TRANSPARENT).is_visible());
        assert_eq!(BoxShadow::for_elevation(-3.0, Color::BLACK).blur_radius, 0.0);
    }

    #[test]
    fn test_shadow_expanded_bounds() {
        let shadow = BoxShadow::new(Color::BLACK).with_offset(0.0, 2.0).with_blur(4.0);
        let bounds = shadow.expanded_bounds(Rect::new(10.0, 10.0, 100.0, 50.0));
        assert_eq!(bounds, Rect::new(6.0, 6.0, 108.0, 60.0));
        assert_eq!(shadow.sigma(), 2.0);
    }

    #[test]
    fn test_stroke_width_non_negative() {
        assert_eq!(Stroke::new(Color::RED, -1.0).width, 0.0);
    }
}
