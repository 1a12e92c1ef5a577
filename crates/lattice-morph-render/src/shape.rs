//! Interpolatable surface shapes.
//!
//! A [`ShapeBorder`] describes the outline of a surface independent of its
//! size: per-corner radii plus an optional border side. It is resolved against
//! a concrete rectangle when painted.

use serde::{Deserialize, Serialize};

use crate::paint::Stroke;
use crate::types::{Color, CornerRadii, Rect, RoundedRect};

/// The stroked edge of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSide {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels. Zero draws nothing.
    pub width: f32,
}

impl BorderSide {
    /// No border.
    pub const NONE: Self = Self {
        color: Color::TRANSPARENT,
        width: 0.0,
    };

    /// Create a border side.
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Whether stroking this side would draw anything.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && !self.color.is_transparent()
    }

    /// The stroke used to paint this side.
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.color, self.width)
    }

    /// Linear interpolation of color and width.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            color: self.color.lerp(other.color, t),
            width: (self.width + (other.width - self.width) * t).max(0.0),
        }
    }
}

impl Default for BorderSide {
    fn default() -> Self {
        Self::NONE
    }
}

/// A rounded-rectangle outline with an optional border.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeBorder {
    /// Corner radii.
    pub radii: CornerRadii,
    /// Border drawn along the outline.
    pub side: BorderSide,
}

impl ShapeBorder {
    /// A sharp-cornered rectangle without a border.
    pub const fn rectangle() -> Self {
        Self {
            radii: CornerRadii::ZERO,
            side: BorderSide::NONE,
        }
    }

    /// A rectangle with uniform rounded corners and no border.
    pub const fn rounded(radius: f32) -> Self {
        Self {
            radii: CornerRadii::uniform(radius),
            side: BorderSide::NONE,
        }
    }

    /// Replace the corner radii.
    pub fn with_radii(mut self, radii: CornerRadii) -> Self {
        self.radii = radii;
        self
    }

    /// Replace the border side.
    pub fn with_side(mut self, side: BorderSide) -> Self {
        self.side = side;
        self
    }

    /// Resolve the outline for a concrete rectangle.
    pub fn resolve(&self, rect: Rect) -> RoundedRect {
        RoundedRect::with_radii(rect, self.radii)
    }

    /// Interpolate radii and border side.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            radii: self.radii.lerp(other.radii, t),
            side: self.side.lerp(other.side, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_to_rectangle_lerp() {
        let from = ShapeBorder::rounded(4.0);
        let to = ShapeBorder::rectangle();
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.5).radii, CornerRadii::uniform(2.0));
    }

    #[test]
    fn test_resolve_clamps_to_rect() {
        let shape = ShapeBorder::rounded(40.0);
        let resolved = shape.resolve(Rect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(resolved.radii, CornerRadii::uniform(10.0));
    }

    #[test]
    fn test_border_side_visibility() {
        assert!(!BorderSide::NONE.is_visible());
        let side = BorderSide::new(Color::BLACK, 1.5);
        assert!(side.is_visible());
        assert_eq!(side.to_stroke().width, 1.5);
        assert!(!BorderSide::NONE.lerp(side, 0.0).is_visible());
        assert!(BorderSide::NONE.lerp(side, 0.5).is_visible());
    }

    #[test]
    fn test_shape_deserialize_partial() {
        let shape: ShapeBorder = serde_json::from_str(r#"{"radii": 12.0}"#).unwrap();
        assert_eq!(shape, ShapeBorder::rounded(12.0));
        let bordered: ShapeBorder =
            serde_json::from_str(r##"{"side": {"color": "#000000FF", "width": 2.0}}"##).unwrap();
        assert_eq!(bordered.side, BorderSide::new(Color::BLACK, 2.0));
        assert!(bordered.radii.is_zero());
    }
}
