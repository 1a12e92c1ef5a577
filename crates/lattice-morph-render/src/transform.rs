//! 2D affine transformations.

use crate::error::{RenderError, RenderResult};
use crate::types::{Point, Rect};

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix in column-major order:
/// ```text
/// | m00 m10 m20 |   | scale_x  skew_x   translate_x |
/// | m01 m11 m21 | = | skew_y   scale_y  translate_y |
/// ```
///
/// # Composing Transforms
///
/// `a.then(&b)` applies `b` first and `a` second:
///
/// ```
/// use lattice_morph_render::{Point, Transform2D};
///
/// let transform = Transform2D::scale(2.0).then(&Transform2D::translate(10.0, 0.0));
/// // 5 + 10 = 15, then * 2 = 30
/// assert_eq!(transform.transform_point(Point::new(5.0, 0.0)), Point::new(30.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// A pure translation.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// A uniform scale about the origin.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    /// A non-uniform scale about the origin.
    #[inline]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// A rotation about the origin, in radians.
    pub fn rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [cos, sin, -sin, cos, 0.0, 0.0],
        }
    }

    /// Compose: apply `other` first, then `self`.
    pub fn then(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// This transform followed by a translation in local coordinates.
    #[inline]
    pub fn translated(&self, tx: f32, ty: f32) -> Self {
        self.then(&Self::translate(tx, ty))
    }

    /// This transform followed by a uniform scale in local coordinates.
    #[inline]
    pub fn scaled(&self, s: f32) -> Self {
        self.then(&Self::scale(s))
    }

    /// Map a point through the transform.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            y: self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        }
    }

    /// Axis-aligned bounding box of the transformed rectangle.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let corners = rect.corners().map(|p| self.transform_point(p));
        let (min, max) = corners.iter().fold(
            (
                Point::new(f32::INFINITY, f32::INFINITY),
                Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            ),
            |(min, max), p| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        );
        Rect::from_corners(min, max)
    }

    /// The inverse transform.
    pub fn inverse(&self) -> RenderResult<Self> {
        let det = self.determinant();
        if det.abs() < 1e-10 {
            return Err(RenderError::NonInvertibleTransform);
        }

        let inv_det = 1.0 / det;
        Ok(Self {
            m: [
                self.m[3] * inv_det,
                -self.m[1] * inv_det,
                -self.m[2] * inv_det,
                self.m[0] * inv_det,
                (self.m[2] * self.m[5] - self.m[3] * self.m[4]) * inv_det,
                (self.m[1] * self.m[4] - self.m[0] * self.m[5]) * inv_det,
            ],
        })
    }

    /// The translation components.
    #[inline]
    pub fn translation(&self) -> (f32, f32) {
        (self.m[4], self.m[5])
    }

    /// Length of the transformed x and y unit vectors.
    pub fn scale_factors(&self) -> (f32, f32) {
        (
            glam::Vec2::new(self.m[0], self.m[1]).length(),
            glam::Vec2::new(self.m[2], self.m[3]).length(),
        )
    }

    /// The determinant of the linear part.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Convert to a glam affine transform.
    pub fn to_affine(&self) -> glam::Affine2 {
        glam::Affine2::from_cols_array(&self.m)
    }

    /// Convert to a 4x4 matrix for GPU upload.
    pub fn to_mat4(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&[
            self.m[0], self.m[1], 0.0, 0.0, //
            self.m[2], self.m[3], 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            self.m[4], self.m[5], 0.0, 1.0,
        ])
    }
}

impl From<glam::Affine2> for Transform2D {
    fn from(affine: glam::Affine2) -> Self {
        Self {
            m: affine.to_cols_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_point(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_basic_transforms() {
        assert_eq!(
            Transform2D::translate(100.0, 50.0).transform_point(Point::ZERO),
            Point::new(100.0, 50.0)
        );
        assert_eq!(
            Transform2D::scale_xy(2.0, 3.0).transform_point(Point::new(10.0, 10.0)),
            Point::new(20.0, 30.0)
        );
        let p = Transform2D::rotate(std::f32::consts::FRAC_PI_2).transform_point(Point::new(1.0, 0.0));
        assert!(approx_point(p, Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_then_order() {
        let t = Transform2D::translate(10.0, 20.0).then(&Transform2D::scale(0.5));
        assert_eq!(t.transform_point(Point::new(100.0, 100.0)), Point::new(60.0, 70.0));
        assert_eq!(Transform2D::translate(10.0, 20.0).scaled(0.5), t);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform2D::translate(16.0, 300.0).scaled(0.3);
        let inv = t.inverse().unwrap();
        assert!(t.then(&inv).approx_eq(&Transform2D::IDENTITY, 1e-5));
        assert_eq!(Transform2D::scale(0.0).inverse(), Err(RenderError::NonInvertibleTransform));
    }

    #[test]
    fn test_transform_rect_bounds() {
        let t = Transform2D::translate(5.0, 5.0).scaled(2.0);
        assert_eq!(
            t.transform_rect(&Rect::new(0.0, 0.0, 10.0, 20.0)),
            Rect::new(5.0, 5.0, 20.0, 40.0)
        );
    }

    #[test]
    fn test_glam_conversions() {
        let t = Transform2D::translate(3.0, 4.0).scaled(2.0);
        assert_eq!(Transform2D::from(t.to_affine()), t);
        assert_eq!(t.scale_factors(), (2.0, 2.0));
        let v = t.to_mat4().transform_point3(glam::Vec3::new(1.0, 1.0, 0.0));
        assert_eq!((v.x, v.y), (5.0, 6.0));
    }
}
