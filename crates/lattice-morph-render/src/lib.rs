//! Geometry, paint and display-list recording for Lattice Morph.
//!
//! This crate provides the drawing vocabulary the transition engine paints
//! with:
//!
//! - [`Point`], [`Size`], [`Rect`], [`RoundedRect`] and premultiplied [`Color`]
//! - [`Transform2D`] affine transforms
//! - [`Paint`], [`Stroke`] and elevation [`BoxShadow`]s
//! - [`ShapeBorder`], an interpolatable outline with an optional border side
//! - the [`Renderer`] trait and the recording [`DisplayList`] backend
//!
//! # Example
//!
//! ```
//! use lattice_morph_render::{Color, DisplayList, Rect, Renderer, ShapeBorder, Size};
//!
//! let mut list = DisplayList::new();
//! list.begin_frame(Color::WHITE, Size::new(400.0, 800.0));
//!
//! let surface = ShapeBorder::rounded(4.0).resolve(Rect::new(16.0, 16.0, 120.0, 48.0));
//! list.fill_rounded_rect(surface, Color::BLUE);
//!
//! let stats = list.end_frame();
//! assert_eq!(stats.draw_calls, 1);
//! ```

pub mod display_list;
mod error;
pub mod paint;
pub mod renderer;
pub mod shape;
pub mod transform;
mod types;

pub use display_list::{DisplayList, DrawCommand, DrawOp};
pub use error::{RenderError, RenderResult};
pub use paint::{BoxShadow, Paint, Stroke};
pub use renderer::{FrameStats, RenderState, RenderStateStack, Renderer};
pub use shape::{BorderSide, ShapeBorder};
pub use transform::Transform2D;
pub use types::{Color, CornerRadii, Point, Rect, RoundedRect, Size};
