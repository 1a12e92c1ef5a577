//! Lattice Morph - container transform transitions.
//!
//! A closed element (a card, a list tile, a button) grows into a full-screen
//! page, and shrinks back into place when the page is dismissed. This crate
//! provides the transition engine: tween choreography, geometry measurement,
//! the route state machine and a paint layer that records each frame into a
//! [`render::DisplayList`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_morph::prelude::*;
//!
//! struct Page;
//!
//! impl Content for Page {
//!     fn paint(&self, list: &mut DisplayList, size: Size) {
//!         list.fill_rect(Rect::from_size(size), Color::WHITE);
//!     }
//! }
//!
//! let config = ContainerTransform::<()>::new("inbox-item-3", |_close| Arc::new(Page))
//!     .with_style(TransitionStyle::default().with_kind(TransitionKind::FadeThrough));
//! assert_eq!(config.tag(), &Tag::from("inbox-item-3"));
//! ```

pub mod animation;
pub mod container;
mod error;
pub mod layout;
pub mod prelude;

pub use error::{MorphError, MorphResult};
pub use lattice_morph_core::*;

/// Drawing types and the recording renderer.
pub mod render {
    pub use lattice_morph_render::*;
}
