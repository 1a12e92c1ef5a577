//! Building a container transform route.

use std::fmt;
use std::sync::Arc;

use lattice_morph_render::{DisplayList, Rect};

use super::content::Content;
use super::route::CloseHandle;
use super::style::TransitionStyle;
use super::tag::Tag;
use crate::animation::AnimationStatus;

/// Builds the open content. The handle closes the container from inside it.
pub type OpenBuilder<T> = Arc<dyn Fn(CloseHandle<T>) -> Arc<dyn Content> + Send + Sync>;

/// Paints a frame when no closed-state host matches the route's tag.
pub type FallbackBuilder = Arc<dyn Fn(&FallbackFrame, &mut DisplayList) + Send + Sync>;

/// What a fallback builder is given for each frame.
#[derive(Clone)]
pub struct FallbackFrame {
    pub progress: f32,
    pub status: AnimationStatus,
    pub viewport: Rect,
    /// The open content, built once for the route.
    pub open_content: Arc<dyn Content>,
}

impl fmt::Debug for FallbackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackFrame")
            .field("progress", &self.progress)
            .field("status", &self.status)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

/// Configuration of a container transform.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lattice_morph::container::{Content, ContainerTransform, TransitionKind, TransitionStyle};
/// use lattice_morph::render::{Color, DisplayList, Rect, Renderer, Size};
///
/// struct Details;
///
/// impl Content for Details {
///     fn paint(&self, list: &mut DisplayList, size: Size) {
///         list.fill_rect(Rect::from_size(size), Color::WHITE);
///     }
/// }
///
/// let config = ContainerTransform::<String>::new("album-7", |_close| Arc::new(Details))
///     .with_style(TransitionStyle::default().with_kind(TransitionKind::FadeThrough));
/// assert_eq!(config.style().transition_kind, TransitionKind::FadeThrough);
/// ```
pub struct ContainerTransform<T> {
    tag: Tag,
    style: TransitionStyle,
    open_builder: OpenBuilder<T>,
    fallback: Option<FallbackBuilder>,
}

impl<T> ContainerTransform<T> {
    /// Expand from the host tagged `tag` into the content built by
    /// `open_builder`.
    pub fn new<F>(tag: impl Into<Tag>, open_builder: F) -> Self
    where
        F: Fn(CloseHandle<T>) -> Arc<dyn Content> + Send + Sync + 'static,
    {
        Self {
            tag: tag.into(),
            style: TransitionStyle::default(),
            open_builder: Arc::new(open_builder),
            fallback: None,
        }
    }

    pub fn with_style(mut self, style: TransitionStyle) -> Self {
        self.style = style;
        self
    }

    /// Paint frames with `fallback` when no host matches the tag.
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&FallbackFrame, &mut DisplayList) + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn style(&self) -> &TransitionStyle {
        &self.style
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub(crate) fn open_builder(&self) -> &OpenBuilder<T> {
        &self.open_builder
    }

    pub(crate) fn fallback(&self) -> Option<&FallbackBuilder> {
        self.fallback.as_ref()
    }
}

impl<T> fmt::Debug for ContainerTransform<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerTransform")
            .field("tag", &self.tag)
            .field("style", &self.style)
            .field("has_fallback", &self.has_fallback())
            .finish_non_exhaustive()
    }
}
