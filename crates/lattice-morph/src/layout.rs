//! A minimal retained geometry tree.
//!
//! Transitions need to know where a closed element sits relative to the
//! navigator's viewport. [`LayoutBox`] records the committed layout of one
//! element: its size, its offset inside the parent and an optional paint
//! transform. Boxes link to their parents weakly; a chain that ends in a
//! [`root`](LayoutBox::root) box is attached and can be measured.
//!
//! # Example
//!
//! ```
//! use lattice_morph::layout::LayoutBox;
//! use lattice_morph::render::{Point, Rect, Size};
//!
//! let viewport = LayoutBox::root("viewport");
//! viewport.set_size(Size::new(400.0, 800.0));
//!
//! let card = LayoutBox::new("card");
//! card.attach_to(&viewport);
//! card.set_offset(Point::new(16.0, 120.0));
//! card.set_size(Size::new(368.0, 96.0));
//!
//! assert_eq!(card.rect_in(&viewport), Some(Rect::new(16.0, 120.0, 368.0, 96.0)));
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use lattice_morph_render::{Point, Rect, Size, Transform2D};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct BoxState {
    size: Option<Size>,
    offset: Point,
    transform: Transform2D,
    parent: Option<Weak<LayoutBox>>,
}

/// Committed geometry of one element.
pub struct LayoutBox {
    name: String,
    root: bool,
    state: RwLock<BoxState>,
}

impl LayoutBox {
    /// A root box. Roots are always attached.
    pub fn root(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            root: true,
            state: RwLock::new(BoxState::default()),
        })
    }

    /// A detached box without a size.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            root: false,
            state: RwLock::new(BoxState::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make `parent` this box's parent.
    pub fn attach_to(&self, parent: &Arc<LayoutBox>) {
        self.state.write().parent = Some(Arc::downgrade(parent));
    }

    /// Unlink from the parent.
    pub fn detach(&self) {
        self.state.write().parent = None;
    }

    pub fn parent(&self) -> Option<Arc<LayoutBox>> {
        self.state.read().parent.as_ref().and_then(Weak::upgrade)
    }

    /// The committed size, or `None` before the first layout.
    pub fn size(&self) -> Option<Size> {
        self.state.read().size
    }

    pub fn set_size(&self, size: Size) {
        self.state.write().size = Some(size);
    }

    /// Forget the committed size, as if the box had never been laid out.
    pub fn clear_size(&self) {
        self.state.write().size = None;
    }

    /// Offset of the box's origin inside its parent.
    pub fn offset(&self) -> Point {
        self.state.read().offset
    }

    pub fn set_offset(&self, offset: Point) {
        self.state.write().offset = offset;
    }

    /// Paint transform applied before the offset.
    pub fn set_transform(&self, transform: Transform2D) {
        self.state.write().transform = transform;
    }

    /// Maps local coordinates to the parent's coordinates.
    pub fn local_transform(&self) -> Transform2D {
        let state = self.state.read();
        Transform2D::translate(state.offset.x, state.offset.y).then(&state.transform)
    }

    /// Whether the parent chain reaches a root box.
    pub fn is_attached(&self) -> bool {
        if self.root {
            return true;
        }
        let mut current = self.parent();
        while let Some(node) = current {
            if node.root {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// The transform from this box's coordinates to `ancestor`'s, or `None`
    /// when `ancestor` is not on the parent chain.
    pub fn transform_to(&self, ancestor: &LayoutBox) -> Option<Transform2D> {
        if std::ptr::eq(self, ancestor) {
            return Some(Transform2D::IDENTITY);
        }
        let mut accumulated = self.local_transform();
        let mut current = self.parent();
        while let Some(node) = current {
            if std::ptr::eq(Arc::as_ptr(&node), ancestor) {
                return Some(accumulated);
            }
            accumulated = node.local_transform().then(&accumulated);
            current = node.parent();
        }
        None
    }

    /// This box's bounds in `ancestor`'s coordinates.
    ///
    /// `None` when the box has no size yet or `ancestor` is not on its chain.
    pub fn rect_in(&self, ancestor: &LayoutBox) -> Option<Rect> {
        let size = self.size()?;
        let transform = self.transform_to(ancestor)?;
        Some(transform.transform_rect(&Rect::from_size(size)))
    }
}

impl fmt::Debug for LayoutBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("LayoutBox")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("size", &state.size)
            .field("offset", &state.offset)
            .finish()
    }
}

static_assertions::assert_impl_all!(LayoutBox: Send, Sync);
