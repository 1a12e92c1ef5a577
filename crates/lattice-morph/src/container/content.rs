//! Paintable content and the slot that keeps open content alive.

use std::fmt;
use std::sync::Arc;

use lattice_morph_render::{DisplayList, Size};

/// Something a transition can lay out and paint.
///
/// Content is painted in its own coordinate space at a natural size; the
/// transition scales it into the morphing surface.
pub trait Content: Send + Sync {
    /// Lay out for `size`. Called only when the natural size changes.
    fn layout(&self, _size: Size) {}

    /// Paint at `size` with the origin at the content's top-left corner.
    fn paint(&self, list: &mut DisplayList, size: Size);
}

/// Where the open content is currently mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPlacement {
    /// Not built or not shown.
    #[default]
    Unmounted,
    /// Inside the morphing surface.
    Morphing,
    /// Alone, filling the viewport.
    FullScreen,
}

/// Holds the open content across placements so it is built exactly once.
#[derive(Default)]
pub struct ContentSlot {
    content: Option<Arc<dyn Content>>,
    placement: SlotPlacement,
    builds: u32,
}

impl ContentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The content, if it has been built.
    pub fn content(&self) -> Option<&Arc<dyn Content>> {
        self.content.as_ref()
    }

    /// The content, building it on first use.
    pub fn get_or_build(&mut self, build: impl FnOnce() -> Arc<dyn Content>) -> Arc<dyn Content> {
        if let Some(content) = &self.content {
            return Arc::clone(content);
        }
        let content = build();
        self.builds += 1;
        self.content = Some(Arc::clone(&content));
        content
    }

    /// Move the content to `placement`. Returns whether the placement changed.
    pub fn mount(&mut self, placement: SlotPlacement) -> bool {
        if self.placement == placement {
            return false;
        }
        tracing::trace!(
            target: "lattice_morph::layer",
            from = ?self.placement,
            to = ?placement,
            "open content moved"
        );
        self.placement = placement;
        true
    }

    pub fn placement(&self) -> SlotPlacement {
        self.placement
    }

    /// How many times the builder has run.
    pub fn build_count(&self) -> u32 {
        self.builds
    }
}

impl fmt::Debug for ContentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSlot")
            .field("built", &self.content.is_some())
            .field("placement", &self.placement)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl Content for Blank {
        fn paint(&self, _list: &mut DisplayList, _size: Size) {}
    }

    #[test]
    fn test_builds_once() {
        let mut slot = ContentSlot::new();
        let first = slot.get_or_build(|| Arc::new(Blank));
        let second = slot.get_or_build(|| panic!("must not rebuild"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(slot.build_count(), 1);
    }

    #[test]
    fn test_mount_reports_changes() {
        let mut slot = ContentSlot::new();
        assert_eq!(slot.placement(), SlotPlacement::Unmounted);
        assert!(slot.mount(SlotPlacement::Morphing));
        assert!(!slot.mount(SlotPlacement::Morphing));
        assert!(slot.mount(SlotPlacement::FullScreen));
    }
}
