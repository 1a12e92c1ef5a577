//! The closed-state host and the registry that finds it.
//!
//! A [`ClosedStateHost`] wraps the element a transition expands from. While a
//! transition is running the host's content is painted by the transition
//! itself, so the host can be hidden and can hold a placeholder that reserves
//! the content's size in the surrounding layout.
//!
//! Hosts register under their [`Tag`] in a [`HostRegistry`]; a route looks its
//! host up by tag when it is pushed.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use lattice_morph_core::{Property, Signal};
use lattice_morph_render::{DisplayList, Size};
use parking_lot::{Mutex, RwLock};

use super::content::Content;
use super::tag::Tag;
use crate::layout::LayoutBox;

/// The element a container transform expands from.
pub struct ClosedStateHost {
    tag: Tag,
    node: Arc<LayoutBox>,
    content: Arc<dyn Content>,
    visible: Property<bool>,
    placeholder_size: Property<Option<Size>>,
    visibility_changed: Signal<bool>,
    placeholder_changed: Signal<Option<Size>>,
    registry: Mutex<Option<HostRegistry>>,
}

impl ClosedStateHost {
    /// Create a visible host for `content` laid out in `node`.
    pub fn new(tag: impl Into<Tag>, node: Arc<LayoutBox>, content: Arc<dyn Content>) -> Arc<Self> {
        Arc::new(Self {
            tag: tag.into(),
            node,
            content,
            visible: Property::new(true),
            placeholder_size: Property::new(None),
            visibility_changed: Signal::new(),
            placeholder_changed: Signal::new(),
            registry: Mutex::new(None),
        })
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The layout box measured to find where the host sits.
    pub fn geometry_node(&self) -> &Arc<LayoutBox> {
        &self.node
    }

    /// The closed content.
    pub fn content(&self) -> &Arc<dyn Content> {
        &self.content
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Show or hide the host. Hidden hosts keep their layout slot.
    pub fn set_visible(&self, visible: bool) {
        if self.visible.set(visible) {
            tracing::trace!(target: "lattice_morph::host", tag = %self.tag, visible, "host visibility changed");
            self.visibility_changed.emit(visible);
        }
    }

    /// Size reserved in place of the content, if any.
    pub fn placeholder_size(&self) -> Option<Size> {
        self.placeholder_size.get()
    }

    /// Reserve `size` in place of the content, or `None` to put the content
    /// back.
    pub fn reserve_size(&self, size: Option<Size>) {
        if self.placeholder_size.set(size) {
            tracing::trace!(target: "lattice_morph::host", tag = %self.tag, ?size, "host placeholder changed");
            self.placeholder_changed.emit(size);
        }
    }

    /// Whether the closed content is composited in place by the host.
    ///
    /// While a placeholder is reserved the content is not part of the host's
    /// subtree and a transition may paint it instead.
    pub fn is_content_composited(&self) -> bool {
        self.placeholder_size().is_none()
    }

    /// Drop the placeholder and show the host.
    pub fn restore(&self) {
        self.reserve_size(None);
        self.set_visible(true);
    }

    pub fn visibility_changed(&self) -> &Signal<bool> {
        &self.visibility_changed
    }

    pub fn placeholder_changed(&self) -> &Signal<Option<Size>> {
        &self.placeholder_changed
    }

    /// The size the host occupies in its parent layout.
    pub fn size_hint(&self) -> Size {
        self.placeholder_size()
            .or_else(|| self.node.size())
            .unwrap_or(Size::ZERO)
    }

    /// Paint the host in place.
    ///
    /// Nothing is drawn while the host is hidden or holds a placeholder.
    pub fn paint(&self, list: &mut DisplayList) {
        if !self.is_visible() || !self.is_content_composited() {
            return;
        }
        if let Some(size) = self.node.size() {
            self.content.paint(list, size);
        }
    }

    /// Register under this host's tag.
    pub fn attach(self: &Arc<Self>, registry: &HostRegistry) {
        registry.register(self);
        if let Some(previous) = self.registry.lock().replace(registry.clone()) {
            if !previous.same_registry(registry) {
                previous.unregister(&self.tag, Arc::as_ptr(self));
            }
        }
    }

    /// Remove this host from its registry.
    pub fn detach(&self) {
        if let Some(registry) = self.registry.lock().take() {
            registry.unregister(&self.tag, self as *const Self);
        }
    }

    /// A weak handle to this host.
    pub fn handle(self: &Arc<Self>) -> HostHandle {
        HostHandle {
            tag: self.tag.clone(),
            host: Arc::downgrade(self),
        }
    }
}

impl Drop for ClosedStateHost {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for ClosedStateHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosedStateHost")
            .field("tag", &self.tag)
            .field("visible", &self.is_visible())
            .field("placeholder_size", &self.placeholder_size())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ClosedStateHost: Send, Sync);

/// A weak reference to a registered host.
#[derive(Clone)]
pub struct HostHandle {
    tag: Tag,
    host: Weak<ClosedStateHost>,
}

impl HostHandle {
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn upgrade(&self) -> Option<Arc<ClosedStateHost>> {
        self.host.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.host.strong_count() > 0
    }
}

impl fmt::Debug for HostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostHandle")
            .field("tag", &self.tag)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Tag-to-host lookup shared by a navigator and the hosts beneath it.
#[derive(Clone, Default)]
pub struct HostRegistry {
    entries: Arc<RwLock<HashMap<Tag, Weak<ClosedStateHost>>>>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `host` under its tag, replacing any previous host.
    pub fn register(&self, host: &Arc<ClosedStateHost>) {
        let mut entries = self.entries.write();
        let previous = entries.insert(host.tag().clone(), Arc::downgrade(host));
        if let Some(previous) = previous {
            if previous.strong_count() > 0 && !std::ptr::eq(previous.as_ptr(), Arc::as_ptr(host)) {
                tracing::warn!(
                    target: "lattice_morph::host",
                    tag = %host.tag(),
                    "duplicate closed-state host tag; the newest host wins"
                );
            }
        }
    }

    /// Remove the entry for `tag` if it still points at `host`.
    pub fn unregister(&self, tag: &Tag, host: *const ClosedStateHost) {
        let mut entries = self.entries.write();
        if entries.get(tag).is_some_and(|weak| std::ptr::eq(weak.as_ptr(), host)) {
            entries.remove(tag);
        }
    }

    /// Find the live host registered under `tag`.
    pub fn lookup(&self, tag: &Tag) -> Option<HostHandle> {
        let found = self.entries.read().get(tag).cloned();
        match found {
            Some(weak) if weak.strong_count() > 0 => Some(HostHandle {
                tag: tag.clone(),
                host: weak,
            }),
            Some(_) => {
                self.entries.write().retain(|_, weak| weak.strong_count() > 0);
                None
            }
            None => None,
        }
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.lookup(tag).is_some()
    }

    /// Number of registered tags, including ones whose host has gone away.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn same_registry(&self, other: &HostRegistry) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for HostRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_morph_render::{Color, Rect, Renderer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fill(Color);

    impl Content for Fill {
        fn paint(&self, list: &mut DisplayList, size: Size) {
            list.fill_rect(Rect::from_size(size), self.0);
        }
    }

    fn host(tag: &str) -> Arc<ClosedStateHost> {
        let node = LayoutBox::new(tag);
        node.set_size(Size::new(100.0, 40.0));
        ClosedStateHost::new(tag, node, Arc::new(Fill(Color::RED)))
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = HostRegistry::new();
        let card = host("card");
        card.attach(&registry);

        let handle = registry.lookup(&Tag::from("card")).unwrap();
        assert!(Arc::ptr_eq(&handle.upgrade().unwrap(), &card));
        assert!(registry.lookup(&Tag::from("missing")).is_none());
    }

    #[test]
    fn test_lookup_across_literal_and_owned_tags() {
        let registry = HostRegistry::new();
        let node = LayoutBox::new("card");
        let card = ClosedStateHost::new(Tag::new("card"), node, Arc::new(Fill(Color::RED)));
        card.attach(&registry);

        assert!(registry.contains(&Tag::from("card")));
        assert!(registry.contains(&Tag::from(String::from("card"))));
    }

    #[test]
    fn test_dropped_host_unregisters() {
        let registry = HostRegistry::new();
        let card = host("card");
        card.attach(&registry);
        let handle = card.handle();
        drop(card);
        assert!(!handle.is_alive());
        assert!(registry.lookup(&Tag::from("card")).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_tag_newest_wins() {
        let registry = HostRegistry::new();
        let first = host("card");
        let second = host("card");
        first.attach(&registry);
        second.attach(&registry);

        let found = registry.lookup(&Tag::from("card")).unwrap().upgrade().unwrap();
        assert!(Arc::ptr_eq(&found, &second));

        // Detaching the replaced host leaves the newer entry alone.
        first.detach();
        assert!(registry.contains(&Tag::from("card")));
    }

    #[test]
    fn test_visibility_and_placeholder_signals() {
        let card = host("card");
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        card.visibility_changed().connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        card.set_visible(false);
        card.set_visible(false);
        assert!(!card.is_visible());
        assert_eq!(changes.load(Ordering::SeqCst), 1);

        card.reserve_size(Some(Size::new(100.0, 40.0)));
        assert!(!card.is_content_composited());
        assert_eq!(card.size_hint(), Size::new(100.0, 40.0));

        card.restore();
        assert!(card.is_visible());
        assert!(card.is_content_composited());
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_paint_skipped_while_hidden_or_reserved() {
        let card = host("card");
        let mut list = DisplayList::new();
        card.paint(&mut list);
        assert_eq!(list.len(), 1);

        let mut list = DisplayList::new();
        card.reserve_size(Some(Size::new(100.0, 40.0)));
        card.paint(&mut list);
        assert!(list.is_empty());

        card.restore();
        card.set_visible(false);
        card.paint(&mut list);
        assert!(list.is_empty());
    }
}
