//! A minimal navigator for driving routes frame by frame.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lattice_morph::container::{
    ClosedStateHost, Content, HostRegistry, NavigationHost, TransitionRoute,
};
use lattice_morph::layout::LayoutBox;
use lattice_morph::render::{Color, DisplayList, Point, Rect, Renderer, Size};
use lattice_morph::{FrameScheduler, MorphResult};
use lattice_morph::animation::AnimationStatus;
use parking_lot::Mutex;

pub const FRAME: Duration = Duration::from_millis(16);
pub const VIEWPORT: Size = Size::new(400.0, 800.0);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub struct TestNavigator {
    viewport: Arc<LayoutBox>,
    frames: FrameScheduler,
    registry: HostRegistry,
    routes: Mutex<Vec<Arc<dyn TransitionRoute>>>,
    popping: Mutex<Vec<Arc<dyn TransitionRoute>>>,
    pops: AtomicUsize,
}

impl TestNavigator {
    pub fn new() -> Arc<Self> {
        init_tracing();
        let viewport = LayoutBox::root("viewport");
        viewport.set_size(VIEWPORT);
        Arc::new(Self {
            viewport,
            frames: FrameScheduler::new(),
            registry: HostRegistry::new(),
            routes: Mutex::new(Vec::new()),
            popping: Mutex::new(Vec::new()),
            pops: AtomicUsize::new(0),
        })
    }

    pub fn viewport_box(&self) -> &Arc<LayoutBox> {
        &self.viewport
    }

    pub fn push(&self, route: Arc<dyn TransitionRoute>) -> MorphResult<()> {
        self.routes.lock().push(Arc::clone(&route));
        route.did_push()
    }

    pub fn pop_count(&self) -> usize {
        self.pops.load(Ordering::SeqCst)
    }

    /// Routes still on screen, including ones animating out.
    pub fn live_routes(&self) -> usize {
        self.routes.lock().len() + self.popping.lock().len()
    }

    /// Advance one frame: tick, compose, then run post-frame callbacks.
    pub fn pump(&self, elapsed: Duration) -> DisplayList {
        let routes: Vec<_> = self
            .routes
            .lock()
            .iter()
            .chain(self.popping.lock().iter())
            .cloned()
            .collect();
        for route in &routes {
            route.tick(elapsed);
        }

        let mut list = DisplayList::new();
        list.begin_frame(Color::WHITE, VIEWPORT);
        for route in &routes {
            route.compose(&mut list);
        }
        list.end_frame();

        let finished: Vec<_> = {
            let mut popping = self.popping.lock();
            let (done, still): (Vec<_>, Vec<_>) = popping
                .drain(..)
                .partition(|route| route.status() == AnimationStatus::Dismissed);
            *popping = still;
            done
        };
        for route in finished {
            route.dispose();
        }

        self.frames.end_frame(elapsed).unwrap();
        list
    }

    /// Pump frames until every route has settled, returning the last frame.
    pub fn settle(&self) -> DisplayList {
        let mut list = self.pump(FRAME);
        for _ in 0..200 {
            let busy = self
                .routes
                .lock()
                .iter()
                .chain(self.popping.lock().iter())
                .any(|route| route.status().is_animating());
            if !busy {
                break;
            }
            list = self.pump(FRAME);
        }
        list
    }
}

impl NavigationHost for TestNavigator {
    fn viewport(&self) -> Arc<LayoutBox> {
        Arc::clone(&self.viewport)
    }

    fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    fn pop(&self, result: Option<Box<dyn Any + Send>>) -> bool {
        let Some(route) = self.routes.lock().pop() else {
            return false;
        };
        self.pops.fetch_add(1, Ordering::SeqCst);
        self.popping.lock().push(Arc::clone(&route));
        route.did_pop(result)
    }
}

/// Content that fills its bounds and counts layout and paint passes.
pub struct Swatch {
    pub color: Color,
    layouts: AtomicUsize,
    paints: AtomicUsize,
    last_layout: Mutex<Option<Size>>,
}

impl Swatch {
    pub fn new(color: Color) -> Arc<Self> {
        Arc::new(Self {
            color,
            layouts: AtomicUsize::new(0),
            paints: AtomicUsize::new(0),
            last_layout: Mutex::new(None),
        })
    }

    pub fn layouts(&self) -> usize {
        self.layouts.load(Ordering::SeqCst)
    }

    pub fn paints(&self) -> usize {
        self.paints.load(Ordering::SeqCst)
    }

    pub fn last_layout(&self) -> Option<Size> {
        *self.last_layout.lock()
    }
}

impl Content for Swatch {
    fn layout(&self, size: Size) {
        self.layouts.fetch_add(1, Ordering::SeqCst);
        *self.last_layout.lock() = Some(size);
    }

    fn paint(&self, list: &mut DisplayList, size: Size) {
        self.paints.fetch_add(1, Ordering::SeqCst);
        list.fill_rect(Rect::from_size(size), self.color);
    }
}

/// Bounds of the card mounted by [`mount_card`], in viewport coordinates.
pub const CARD_RECT: Rect = Rect::new(16.0, 250.0, 368.0, 96.0);

/// Mount a host inside a scrolled list so it sits at [`CARD_RECT`].
pub fn mount_card(
    navigator: &TestNavigator,
    tag: &str,
    content: Arc<Swatch>,
) -> (Arc<ClosedStateHost>, Arc<LayoutBox>) {
    let list = LayoutBox::new("list");
    list.attach_to(navigator.viewport_box());
    list.set_offset(Point::new(0.0, -50.0));
    list.set_size(Size::new(400.0, 2000.0));

    let node = LayoutBox::new(tag);
    node.attach_to(&list);
    node.set_offset(Point::new(16.0, 300.0));
    node.set_size(Size::new(368.0, 96.0));

    let host = ClosedStateHost::new(tag, node, content);
    host.attach(navigator.registry());
    (host, list)
}

/// Commands painted with `color`.
pub fn painted_with(list: &DisplayList, color: Color) -> usize {
    list.commands()
        .iter()
        .filter(|command| command.op.color() == color)
        .count()
}
