//! The container transform route.
//!
//! A [`ContainerTransformRoute`] is pushed onto a navigator and morphs the
//! closed-state host matching its tag into full-screen open content, and back
//! again when popped.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --did_push--> Searching --host found--> Armed --forward--> Animating
//!                        |                                      |    ^
//!                        |--no host, fallback--> Fallback       v    | pop
//!                        '--no host----------> Unresolved    Settled-'
//! ```
//!
//! While the controller runs forward the host stays in place with a
//! placeholder; when it completes the host is hidden. When the route is
//! popped, the host is measured again after the next frame, since it may have
//! moved while hidden, and is shown again once the controller is dismissed.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use lattice_morph_core::{ConnectionId, PerfSpan, Signal};
use lattice_morph_render::{DisplayList, Rect};
use parking_lot::Mutex;

use super::config::{ContainerTransform, FallbackFrame};
use super::content::{Content, ContentSlot, SlotPlacement};
use super::host::HostHandle;
use super::layer::{self, FittedChild, LayerChild};
use super::measure::{Measurements, MorphGeometry};
use super::navigation::{NavigationHost, TransitionRoute};
use super::tag::Tag;
use super::tweens::{MorphFrame, MorphTweens};
use crate::animation::{AnimationController, AnimationStatus};
use crate::error::{MorphError, MorphResult};

/// Where a route is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutePhase {
    /// Created, not yet pushed.
    #[default]
    Idle,
    /// Looking up the closed-state host.
    Searching,
    /// Host found and measured; the transition is about to start.
    Armed,
    /// The transition is running.
    Animating,
    /// The transition has come to rest.
    Settled,
    /// No host matched; frames are painted by the fallback builder.
    Fallback,
    /// No host matched and there is no fallback; the open content is shown
    /// without a transition.
    Unresolved,
}

/// Closes the container from inside its open content.
pub struct CloseHandle<T> {
    route: Weak<RouteInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> CloseHandle<T> {
    /// Pop the route with `value` as its result. Returns whether a route was
    /// popped.
    pub fn close(&self, value: Option<T>) -> bool {
        match self.route.upgrade() {
            Some(route) => route.close_container(value),
            None => false,
        }
    }

    /// Whether the route still exists.
    pub fn is_attached(&self) -> bool {
        self.route.strong_count() > 0
    }
}

impl<T> Clone for CloseHandle<T> {
    fn clone(&self) -> Self {
        Self {
            route: Weak::clone(&self.route),
        }
    }
}

impl<T> fmt::Debug for CloseHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseHandle")
            .field("attached", &(self.route.strong_count() > 0))
            .finish()
    }
}

struct RouteState<T> {
    phase: RoutePhase,
    host: Option<HostHandle>,
    tweens: Option<Arc<MorphTweens>>,
    last_status: Option<AnimationStatus>,
    current_status: Option<AnimationStatus>,
    popped: bool,
    result: Option<T>,
    closed_emitted: bool,
    status_connection: Option<ConnectionId>,
}

impl<T> RouteState<T> {
    /// The controller changed direction without coming to rest in between.
    fn is_interrupted(&self) -> bool {
        matches!(
            (self.last_status, self.current_status),
            (Some(last), Some(current)) if last.is_animating() && current.is_animating()
        )
    }
}

#[derive(Default)]
struct PaintState {
    closed: FittedChild,
    open: FittedChild,
    slot: ContentSlot,
}

struct RouteInner<T> {
    config: ContainerTransform<T>,
    navigator: Weak<dyn NavigationHost>,
    controller: AnimationController,
    measurements: Measurements,
    state: Mutex<RouteState<T>>,
    paint: Mutex<PaintState>,
    on_closed: Signal<Option<T>>,
    disposed: AtomicBool,
    self_ref: Weak<RouteInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> RouteInner<T> {
    fn did_push(&self) -> MorphResult<()> {
        self.set_phase(RoutePhase::Searching);
        let Some(navigator) = self.navigator.upgrade() else {
            self.set_phase(RoutePhase::Unresolved);
            return Err(MorphError::NavigatorDetached);
        };

        let tag = self.config.tag().clone();
        let outcome = match navigator.registry().lookup(&tag) {
            Some(handle) => self.arm(&*navigator, handle),
            None if self.config.has_fallback() => {
                tracing::debug!(target: "lattice_morph::route", %tag, "no host for tag; using fallback");
                self.set_phase(RoutePhase::Fallback);
                Ok(())
            }
            None => {
                tracing::error!(target: "lattice_morph::route", %tag, "no closed-state host for tag");
                self.set_phase(RoutePhase::Unresolved);
                Err(MorphError::UnmatchedTag { tag })
            }
        };

        // The page is shown either way; a failed lookup only loses the morph.
        self.controller.forward();
        outcome
    }

    fn arm(&self, navigator: &dyn NavigationHost, handle: HostHandle) -> MorphResult<()> {
        let viewport = navigator.viewport();
        if let Err(err) = self.measurements.take_end(&viewport) {
            self.set_phase(RoutePhase::Unresolved);
            return Err(err.into());
        }
        // The host has just been laid out, so it can be measured right away.
        let _ = self
            .measurements
            .request_begin(&handle, &viewport, navigator.frames(), false, || true);
        let tweens = MorphTweens::new(self.config.style(), navigator.canvas_color())?;

        let mut state = self.state.lock();
        state.host = Some(handle);
        state.tweens = Some(Arc::new(tweens));
        state.phase = RoutePhase::Armed;
        tracing::debug!(target: "lattice_morph::route", tag = %self.config.tag(), "route armed");
        Ok(())
    }

    fn did_pop(&self, result: Option<Box<dyn Any + Send>>) -> bool {
        if self.disposed.load(Ordering::SeqCst) {
            return false;
        }
        let value = result.and_then(|boxed| boxed.downcast::<T>().ok()).map(|boxed| *boxed);
        let host = {
            let mut state = self.state.lock();
            state.popped = true;
            state.result = value;
            match state.phase {
                RoutePhase::Armed | RoutePhase::Animating | RoutePhase::Settled => state.host.clone(),
                _ => None,
            }
        };

        if let (Some(handle), Some(navigator)) = (host, self.navigator.upgrade()) {
            let viewport = navigator.viewport();
            if let Err(err) = self.measurements.take_end(&viewport) {
                tracing::warn!(target: "lattice_morph::route", %err, "keeping previous end rect");
            }
            // The host may have moved while hidden; read it once the layout
            // triggered by the pop has been committed.
            let route = Weak::clone(&self.self_ref);
            let _ = self.measurements.request_begin(
                &handle,
                &viewport,
                navigator.frames(),
                true,
                move || route.upgrade().is_some_and(|route| route.wants_measurements()),
            );
        }

        tracing::debug!(target: "lattice_morph::route", tag = %self.config.tag(), "route popped");
        self.controller.reverse();
        true
    }

    fn wants_measurements(&self) -> bool {
        !self.disposed.load(Ordering::SeqCst) && !self.controller.status().is_dismissed()
    }

    fn handle_status(&self, status: AnimationStatus) {
        let (host, closed_value) = {
            let mut state = self.state.lock();
            state.last_status = state.current_status.replace(status);
            state.phase = match (state.phase, status) {
                (
                    RoutePhase::Armed | RoutePhase::Animating | RoutePhase::Settled,
                    AnimationStatus::Forward | AnimationStatus::Reverse,
                ) => RoutePhase::Animating,
                (
                    RoutePhase::Armed | RoutePhase::Animating,
                    AnimationStatus::Completed | AnimationStatus::Dismissed,
                ) => RoutePhase::Settled,
                (phase, _) => phase,
            };
            let host = state.host.as_ref().and_then(HostHandle::upgrade);
            let closed_value = if status.is_dismissed() && state.popped && !state.closed_emitted {
                state.closed_emitted = true;
                Some(state.result.take())
            } else {
                None
            };
            (host, closed_value)
        };

        match (status, host) {
            (AnimationStatus::Completed, Some(host)) => {
                host.reserve_size(None);
                host.set_visible(false);
            }
            (AnimationStatus::Dismissed, Some(host)) => host.restore(),
            _ => {}
        }

        if let Some(value) = closed_value {
            tracing::debug!(target: "lattice_morph::route", tag = %self.config.tag(), "container closed");
            self.on_closed.emit(value);
        }
    }

    fn close_container(&self, value: Option<T>) -> bool {
        let Some(navigator) = self.navigator.upgrade() else {
            tracing::warn!(target: "lattice_morph::route", "close requested after navigator was dropped");
            return false;
        };
        navigator.pop(value.map(|value| Box::new(value) as Box<dyn Any + Send>))
    }

    fn open_content(&self) -> Arc<dyn Content> {
        if let Some(content) = self.paint.lock().slot.content() {
            return Arc::clone(content);
        }
        // Build without holding the lock; the builder is user code.
        let handle = CloseHandle {
            route: Weak::clone(&self.self_ref),
        };
        let built = (self.config.open_builder())(handle);
        self.paint.lock().slot.get_or_build(|| built)
    }

    fn viewport_rect(&self, navigator: &dyn NavigationHost) -> Rect {
        navigator
            .viewport()
            .size()
            .map(Rect::from_size)
            .unwrap_or(Rect::ZERO)
    }

    fn frame_with(
        &self,
        tweens: &MorphTweens,
        progress: f32,
        status: AnimationStatus,
        interrupted: bool,
        viewport: Rect,
    ) -> MorphFrame {
        let MorphGeometry { begin, end } = self.measurements.geometry();
        let end = end.unwrap_or(viewport);
        let (begin, closed_size) = match begin {
            Some(snapshot) => (snapshot.rect, snapshot.size),
            None => (end, end.size),
        };
        tweens.frame(progress, status, interrupted, begin, end, closed_size)
    }

    fn current_frame(&self) -> Option<MorphFrame> {
        let navigator = self.navigator.upgrade()?;
        let viewport = self.viewport_rect(&*navigator);
        let (tweens, interrupted) = {
            let state = self.state.lock();
            (state.tweens.clone()?, state.is_interrupted())
        };
        let progress = self.controller.value();
        let status = self.controller.status();
        Some(self.frame_with(&tweens, progress, status, interrupted, viewport))
    }

    fn compose(&self, list: &mut DisplayList) {
        let _span = PerfSpan::new("compose");
        let status = self.controller.status();
        if status.is_dismissed() || self.disposed.load(Ordering::SeqCst) {
            return;
        }
        let Some(navigator) = self.navigator.upgrade() else {
            return;
        };
        let viewport = self.viewport_rect(&*navigator);
        let progress = self.controller.value();
        let (phase, host, tweens, interrupted) = {
            let state = self.state.lock();
            (
                state.phase,
                state.host.clone(),
                state.tweens.clone(),
                state.is_interrupted(),
            )
        };

        match phase {
            RoutePhase::Idle | RoutePhase::Searching => {}
            RoutePhase::Unresolved => self.paint_settled(list, viewport),
            RoutePhase::Fallback => self.paint_fallback(list, progress, status, viewport),
            RoutePhase::Armed | RoutePhase::Animating | RoutePhase::Settled => {
                if status.is_completed() {
                    self.paint_settled(list, viewport);
                    return;
                }
                let Some(tweens) = tweens else {
                    return;
                };
                let frame = self.frame_with(&tweens, progress, status, interrupted, viewport);
                let closed = host
                    .as_ref()
                    .and_then(HostHandle::upgrade)
                    .filter(|host| !host.is_content_composited())
                    .map(|host| Arc::clone(host.content()));
                let open = self.open_content();

                let mut paint = self.paint.lock();
                let PaintState {
                    closed: closed_fit,
                    open: open_fit,
                    slot,
                } = &mut *paint;
                slot.mount(SlotPlacement::Morphing);
                layer::paint_morph(
                    list,
                    &frame,
                    self.config.style().clip_behavior,
                    viewport,
                    closed.as_deref().map(|content| LayerChild {
                        content,
                        fitted: closed_fit,
                    }),
                    Some(LayerChild {
                        content: open.as_ref(),
                        fitted: open_fit,
                    }),
                );
            }
        }
    }

    fn paint_settled(&self, list: &mut DisplayList, viewport: Rect) {
        let end = self.measurements.geometry().end.unwrap_or(viewport);
        let frame = MorphFrame::settled_open(self.config.style(), end);
        let open = self.open_content();
        let mut paint = self.paint.lock();
        let PaintState {
            open: open_fit,
            slot,
            ..
        } = &mut *paint;
        slot.mount(SlotPlacement::FullScreen);
        layer::paint_open_only(
            list,
            &frame,
            self.config.style().clip_behavior,
            LayerChild {
                content: open.as_ref(),
                fitted: open_fit,
            },
        );
    }

    fn paint_fallback(
        &self,
        list: &mut DisplayList,
        progress: f32,
        status: AnimationStatus,
        viewport: Rect,
    ) {
        let Some(fallback) = self.config.fallback().cloned() else {
            return;
        };
        let frame = FallbackFrame {
            progress,
            status,
            viewport,
            open_content: self.open_content(),
        };
        self.paint.lock().slot.mount(SlotPlacement::FullScreen);
        fallback(&frame, list);
    }
}

impl<T> RouteInner<T> {
    fn set_phase(&self, phase: RoutePhase) {
        self.state.lock().phase = phase;
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let (host, connection) = {
            let mut state = self.state.lock();
            (state.host.clone(), state.status_connection.take())
        };
        if let Some(id) = connection {
            let _ = self.controller.status_changed().disconnect(id);
        }
        self.controller.stop();

        let Some(handle) = host else {
            return;
        };
        let needs_restore = handle
            .upgrade()
            .is_some_and(|host| !host.is_visible() || !host.is_content_composited());
        if !needs_restore {
            return;
        }
        match self.navigator.upgrade() {
            // Restore after the frame that removes the route, so the host does
            // not reappear underneath a still-visible open page.
            Some(navigator) => {
                navigator.frames().add_post_frame_callback(move |_| {
                    if let Some(host) = handle.upgrade() {
                        host.restore();
                    }
                });
            }
            None => {
                if let Some(host) = handle.upgrade() {
                    host.restore();
                }
            }
        }
        tracing::debug!(target: "lattice_morph::route", tag = %self.config.tag(), "route disposed");
    }
}

impl<T> Drop for RouteInner<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// A route that morphs a closed-state host into full-screen open content.
///
/// `T` is the type of the value the route is closed with.
pub struct ContainerTransformRoute<T> {
    inner: Arc<RouteInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> ContainerTransformRoute<T> {
    /// Create a route for `navigator`. Nothing happens until it is pushed.
    pub fn new<N>(config: ContainerTransform<T>, navigator: &Arc<N>) -> Self
    where
        N: NavigationHost + 'static,
    {
        let navigator: Weak<N> = Arc::downgrade(navigator);
        let navigator: Weak<dyn NavigationHost> = navigator;
        let duration = config.style().duration;

        let inner = Arc::new_cyclic(|self_ref: &Weak<RouteInner<T>>| {
            let controller = AnimationController::new(duration);
            let route = Weak::clone(self_ref);
            let connection = controller.status_changed().connect(move |status| {
                if let Some(route) = route.upgrade() {
                    route.handle_status(*status);
                }
            });
            RouteInner {
                config,
                navigator,
                controller,
                measurements: Measurements::new(),
                state: Mutex::new(RouteState {
                    phase: RoutePhase::Idle,
                    host: None,
                    tweens: None,
                    last_status: None,
                    current_status: None,
                    popped: false,
                    result: None,
                    closed_emitted: false,
                    status_connection: Some(connection),
                }),
                paint: Mutex::new(PaintState::default()),
                on_closed: Signal::new(),
                disposed: AtomicBool::new(false),
                self_ref: Weak::clone(self_ref),
            }
        });
        Self { inner }
    }

    /// Emitted once with the route's result after it has closed.
    pub fn on_closed(&self) -> &Signal<Option<T>> {
        &self.inner.on_closed
    }

    /// Pop the route through its navigator with `value` as the result.
    pub fn close_container(&self, value: Option<T>) -> bool {
        self.inner.close_container(value)
    }

    /// A handle that closes this route.
    pub fn close_handle(&self) -> CloseHandle<T> {
        CloseHandle {
            route: Arc::downgrade(&self.inner),
        }
    }

    pub fn tag(&self) -> &Tag {
        self.inner.config.tag()
    }

    pub fn phase(&self) -> RoutePhase {
        self.inner.state.lock().phase
    }

    /// Raw controller progress.
    pub fn progress(&self) -> f32 {
        self.inner.controller.value()
    }

    pub fn controller(&self) -> &AnimationController {
        &self.inner.controller
    }

    /// The latest measured begin and end geometry.
    pub fn geometry(&self) -> MorphGeometry {
        self.inner.measurements.geometry()
    }

    /// Whether the running transition reversed direction mid-flight.
    pub fn is_interrupted(&self) -> bool {
        self.inner.state.lock().is_interrupted()
    }

    /// The values the next composed frame will use, when a host was found.
    pub fn current_frame(&self) -> Option<MorphFrame> {
        self.inner.current_frame()
    }

    /// Where the open content is currently mounted.
    pub fn open_placement(&self) -> SlotPlacement {
        self.inner.paint.lock().slot.placement()
    }

    /// How many times the open content has been built.
    pub fn open_build_count(&self) -> u32 {
        self.inner.paint.lock().slot.build_count()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }
}

impl<T: Clone + Send + Sync + 'static> TransitionRoute for ContainerTransformRoute<T> {
    fn did_push(&self) -> MorphResult<()> {
        self.inner.did_push()
    }

    fn did_pop(&self, result: Option<Box<dyn Any + Send>>) -> bool {
        self.inner.did_pop(result)
    }

    fn tick(&self, elapsed: Duration) {
        if !self.is_disposed() {
            self.inner.controller.tick(elapsed);
        }
    }

    fn compose(&self, list: &mut DisplayList) {
        self.inner.compose(list);
    }

    fn status(&self) -> AnimationStatus {
        self.inner.controller.status()
    }

    fn dispose(&self) {
        self.inner.dispose();
    }
}

impl<T> fmt::Debug for ContainerTransformRoute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ContainerTransformRoute")
            .field("tag", self.inner.config.tag())
            .field("phase", &state.phase)
            .field("controller", &self.inner.controller)
            .finish()
    }
}
