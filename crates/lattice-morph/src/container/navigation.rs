//! The seam between transitions and the navigator that hosts them.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use lattice_morph_core::FrameScheduler;
use lattice_morph_render::{Color, DisplayList};

use super::host::HostRegistry;
use crate::animation::AnimationStatus;
use crate::error::MorphResult;
use crate::layout::LayoutBox;

/// What a route needs from the navigator it is pushed onto.
pub trait NavigationHost: Send + Sync {
    /// The navigator's root layout box. Routes measure against it.
    fn viewport(&self) -> Arc<LayoutBox>;

    /// Frame scheduler used for post-frame measurement and cleanup.
    fn frames(&self) -> &FrameScheduler;

    /// Registry of closed-state hosts beneath the navigator.
    fn registry(&self) -> &HostRegistry;

    /// Background color of the navigator, used as the default middle color of
    /// a fade-through.
    fn canvas_color(&self) -> Color {
        Color::WHITE
    }

    /// Pop the topmost route with an optional result. Returns whether a route
    /// was popped.
    fn pop(&self, result: Option<Box<dyn Any + Send>>) -> bool;
}

/// A route as seen by the navigator.
pub trait TransitionRoute: Send + Sync {
    /// The route was pushed; start the opening transition.
    fn did_push(&self) -> MorphResult<()>;

    /// The route is being popped with `result`; start the closing transition.
    fn did_pop(&self, result: Option<Box<dyn Any + Send>>) -> bool;

    /// Advance the transition by one frame.
    fn tick(&self, elapsed: Duration);

    /// Paint the route's current frame.
    fn compose(&self, list: &mut DisplayList);

    fn status(&self) -> AnimationStatus;

    /// Release the route. Safe to call more than once.
    fn dispose(&self);
}
