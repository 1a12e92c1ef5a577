//! Measuring where a transition starts and ends.
//!
//! The end rectangle is the navigator's full viewport. The begin rectangle is
//! the closed-state host's bounds mapped into viewport coordinates. On push
//! the begin rectangle is read right away, since the host has just been laid
//! out. On pop it is read after the next frame, once the layout the pop
//! triggered has been committed; by then the route may already be gone, so
//! the deferred read first asks whether it is still wanted.

use std::sync::{Arc, Weak};

use lattice_morph_core::{Deferred, FrameScheduler};
use lattice_morph_render::{Rect, Size};
use parking_lot::RwLock;
use thiserror::Error;

use super::host::HostHandle;
use crate::layout::LayoutBox;

/// Errors from measuring the end rectangle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureError {
    #[error("the navigator viewport has not been laid out")]
    ViewportNotLaidOut,
    #[error("the navigator viewport is not attached")]
    ViewportDetached,
}

/// The host's bounds in viewport coordinates and its untransformed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub rect: Rect,
    pub size: Size,
}

/// Latest measured begin and end geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MorphGeometry {
    pub begin: Option<GeometrySnapshot>,
    pub end: Option<Rect>,
}

/// The viewport's bounds in its own coordinates.
pub fn capture_end_rect(viewport: &LayoutBox) -> Result<Rect, MeasureError> {
    if !viewport.is_attached() {
        return Err(MeasureError::ViewportDetached);
    }
    viewport
        .size()
        .map(Rect::from_size)
        .ok_or(MeasureError::ViewportNotLaidOut)
}

/// `node`'s bounds in `viewport` coordinates.
///
/// `None` when either box is detached, `node` has not been laid out, or
/// `node` is not a descendant of `viewport`.
pub fn capture_begin_rect(node: &LayoutBox, viewport: &LayoutBox) -> Option<GeometrySnapshot> {
    if !node.is_attached() || !viewport.is_attached() {
        return None;
    }
    let size = node.size()?;
    let rect = node.rect_in(viewport)?;
    Some(GeometrySnapshot { rect, size })
}

/// Geometry shared between a route and its deferred measurements.
#[derive(Debug, Clone, Default)]
pub struct Measurements {
    geometry: Arc<RwLock<MorphGeometry>>,
}

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current geometry.
    pub fn geometry(&self) -> MorphGeometry {
        *self.geometry.read()
    }

    /// Measure and store the end rectangle.
    pub fn take_end(&self, viewport: &LayoutBox) -> Result<Rect, MeasureError> {
        let end = capture_end_rect(viewport)?;
        self.geometry.write().end = Some(end);
        tracing::trace!(target: "lattice_morph::measure", ?end, "end rect measured");
        Ok(end)
    }

    /// Measure the begin rectangle, now or after the next frame.
    ///
    /// A successful read also reserves the host's size with a placeholder. A
    /// deferred read is skipped when `still_wanted` returns false at the time
    /// it runs; the returned promise is then cancelled.
    pub fn request_begin<G>(
        &self,
        host: &HostHandle,
        viewport: &Arc<LayoutBox>,
        frames: &FrameScheduler,
        deferred: bool,
        still_wanted: G,
    ) -> Deferred<GeometrySnapshot>
    where
        G: FnOnce() -> bool + Send + 'static,
    {
        if !deferred {
            return match read_begin(&self.geometry, host, viewport) {
                Some(snapshot) => Deferred::resolved(snapshot),
                None => Deferred::cancelled(),
            };
        }

        let geometry = Arc::clone(&self.geometry);
        let host = host.clone();
        let viewport: Weak<LayoutBox> = Arc::downgrade(viewport);
        frames.after_next_frame(move |info| {
            let _span = tracing::trace_span!(
                target: "lattice_morph::measure",
                "lattice_morph::measure",
                frame = info.frame_number
            )
            .entered();
            if !still_wanted() {
                tracing::trace!(target: "lattice_morph::measure", tag = %host.tag(), "begin measurement no longer wanted");
                return None;
            }
            let viewport = viewport.upgrade()?;
            read_begin(&geometry, &host, &viewport)
        })
    }
}

fn read_begin(
    geometry: &RwLock<MorphGeometry>,
    host: &HostHandle,
    viewport: &LayoutBox,
) -> Option<GeometrySnapshot> {
    let Some(closed) = host.upgrade() else {
        tracing::trace!(target: "lattice_morph::measure", tag = %host.tag(), "host gone before measurement");
        return None;
    };
    let Some(snapshot) = capture_begin_rect(closed.geometry_node(), viewport) else {
        tracing::trace!(target: "lattice_morph::measure", tag = %host.tag(), "host not measurable");
        return None;
    };
    geometry.write().begin = Some(snapshot);
    closed.reserve_size(Some(snapshot.size));
    tracing::trace!(target: "lattice_morph::measure", tag = %host.tag(), rect = ?snapshot.rect, "begin rect measured");
    Some(snapshot)
}
