//! Frame lifecycle scheduling.
//!
//! A [`FrameScheduler`] collects post-frame callbacks: work that must observe
//! the layout committed by the current frame. The host drives it by calling
//! [`FrameScheduler::end_frame`] once per frame after layout and paint.
//!
//! Callbacks added while a flush is running are not part of that flush; they
//! run at the end of the next frame.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use lattice_morph_core::FrameScheduler;
//!
//! let frames = FrameScheduler::new();
//! let measured = frames.after_next_frame(|info| Some(info.frame_number));
//! assert!(measured.is_pending());
//!
//! frames.end_frame(Duration::from_millis(16)).unwrap();
//! assert_eq!(measured.try_take(), Some(1));
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::deferred::{Deferred, deferred};
use crate::error::{Result, SchedulerError};

new_key_type! {
    /// A unique identifier for a post-frame callback.
    pub struct FrameCallbackId;
}

/// Information about the frame that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Sequence number of the frame, starting at 1.
    pub frame_number: u64,
    /// Time elapsed since the previous frame.
    pub elapsed: Duration,
}

type BoxedFrameCallback = Box<dyn FnOnce(FrameInfo) + Send + 'static>;

struct FrameQueue {
    callbacks: SlotMap<FrameCallbackId, BoxedFrameCallback>,
    order: VecDeque<FrameCallbackId>,
    frame_number: u64,
}

/// Queue of callbacks that run once the current frame has been committed.
pub struct FrameScheduler {
    queue: Mutex<FrameQueue>,
    flushing: AtomicBool,
}

impl FrameScheduler {
    /// Create a scheduler with no pending callbacks.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(FrameQueue {
                callbacks: SlotMap::with_key(),
                order: VecDeque::new(),
                frame_number: 0,
            }),
            flushing: AtomicBool::new(false),
        }
    }

    /// Schedule a callback to run at the end of the current frame.
    ///
    /// Returns an ID that can be used to cancel the callback.
    pub fn add_post_frame_callback<F>(&self, callback: F) -> FrameCallbackId
    where
        F: FnOnce(FrameInfo) + Send + 'static,
    {
        let mut queue = self.queue.lock();
        let id = queue.callbacks.insert(Box::new(callback));
        queue.order.push_back(id);
        tracing::trace!(target: "lattice_morph_core::frame", ?id, "post-frame callback scheduled");
        id
    }

    /// Schedule a computation after the next frame and get its result as a promise.
    ///
    /// The promise resolves with the value returned by `f`, or is cancelled
    /// when `f` returns `None`.
    pub fn after_next_frame<T, F>(&self, f: F) -> Deferred<T>
    where
        T: Send + 'static,
        F: FnOnce(FrameInfo) -> Option<T> + Send + 'static,
    {
        let (resolver, promise) = deferred();
        self.add_post_frame_callback(move |info| match f(info) {
            Some(value) => resolver.resolve(value),
            None => resolver.cancel(),
        });
        promise
    }

    /// Cancel a pending callback.
    pub fn cancel(&self, id: FrameCallbackId) -> Result<()> {
        let mut queue = self.queue.lock();
        if queue.callbacks.remove(id).is_some() {
            queue.order.retain(|pending| *pending != id);
            Ok(())
        } else {
            crate::morph_debug!(?id, "cancel of unknown or already run frame callback");
            Err(SchedulerError::InvalidCallbackId.into())
        }
    }

    /// Check if there are any pending callbacks.
    pub fn has_pending(&self) -> bool {
        !self.queue.lock().callbacks.is_empty()
    }

    /// Get the number of pending callbacks.
    pub fn pending_count(&self) -> usize {
        self.queue.lock().callbacks.len()
    }

    /// Number of frames ended so far.
    pub fn frame_number(&self) -> u64 {
        self.queue.lock().frame_number
    }

    /// Whether post-frame callbacks are currently being flushed.
    pub fn is_flushing(&self) -> bool {
        self.flushing.load(Ordering::SeqCst)
    }

    /// End the current frame and run every callback scheduled before this call.
    ///
    /// Returns the number of callbacks executed.
    pub fn end_frame(&self, elapsed: Duration) -> Result<usize> {
        if self.flushing.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::ReentrantFlush.into());
        }
        let _flush = FlushGuard(&self.flushing);

        let (info, batch) = {
            let mut queue = self.queue.lock();
            queue.frame_number += 1;
            let info = FrameInfo {
                frame_number: queue.frame_number,
                elapsed,
            };
            let order = std::mem::take(&mut queue.order);
            let batch: Vec<BoxedFrameCallback> = order
                .into_iter()
                .filter_map(|id| queue.callbacks.remove(id))
                .collect();
            (info, batch)
        };

        let _span = tracing::trace_span!(
            target: "lattice_morph_core::frame",
            "frame_flush",
            frame = info.frame_number,
            callbacks = batch.len()
        )
        .entered();

        let count = batch.len();
        for callback in batch {
            callback(info);
        }
        Ok(count)
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.queue.lock();
        f.debug_struct("FrameScheduler")
            .field("frame_number", &queue.frame_number)
            .field("pending", &queue.callbacks.len())
            .field("flushing", &self.is_flushing())
            .finish()
    }
}

struct FlushGuard<'a>(&'a AtomicBool);

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

static_assertions::assert_impl_all!(FrameScheduler: Send, Sync);
