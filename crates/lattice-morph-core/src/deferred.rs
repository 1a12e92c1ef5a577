//! One-shot promises for values produced by deferred work.
//!
//! [`deferred`] creates a connected [`Resolver`]/[`Deferred`] pair. The
//! resolver side is moved into a post-frame callback; the promise side is kept
//! by whoever wants the value. A promise settles exactly once: it is either
//! resolved with a value or cancelled. Dropping an unsettled resolver cancels.
//!
//! `Deferred<T>` implements [`Future`] with `Output = Option<T>` (`None` when
//! cancelled), and can also be polled synchronously with
//! [`Deferred::try_take`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;

enum Slot<T> {
    Pending,
    Resolved(T),
    Taken,
    Cancelled,
}

struct Shared<T> {
    slot: Slot<T>,
    waker: Option<Waker>,
}

/// Create a connected resolver/promise pair.
pub fn deferred<T>() -> (Resolver<T>, Deferred<T>) {
    let shared = Arc::new(Mutex::new(Shared {
        slot: Slot::Pending,
        waker: None,
    }));
    (
        Resolver {
            shared: shared.clone(),
        },
        Deferred { shared },
    )
}

/// The producing half of a deferred value.
pub struct Resolver<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T> Resolver<T> {
    /// Settle the promise with a value.
    pub fn resolve(self, value: T) {
        self.settle(Slot::Resolved(value));
    }

    /// Settle the promise without a value.
    pub fn cancel(self) {
        self.settle(Slot::Cancelled);
    }

    /// Returns whether this call settled the promise.
    fn settle(&self, outcome: Slot<T>) -> bool {
        let waker = {
            let mut shared = self.shared.lock();
            if !matches!(shared.slot, Slot::Pending) {
                return false;
            }
            shared.slot = outcome;
            shared.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }
}

impl<T> Drop for Resolver<T> {
    fn drop(&mut self) {
        if self.settle(Slot::Cancelled) {
            crate::morph_trace!("resolver dropped unsettled; promise cancelled");
        }
    }
}

/// The consuming half of a deferred value.
pub struct Deferred<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T> Deferred<T> {
    /// A promise that is already resolved.
    pub fn resolved(value: T) -> Self {
        let (resolver, promise) = deferred();
        resolver.resolve(value);
        promise
    }

    /// A promise that is already cancelled.
    pub fn cancelled() -> Self {
        let (resolver, promise) = deferred();
        resolver.cancel();
        promise
    }

    /// Whether the promise has not settled yet.
    pub fn is_pending(&self) -> bool {
        matches!(self.shared.lock().slot, Slot::Pending)
    }

    /// Whether the promise settled with a value (taken or not).
    pub fn is_resolved(&self) -> bool {
        matches!(self.shared.lock().slot, Slot::Resolved(_) | Slot::Taken)
    }

    /// Whether the promise settled without a value.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.shared.lock().slot, Slot::Cancelled)
    }

    /// Take the value if the promise has resolved and the value is still there.
    pub fn try_take(&self) -> Option<T> {
        let mut shared = self.shared.lock();
        match std::mem::replace(&mut shared.slot, Slot::Taken) {
            Slot::Resolved(value) => Some(value),
            other => {
                shared.slot = other;
                None
            }
        }
    }
}

impl<T> Future for Deferred<T> {
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.shared.lock();
        match std::mem::replace(&mut shared.slot, Slot::Taken) {
            Slot::Resolved(value) => Poll::Ready(Some(value)),
            Slot::Pending => {
                shared.slot = Slot::Pending;
                shared.waker = Some(cx.waker().clone());
                Poll::Pending
            }
            Slot::Cancelled => {
                shared.slot = Slot::Cancelled;
                Poll::Ready(None)
            }
            Slot::Taken => Poll::Ready(None),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.shared.lock().slot {
            Slot::Pending => "pending",
            Slot::Resolved(_) => "resolved",
            Slot::Taken => "taken",
            Slot::Cancelled => "cancelled",
        };
        f.debug_struct("Deferred").field("state", &state).finish()
    }
}

static_assertions::assert_impl_all!(Deferred<u32>: Send, Sync);
static_assertions::assert_impl_all!(Resolver<u32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;

    fn poll_once<T>(promise: &mut Deferred<T>) -> Poll<Option<T>> {
        let mut cx = Context::from_waker(Waker::noop());
        pin!(promise).poll(&mut cx)
    }

    #[test]
    fn test_resolve_then_take() {
        let (resolver, promise) = deferred();
        assert!(promise.is_pending());
        resolver.resolve(7);
        assert!(promise.is_resolved());
        assert_eq!(promise.try_take(), Some(7));
        assert_eq!(promise.try_take(), None);
        assert!(promise.is_resolved());
    }

    #[test]
    fn test_dropped_resolver_cancels() {
        let (resolver, promise) = deferred::<u8>();
        drop(resolver);
        assert!(promise.is_cancelled());
    }

    #[test]
    fn test_future_poll() {
        let (resolver, mut promise) = deferred();
        assert!(poll_once(&mut promise).is_pending());
        resolver.resolve("done");
        assert_eq!(poll_once(&mut promise), Poll::Ready(Some("done")));
    }

    #[test]
    fn test_future_poll_cancelled() {
        let mut promise = Deferred::<i32>::cancelled();
        assert_eq!(poll_once(&mut promise), Poll::Ready(None));
        assert!(promise.is_cancelled());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Deferred::resolved(3).try_take(), Some(3));
        assert!(Deferred::<()>::cancelled().is_cancelled());
    }
}
