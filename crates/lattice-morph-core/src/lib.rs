//! Core systems for Lattice Morph.
//!
//! This crate provides the foundational pieces the transition engine is built on:
//!
//! - **Signal/Slot System**: Type-safe notification between components
//! - **Property System**: Observable values with change detection
//! - **Frame Scheduler**: Post-frame callbacks that observe committed layout
//! - **Deferred Values**: One-shot promises settled by post-frame work
//! - **Logging**: `tracing` targets, perf spans and `morph_*!` macros
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use lattice_morph_core::{FrameScheduler, Property, Signal};
//!
//! let size = Property::new(0.0_f32);
//! let size_changed = Signal::<f32>::new();
//! size_changed.connect(|size| println!("size is now {size}"));
//!
//! let frames = FrameScheduler::new();
//! frames.add_post_frame_callback(move |_| {
//!     if size.set(120.0) {
//!         size_changed.emit(120.0);
//!     }
//! });
//! frames.end_frame(Duration::from_millis(16)).unwrap();
//! ```

pub mod deferred;
mod error;
pub mod frame;
pub mod logging;
pub mod property;
pub mod signal;

pub use deferred::{Deferred, Resolver, deferred};
pub use error::{CoreError, Result, SchedulerError, SignalError};
pub use frame::{FrameCallbackId, FrameInfo, FrameScheduler};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
