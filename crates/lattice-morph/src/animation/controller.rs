//! Time-driven progress for transitions.
//!
//! An [`AnimationController`] owns a progress value in `[0, 1]` and advances
//! it toward 1 (forward) or 0 (reverse) as frame time is fed to
//! [`tick`](AnimationController::tick). Status changes and value changes are
//! published through signals.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use lattice_morph::animation::{AnimationController, AnimationStatus};
//!
//! let controller = AnimationController::new(Duration::from_millis(300));
//! controller.forward();
//! assert_eq!(controller.status(), AnimationStatus::Forward);
//!
//! controller.tick(Duration::from_millis(300));
//! assert_eq!(controller.status(), AnimationStatus::Completed);
//! assert_eq!(controller.value(), 1.0);
//! ```

use std::time::Duration;

use lattice_morph_core::Signal;
use parking_lot::Mutex;

/// Where an animation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationStatus {
    /// Stopped at the beginning.
    #[default]
    Dismissed,
    /// Running from 0 toward 1.
    Forward,
    /// Running from 1 toward 0.
    Reverse,
    /// Stopped at the end.
    Completed,
}

impl AnimationStatus {
    /// Whether the status is one of the two running directions.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Forward | Self::Reverse)
    }

    #[inline]
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }

    #[inline]
    pub fn is_dismissed(self) -> bool {
        self == Self::Dismissed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    fn target(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => 0.0,
        }
    }

    fn running_status(self) -> AnimationStatus {
        match self {
            Self::Forward => AnimationStatus::Forward,
            Self::Reverse => AnimationStatus::Reverse,
        }
    }

    fn settled_status(self) -> AnimationStatus {
        match self {
            Self::Forward => AnimationStatus::Completed,
            Self::Reverse => AnimationStatus::Dismissed,
        }
    }
}

#[derive(Debug)]
struct ControllerState {
    value: f32,
    status: AnimationStatus,
    direction: Direction,
    running: bool,
}

/// Notifications collected under the lock and emitted after it is released.
#[derive(Default)]
struct Pending {
    value: Option<f32>,
    status: Option<AnimationStatus>,
}

/// Drives a progress value over a fixed duration.
pub struct AnimationController {
    duration: Duration,
    reverse_duration: Option<Duration>,
    state: Mutex<ControllerState>,
    status_changed: Signal<AnimationStatus>,
    value_changed: Signal<f32>,
}

impl AnimationController {
    /// Create a dismissed controller.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            reverse_duration: None,
            state: Mutex::new(ControllerState {
                value: 0.0,
                status: AnimationStatus::Dismissed,
                direction: Direction::Forward,
                running: false,
            }),
            status_changed: Signal::new(),
            value_changed: Signal::new(),
        }
    }

    /// Use a different duration when running in reverse.
    pub fn with_reverse_duration(mut self, duration: Duration) -> Self {
        self.reverse_duration = Some(duration);
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current progress in `[0, 1]`.
    pub fn value(&self) -> f32 {
        self.state.lock().value
    }

    pub fn status(&self) -> AnimationStatus {
        self.state.lock().status
    }

    /// Whether the controller is advancing on each tick.
    pub fn is_animating(&self) -> bool {
        self.state.lock().running
    }

    /// Emitted with the new status whenever it changes.
    pub fn status_changed(&self) -> &Signal<AnimationStatus> {
        &self.status_changed
    }

    /// Emitted with the new value whenever it changes.
    pub fn value_changed(&self) -> &Signal<f32> {
        &self.value_changed
    }

    /// Start running toward 1.
    pub fn forward(&self) {
        self.animate(Direction::Forward);
    }

    /// Start running toward 0.
    pub fn reverse(&self) {
        self.animate(Direction::Reverse);
    }

    fn animate(&self, direction: Direction) {
        let pending = {
            let mut state = self.state.lock();
            let mut pending = Pending::default();
            state.direction = direction;
            let target = direction.target();
            let status = if state.value == target || self.duration_for(direction).is_zero() {
                if state.value != target {
                    state.value = target;
                    pending.value = Some(target);
                }
                state.running = false;
                direction.settled_status()
            } else {
                state.running = true;
                direction.running_status()
            };
            if state.status != status {
                state.status = status;
                pending.status = Some(status);
            }
            pending
        };
        tracing::trace!(target: "lattice_morph::animation", ?direction, "animation started");
        self.notify(pending);
    }

    /// Jump to `value`, stopping any running animation.
    pub fn set_value(&self, value: f32) {
        let pending = {
            let mut state = self.state.lock();
            let mut pending = Pending::default();
            let value = value.clamp(0.0, 1.0);
            state.running = false;
            if state.value != value {
                state.value = value;
                pending.value = Some(value);
            }
            let status = if value == 1.0 {
                AnimationStatus::Completed
            } else if value == 0.0 {
                AnimationStatus::Dismissed
            } else {
                state.direction.running_status()
            };
            if state.status != status {
                state.status = status;
                pending.status = Some(status);
            }
            pending
        };
        self.notify(pending);
    }

    /// Stop advancing, keeping the current value and status.
    pub fn stop(&self) {
        self.state.lock().running = false;
    }

    /// Advance by `elapsed` frame time and return the new value.
    pub fn tick(&self, elapsed: Duration) -> f32 {
        let (value, pending) = {
            let mut state = self.state.lock();
            let mut pending = Pending::default();
            if state.running {
                let direction = state.direction;
                let duration = self.duration_for(direction);
                let delta = if duration.is_zero() {
                    1.0
                } else {
                    elapsed.as_secs_f32() / duration.as_secs_f32()
                };
                let next = match direction {
                    Direction::Forward => (state.value + delta).min(1.0),
                    Direction::Reverse => (state.value - delta).max(0.0),
                };
                if next != state.value {
                    state.value = next;
                    pending.value = Some(next);
                }
                if next == direction.target() {
                    state.running = false;
                    state.status = direction.settled_status();
                    pending.status = Some(state.status);
                }
            }
            (state.value, pending)
        };
        self.notify(pending);
        value
    }

    fn duration_for(&self, direction: Direction) -> Duration {
        match direction {
            Direction::Forward => self.duration,
            Direction::Reverse => self.reverse_duration.unwrap_or(self.duration),
        }
    }

    fn notify(&self, pending: Pending) {
        if let Some(value) = pending.value {
            self.value_changed.emit(value);
        }
        if let Some(status) = pending.status {
            tracing::debug!(target: "lattice_morph::animation", ?status, "animation status changed");
            self.status_changed.emit(status);
        }
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("AnimationController")
            .field("duration", &self.duration)
            .field("value", &state.value)
            .field("status", &state.status)
            .finish()
    }
}

static_assertions::assert_impl_all!(AnimationController: Send, Sync);
