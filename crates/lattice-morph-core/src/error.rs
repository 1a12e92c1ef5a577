//! Error types for Lattice Morph core systems.

use std::fmt;

/// The main error type for core operations.
#[derive(Debug)]
pub enum CoreError {
    /// Signal-related error.
    Signal(SignalError),
    /// Frame scheduler error.
    Scheduler(SchedulerError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal(err) => write!(f, "Signal error: {err}"),
            Self::Scheduler(err) => write!(f, "Scheduler error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Signal(err) => Some(err),
            Self::Scheduler(err) => Some(err),
        }
    }
}

impl From<SignalError> for CoreError {
    fn from(err: SignalError) -> Self {
        Self::Signal(err)
    }
}

impl From<SchedulerError> for CoreError {
    fn from(err: SchedulerError) -> Self {
        Self::Scheduler(err)
    }
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    InvalidConnection,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConnection => write!(f, "Invalid or disconnected connection ID"),
        }
    }
}

impl std::error::Error for SignalError {}

/// Frame scheduler errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The callback ID is invalid, already ran, or was cancelled.
    InvalidCallbackId,
    /// `end_frame` was called from inside a post-frame callback.
    ReentrantFlush,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCallbackId => write!(f, "Invalid or already executed callback ID"),
            Self::ReentrantFlush => {
                write!(f, "Cannot end a frame while post-frame callbacks are running")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_chains_source() {
        let err: CoreError = SchedulerError::ReentrantFlush.into();
        assert!(err.to_string().starts_with("Scheduler error:"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_signal_error_conversion() {
        let err = CoreError::from(SignalError::InvalidConnection);
        assert!(matches!(err, CoreError::Signal(SignalError::InvalidConnection)));
    }
}
