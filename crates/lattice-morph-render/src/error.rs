//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while building or recording paint data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A color literal could not be parsed.
    #[error("invalid color literal {literal:?}: expected #RRGGBB or #RRGGBBAA")]
    InvalidColor { literal: String },

    /// A transform has no inverse (zero scale).
    #[error("transform is not invertible")]
    NonInvertibleTransform,

    /// A frame was finished with unbalanced save/restore calls.
    #[error("unbalanced render state: {depth} save(s) without restore")]
    UnbalancedState { depth: usize },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
