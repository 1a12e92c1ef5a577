//! Error types for container transforms.

use std::path::PathBuf;

use thiserror::Error;

use crate::animation::SequenceError;
use crate::container::{MeasureError, Tag};

/// Errors raised while configuring or running a container transform.
#[derive(Error, Debug)]
pub enum MorphError {
    /// No host is registered under the route's tag and no fallback was given.
    #[error("no closed-state host registered for tag {tag} and no fallback builder supplied")]
    UnmatchedTag { tag: Tag },

    /// A tween sequence could not be built.
    #[error("invalid tween sequence: {0}")]
    Sequence(#[from] SequenceError),

    /// Geometry could not be measured.
    #[error("measurement failed: {0}")]
    Measure(#[from] MeasureError),

    /// A transition style could not be parsed or serialized.
    #[error("invalid transition style: {0}")]
    Config(String),

    /// A transition style file could not be read.
    #[error("failed to read transition style from {path}: {source}")]
    StyleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The navigator the route was created for no longer exists.
    #[error("the navigator hosting this route has been dropped")]
    NavigatorDetached,
}

impl From<toml::de::Error> for MorphError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for MorphError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for container transform operations.
pub type MorphResult<T> = Result<T, MorphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_tag_message() {
        let err = MorphError::UnmatchedTag {
            tag: Tag::from("card-3"),
        };
        assert!(err.to_string().contains("card-3"));
    }

    #[test]
    fn test_sequence_conversion() {
        let err: MorphError = SequenceError::Empty.into();
        assert!(matches!(err, MorphError::Sequence(SequenceError::Empty)));
    }
}
