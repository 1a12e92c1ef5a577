//! Visual parameters of a container transform.
//!
//! A [`TransitionStyle`] can be built in code or loaded from TOML. Every field
//! has a default, so a style file only needs the values it changes:
//!
//! ```toml
//! transition_kind = "fade_through"
//! closed_color = "#EEEEEEFF"
//! duration_ms = 450
//!
//! [closed_shape]
//! radii = 12.0
//! ```

use std::path::Path;
use std::time::Duration;

use lattice_morph_render::{Color, ShapeBorder};
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{MorphError, MorphResult};

/// How the closed and open content fade into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// The open content fades in over the closed content.
    #[default]
    Fade,
    /// The closed content fades out before the open content fades in.
    FadeThrough,
}

/// How the morphing surface clips its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipBehavior {
    /// Children may paint outside the surface.
    None,
    /// Clip to the surface's bounding rectangle.
    HardEdge,
    /// Clip to the surface's rounded outline.
    #[default]
    AntiAlias,
}

/// Colors, elevations, shapes and timing of a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionStyle {
    /// Surface color while closed.
    pub closed_color: Color,
    /// Surface color while open.
    pub open_color: Color,
    /// Color shown between the two contents in a fade-through. Defaults to the
    /// navigator's canvas color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_color: Option<Color>,
    pub closed_elevation: f32,
    pub open_elevation: f32,
    pub closed_shape: ShapeBorder,
    pub open_shape: ShapeBorder,
    pub closed_shadow_color: Color,
    pub open_shadow_color: Color,
    /// Tint blended over the surface in proportion to its elevation.
    pub closed_surface_tint_color: Color,
    pub open_surface_tint_color: Color,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
    pub transition_kind: TransitionKind,
    pub easing: Easing,
    /// How the morphing surface clips the closed and open content while the
    /// transition runs. The closed host is not clipped by this setting.
    pub clip_behavior: ClipBehavior,
}

impl Default for TransitionStyle {
    fn default() -> Self {
        Self {
            closed_color: Color::WHITE,
            open_color: Color::WHITE,
            middle_color: None,
            closed_elevation: 1.0,
            open_elevation: 4.0,
            closed_shape: ShapeBorder::rounded(4.0),
            open_shape: ShapeBorder::rectangle(),
            closed_shadow_color: Color::TRANSPARENT,
            open_shadow_color: Color::TRANSPARENT,
            closed_surface_tint_color: Color::TRANSPARENT,
            open_surface_tint_color: Color::TRANSPARENT,
            duration: Duration::from_millis(300),
            transition_kind: TransitionKind::Fade,
            easing: Easing::FastOutSlowIn,
            clip_behavior: ClipBehavior::AntiAlias,
        }
    }
}

impl TransitionStyle {
    /// Parse a style from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> MorphResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML style file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> MorphResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| MorphError::StyleFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Serialize the style to TOML.
    pub fn to_toml_string(&self) -> MorphResult<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn with_closed_color(mut self, color: Color) -> Self {
        self.closed_color = color;
        self
    }

    pub fn with_open_color(mut self, color: Color) -> Self {
        self.open_color = color;
        self
    }

    pub fn with_middle_color(mut self, color: Color) -> Self {
        self.middle_color = Some(color);
        self
    }

    pub fn with_elevations(mut self, closed: f32, open: f32) -> Self {
        self.closed_elevation = closed;
        self.open_elevation = open;
        self
    }

    pub fn with_shapes(mut self, closed: ShapeBorder, open: ShapeBorder) -> Self {
        self.closed_shape = closed;
        self.open_shape = open;
        self
    }

    pub fn with_shadow_colors(mut self, closed: Color, open: Color) -> Self {
        self.closed_shadow_color = closed;
        self.open_shadow_color = open;
        self
    }

    pub fn with_surface_tint_colors(mut self, closed: Color, open: Color) -> Self {
        self.closed_surface_tint_color = closed;
        self.open_surface_tint_color = open;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_kind(mut self, kind: TransitionKind) -> Self {
        self.transition_kind = kind;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_clip_behavior(mut self, clip_behavior: ClipBehavior) -> Self {
        self.clip_behavior = clip_behavior;
        self
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_morph_render::CornerRadii;

    #[test]
    fn test_defaults() {
        let style = TransitionStyle::default();
        assert_eq!(style.closed_color, Color::WHITE);
        assert_eq!(style.closed_elevation, 1.0);
        assert_eq!(style.open_elevation, 4.0);
        assert_eq!(style.closed_shape.radii, CornerRadii::uniform(4.0));
        assert!(style.open_shape.radii.is_zero());
        assert_eq!(style.duration, Duration::from_millis(300));
        assert_eq!(style.transition_kind, TransitionKind::Fade);
        assert_eq!(style.easing, Easing::FastOutSlowIn);
        assert_eq!(style.clip_behavior, ClipBehavior::AntiAlias);
    }

    #[test]
    fn test_partial_toml() {
        let style = TransitionStyle::from_toml_str(
            r##"
transition_kind = "fade_through"
closed_color = "#FF0000FF"
duration_ms = 450

[closed_shape]
radii = 12.0
"##,
        )
        .unwrap();
        assert_eq!(style.transition_kind, TransitionKind::FadeThrough);
        assert_eq!(style.closed_color, Color::RED);
        assert_eq!(style.duration, Duration::from_millis(450));
        assert_eq!(style.closed_shape, ShapeBorder::rounded(12.0));
        assert_eq!(style.open_color, Color::WHITE);
    }

    #[test]
    fn test_toml_round_trip() {
        let style = TransitionStyle::default()
            .with_kind(TransitionKind::FadeThrough)
            .with_middle_color(Color::BLACK)
            .with_elevations(2.0, 8.0);
        let text = style.to_toml_string().unwrap();
        assert_eq!(TransitionStyle::from_toml_str(&text).unwrap(), style);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TransitionStyle::from_toml_str("transition_kind = \"slide\"").unwrap_err();
        assert!(matches!(err, MorphError::Config(_)));
        let err = TransitionStyle::from_toml_str("closed_color = \"not a color\"").unwrap_err();
        assert!(matches!(err, MorphError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TransitionStyle::from_toml_file("/nonexistent/style.toml").unwrap_err();
        assert!(matches!(err, MorphError::StyleFile { .. }));
    }
}
