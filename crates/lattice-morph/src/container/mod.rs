//! Container transform transitions.
//!
//! A container transform turns an element on screen (the *closed* state) into
//! a full-screen page (the *open* state) by morphing one surface between the
//! two: its bounds, shape, elevation and color are interpolated while the
//! closed and open contents cross-fade inside it.
//!
//! The pieces:
//!
//! - [`ClosedStateHost`] wraps the closed element and registers it by [`Tag`]
//!   in a [`HostRegistry`].
//! - [`ContainerTransform`] configures a transition: tag, [`TransitionStyle`]
//!   and the open content builder.
//! - [`ContainerTransformRoute`] is pushed onto a [`NavigationHost`] and runs
//!   the transition, measuring the host, driving the tweens and painting each
//!   frame into a display list.

mod config;
mod content;
mod host;
mod layer;
mod measure;
mod navigation;
mod route;
mod style;
mod tag;
mod tweens;

pub use config::{ContainerTransform, FallbackBuilder, FallbackFrame, OpenBuilder};
pub use content::{Content, ContentSlot, SlotPlacement};
pub use host::{ClosedStateHost, HostHandle, HostRegistry};
pub use layer::{FittedChild, LayerChild, paint_morph, paint_open_only, surface_tint_opacity};
pub use measure::{
    GeometrySnapshot, MeasureError, Measurements, MorphGeometry, capture_begin_rect,
    capture_end_rect,
};
pub use navigation::{NavigationHost, TransitionRoute};
pub use route::{CloseHandle, ContainerTransformRoute, RoutePhase};
pub use style::{ClipBehavior, TransitionKind, TransitionStyle};
pub use tag::{Tag, TagKey};
pub use tweens::{
    MorphFrame, MorphTweens, SCRIM_COLOR, closed_opacity_sequence, color_sequence,
    open_opacity_sequence, scrim_fade_in_sequence,
};
