//! # robomap
//!
//! The algorithmic core of an interactive map widget.
//!
//! Two engines live here:
//! - spatial marker clustering, which folds nearby markers into enclosing
//!   cover circles and groups off-screen markers into edge indicators;
//! - kinetic panning, which turns multi-pointer input into a pan + pinch-zoom
//!   camera transform and, on release, an analytic inertia trajectory.
//!
//! Rendering, event wiring and DOM work belong to the host and are not part
//! of this crate.

pub mod animation;
pub mod core;
pub mod input;
pub mod prelude;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod spatial;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    camera::{Camera, ZoomLevels},
    config::MapInteractionConfig,
    frame::UserFrame,
    geo::Point,
};

pub use spatial::{
    clustering::{ClusterOptions, ClusterSolution, ClusterSolver, CoverMethod},
    cover::{Circle, Cover, Cover1D, Span},
    distant::{DistantSolution, EdgeCover, Region},
};

pub use input::{handler::GestureController, panning::PanningSession, pointer::PointerId};

pub use animation::{
    braking::BrakingInertia,
    inertia::{InertiaModel, Trajectory},
    playback::{CancellationToken, InertiaPlayback},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("pointer {0} is already tracked")]
    DuplicatePointer(PointerId),

    #[error("pointer {0} is not tracked")]
    UnknownPointer(PointerId),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
