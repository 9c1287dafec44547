//! Prelude module for common robomap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use robomap::prelude::*;`

pub use crate::core::{
    bounds::{Bounds, Section},
    camera::{nice_scale_length, Camera, ZoomLevels},
    config::{
        InertiaConfig, InertiaModelKind, InteractionProfile, MapInteractionConfig, PanningConfig,
        ZoomConfig,
    },
    frame::{Origin, UserFrame, XAxis, YAxis},
    geo::Point,
};

pub use crate::spatial::{
    clustering::{ClusterOptions, ClusterSolution, ClusterSolver, CoverMethod},
    cover::{Circle, Cover, Cover1D, Span},
    distant::{DistantSolution, EdgeCover, Region},
    enclosing::{EnclosingCircle, Welzl},
};

pub use crate::input::{
    handler::GestureController,
    panning::{PanningSession, SessionPhase},
    pointer::PointerId,
};

pub use crate::animation::{
    braking::BrakingInertia,
    inertia::{InertiaModel, ScaledCamera, Trajectory},
    playback::{CancellationToken, InertiaPlayback},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{drive_playback, spawn_playback};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
