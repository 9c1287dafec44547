pub mod braking;
pub mod inertia;
pub mod playback;

// Re-export commonly used types for convenience
pub use braking::BrakingInertia;
pub use inertia::{InertiaModel, ScaledCamera, Trajectory};
pub use playback::{CancellationToken, InertiaPlayback};
