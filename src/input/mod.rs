pub mod handler;
pub mod panning;
pub mod pointer;

// Re-export the essential types
pub use handler::GestureController;
pub use panning::{PanningSession, SessionPhase, TrailSample, TrailVelocity};
pub use pointer::PointerId;
