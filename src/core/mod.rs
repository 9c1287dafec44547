pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod frame;
pub mod geo;
