//! Physics for the rainfall simulation
//!
//! This crate moves particles and handles the only collision in the world:
//! - Gravity integration (semi-implicit Euler)
//! - A single horizontal ground plane
//! - Splashing falling drops into short-lived droplets on impact

pub mod config;
pub mod ground;
pub mod system;

// Re-export commonly used types
pub use config::{PhysicsConfig, SplashConfig, DEFAULT_GRAVITY, DEFAULT_GROUND_Y};
pub use ground::GroundPlane;
pub use system::{ImpactReport, PhysicsSystem, SplashDroplet};
