//! Falling-rain particle simulation
//!
//! Raindrops spawn above the screen, fall under gravity, break into short-lived
//! splash droplets at the ground, and are drawn as filled squares.
//!
//! ```no_run
//! use rainfall::{RecordingSurface, Simulation};
//!
//! let mut sim = Simulation::with_seed(42);
//! let mut surface = RecordingSurface::new();
//! for _ in 0..60 {
//!     surface.reset();
//!     sim.frame(1.0 / 60.0, &mut surface).unwrap();
//! }
//! ```

pub mod config;
pub mod systems;

pub use config::{AppConfig, ConfigError};
pub use systems::{
    ExpirySystem, FrameStats, ParticleState, Simulation, SimulationError, SpawnSettings,
    SpawnSystem,
};

pub use rainfall_core::{EntityKey, World};
pub use rainfall_physics::PhysicsSystem;
pub use rainfall_render::{DrawSurface, RecordingSurface, RenderSystem};
