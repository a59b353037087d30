//! Simulation systems
//!
//! Spawn and expiry live here beside the frame scheduler; physics and
//! rendering come from their own crates.

mod expiry;
mod simulation;
mod spawn;

pub use expiry::ExpirySystem;
pub use simulation::{FrameStats, ParticleState, Simulation, SimulationError};
pub use spawn::{SpawnSettings, SpawnSystem};
