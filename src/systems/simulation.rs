//! Frame scheduler
//!
//! Owns the world, the systems, and the random source, and runs them in a
//! fixed order each frame:
//! 1. Spawn new drops
//! 2. Integrate motion and turn ground impacts into splashes
//! 3. Count down splash lifetimes
//! 4. Sweep entities destroyed this frame
//!
//! Rendering happens afterwards through [`Simulation::render`], so nothing
//! destroyed during the frame is drawn.

use std::fmt;

use rainfall_core::{ComponentMask, EcsError, Expiry, Raindrop, Transform, Vec2, World};
use rainfall_physics::PhysicsSystem;
use rainfall_render::{DrawSurface, RenderSystem};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{AppConfig, ConfigError};
use super::expiry::ExpirySystem;
use super::spawn::SpawnSystem;

/// What happened during one [`Simulation::update`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Drops spawned
    pub spawned: usize,
    /// Drops that hit the ground
    pub impacts: usize,
    /// Splash droplets created
    pub splashes: usize,
    /// Droplets whose lifetime ran out
    pub expired: usize,
    /// Entities swept at the end of the frame
    pub destroyed: usize,
    /// Entities alive after the sweep
    pub alive: usize,
}

/// Observable state of one particle, in world iteration order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// `Some` for splash droplets
    pub time_remaining: Option<f32>,
}

/// Error returned by [`Simulation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// A system hit a world invariant violation
    Ecs(EcsError),
    /// Elapsed time was negative or not a number
    InvalidTimestep(f32),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Ecs(e) => write!(f, "Simulation error: {}", e),
            SimulationError::InvalidTimestep(dt) => {
                write!(f, "Invalid timestep: {} (must be finite and >= 0)", dt)
            }
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Ecs(e) => Some(e),
            SimulationError::InvalidTimestep(_) => None,
        }
    }
}

impl From<EcsError> for SimulationError {
    fn from(e: EcsError) -> Self {
        SimulationError::Ecs(e)
    }
}

/// The rainfall simulation
pub struct Simulation {
    world: World,
    spawn: SpawnSystem,
    physics: PhysicsSystem,
    expiry: ExpirySystem,
    render: RenderSystem,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Create a simulation with default settings, seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Create a simulation with default settings and a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            world: World::new(),
            spawn: SpawnSystem::default(),
            physics: PhysicsSystem::default(),
            expiry: ExpirySystem::new(),
            render: RenderSystem::default(),
            rng,
        }
    }

    /// Build a simulation from application config
    ///
    /// Uses `simulation.seed` when set, otherwise seeds from entropy.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let rng = match config.simulation.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            world: World::new(),
            spawn: SpawnSystem::new(config.spawn.to_spawn_settings()?),
            physics: PhysicsSystem::new(config.physics.to_physics_config()?),
            expiry: ExpirySystem::new(),
            render: RenderSystem::new(config.rendering.to_render_style()),
            rng,
        })
    }

    /// Replace the spawn system
    pub fn with_spawn(mut self, spawn: SpawnSystem) -> Self {
        self.spawn = spawn;
        self
    }

    /// Replace the physics system
    pub fn with_physics(mut self, physics: PhysicsSystem) -> Self {
        self.physics = physics;
        self
    }

    /// Get a reference to the world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) -> Result<FrameStats, SimulationError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimulationError::InvalidTimestep(dt));
        }

        self.world.begin_frame();
        let spawned = self.spawn.run(&mut self.world, dt, &mut self.rng)?;
        let report = self.physics.run(&mut self.world, dt, &mut self.rng)?;
        let expired = self.expiry.run(&mut self.world, dt)?;
        let destroyed = self.world.apply_destructions();

        let stats = FrameStats {
            frame: self.world.frame(),
            spawned,
            impacts: report.impacts,
            splashes: report.splashes_created,
            expired,
            destroyed,
            alive: self.world.entity_count(),
        };

        log::debug!(
            "frame {}: +{} drops, {} impacts, {} splashes, {} expired, {} alive",
            stats.frame,
            stats.spawned,
            stats.impacts,
            stats.splashes,
            stats.expired,
            stats.alive
        );

        Ok(stats)
    }

    /// Draw the current state, returning the number of particles drawn
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> Result<usize, SimulationError> {
        Ok(self.render.draw(&self.world, surface)?)
    }

    /// Update then render one frame
    pub fn frame<S: DrawSurface + ?Sized>(
        &mut self,
        dt: f32,
        surface: &mut S,
    ) -> Result<FrameStats, SimulationError> {
        let stats = self.update(dt)?;
        self.render(surface)?;
        Ok(stats)
    }

    /// State of every particle, in world iteration order
    pub fn particles(&self) -> Result<Vec<ParticleState>, SimulationError> {
        let mut particles = Vec::new();
        for entity in self.world.query(ComponentMask::PARTICLE) {
            let drop = self.world.get::<Raindrop>(entity)?;
            let time_remaining = if self.world.has::<Expiry>(entity) {
                Some(self.world.get::<Expiry>(entity)?.time_remaining)
            } else {
                None
            };
            particles.push(ParticleState {
                position: self.world.get::<Transform>(entity)?.position,
                velocity: drop.velocity,
                size: drop.size,
                time_remaining,
            });
        }
        Ok(particles)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
