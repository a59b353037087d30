//! Rainfall spawn system
//!
//! Drops a batch of new raindrops above the top of the screen whenever its
//! countdown runs out, then rearms the countdown with a random delay.

use rainfall_core::{EcsError, Raindrop, Transform, UniformRange, Vec2, World};
use rand::Rng;

use crate::config::ConfigError;

/// Where, how many, and how often drops are spawned
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnSettings {
    /// Drops per batch
    pub batch_size: usize,
    /// Horizontal spawn interval, sampled half-open
    pub x_range: UniformRange,
    /// Vertical spawn interval, sampled half-open
    pub y_range: UniformRange,
    /// Seconds between batches, sampled inclusive
    pub delay: UniformRange,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            batch_size: 50,
            x_range: UniformRange::ordered(0.0, 800.0),
            y_range: UniformRange::ordered(-480.0, -240.0),
            delay: UniformRange::ordered(0.0, 0.0),
        }
    }
}

impl SpawnSettings {
    /// Validate raw bounds into spawn settings
    pub fn new(
        batch_size: usize,
        world_width: f32,
        spawn_y: [f32; 2],
        min_delay: f32,
        max_delay: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            batch_size,
            x_range: UniformRange::new(0.0, world_width)
                .map_err(|e| ConfigError::invalid_range("spawn.world_width", e))?,
            y_range: UniformRange::new(spawn_y[0], spawn_y[1])
                .map_err(|e| ConfigError::invalid_range("spawn.spawn_y", e))?,
            delay: UniformRange::new(min_delay, max_delay)
                .map_err(|e| ConfigError::invalid_range("spawn.min_delay..max_delay", e))?,
        })
    }
}

/// Periodically injects falling raindrops
pub struct SpawnSystem {
    settings: SpawnSettings,
    /// Seconds until the next batch
    spawn_delay: f32,
}

impl Default for SpawnSystem {
    fn default() -> Self {
        Self::new(SpawnSettings::default())
    }
}

impl SpawnSystem {
    /// Create a spawn system; the first batch comes after `max_delay` seconds
    pub fn new(settings: SpawnSettings) -> Self {
        let spawn_delay = settings.delay.max();
        Self { settings, spawn_delay }
    }

    /// The settings in use
    pub fn settings(&self) -> &SpawnSettings {
        &self.settings
    }

    /// Seconds until the next batch
    pub fn spawn_delay(&self) -> f32 {
        self.spawn_delay
    }

    /// Advance the countdown by `dt`, spawning a batch when it runs out.
    /// Returns the number of drops spawned.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        world: &mut World,
        dt: f32,
        rng: &mut R,
    ) -> Result<usize, EcsError> {
        self.spawn_delay -= dt;
        if self.spawn_delay > 0.0 {
            return Ok(0);
        }

        for _ in 0..self.settings.batch_size {
            let position = Vec2::new(
                self.settings.x_range.sample(rng),
                self.settings.y_range.sample(rng),
            );
            Self::spawn_drop(world, position)?;
        }
        self.spawn_delay = self.settings.delay.sample_inclusive(rng);

        log::trace!(
            "spawned {} drops, next batch in {:.3}s",
            self.settings.batch_size,
            self.spawn_delay
        );
        Ok(self.settings.batch_size)
    }

    /// Create one falling drop at rest
    fn spawn_drop(world: &mut World, position: Vec2) -> Result<(), EcsError> {
        let entity = world.create();
        world.put(entity, Transform::from_position(position))?;
        world.put(entity, Raindrop::default())?;
        Ok(())
    }
}
