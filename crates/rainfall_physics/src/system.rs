//! Physics and impact system
//!
//! Each frame, every entity with a [`Transform`] and a [`Raindrop`]:
//! 1. Gets gravity integrated into its velocity
//! 2. Gets its velocity integrated into its position (semi-implicit Euler)
//! 3. If it is a falling drop (no [`Expiry`]) and reached the ground, breaks
//!    into splash droplets and is destroyed at the end of the frame

use rainfall_core::{ComponentMask, EcsError, EntityKey, Expiry, Raindrop, Transform, World};
use rainfall_math::Vec2;
use rand::Rng;

use crate::config::PhysicsConfig;

/// What one physics pass did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImpactReport {
    /// Entities whose motion was integrated
    pub integrated: usize,
    /// Falling drops that hit the ground and were destroyed
    pub impacts: usize,
    /// Splash droplets created
    pub splashes_created: usize,
}

/// A splash droplet about to be spawned
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashDroplet {
    pub transform: Transform,
    pub raindrop: Raindrop,
    pub expiry: Expiry,
}

/// Integrates gravity and turns ground impacts into splashes
pub struct PhysicsSystem {
    config: PhysicsConfig,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsSystem {
    /// Aspect of the entities this system processes
    pub const ASPECT: ComponentMask = ComponentMask::PARTICLE;

    /// Create a physics system with the given configuration
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Run one pass over every particle in `world`
    ///
    /// The set of particles is fixed when the pass starts, so droplets
    /// created by an impact are not integrated until the next frame.
    pub fn run<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        dt: f32,
        rng: &mut R,
    ) -> Result<ImpactReport, EcsError> {
        let mut report = ImpactReport::default();

        for entity in world.query(Self::ASPECT) {
            let (position, velocity) = self.integrate(world, entity, dt)?;
            report.integrated += 1;

            if self.config.ground.is_hit(position) && !world.has::<Expiry>(entity) {
                report.splashes_created += self.splash(world, position, velocity, rng)?;
                world.destroy(entity);
                report.impacts += 1;
                log::trace!("drop {:?} hit the ground at x={:.1}", entity, position.x);
            }
        }

        Ok(report)
    }

    /// Advance one entity by `dt`, returning its new position and velocity
    fn integrate(&self, world: &mut World, entity: EntityKey, dt: f32) -> Result<(Vec2, Vec2), EcsError> {
        let raindrop = world.get_mut::<Raindrop>(entity)?;
        raindrop.velocity += self.config.gravity * dt;
        let velocity = raindrop.velocity;

        let transform = world.get_mut::<Transform>(entity)?;
        transform.position += velocity * dt;

        Ok((transform.position, velocity))
    }

    /// Spawn the splash droplets for one impact, returning how many were made
    fn splash<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        impact_position: Vec2,
        impact_velocity: Vec2,
        rng: &mut R,
    ) -> Result<usize, EcsError> {
        for index in 0..self.config.splash.count {
            let droplet = self.droplet(index, impact_position, impact_velocity, rng);
            let entity = world.create();
            world.put(entity, droplet.transform)?;
            world.put(entity, droplet.raindrop)?;
            world.put(entity, droplet.expiry)?;
        }
        Ok(self.config.splash.count)
    }

    /// Build splash droplet `index` for a drop that hit at `impact_position`
    ///
    /// The droplet starts just above the ground, flies sideways at a random
    /// speed, and is kicked upward by a random fraction of the impact speed.
    pub fn droplet<R: Rng + ?Sized>(
        &self,
        index: usize,
        impact_position: Vec2,
        impact_velocity: Vec2,
        rng: &mut R,
    ) -> SplashDroplet {
        let splash = &self.config.splash;
        let vx = splash.horizontal_speed.sample_inclusive(rng);
        let vy = -impact_velocity.y * splash.rebound_factor.sample_inclusive(rng);

        SplashDroplet {
            transform: Transform::from_position(impact_position.with_y(self.config.ground.rest_height())),
            raindrop: Raindrop::new(Vec2::new(vx, vy), splash.droplet_size(index)),
            expiry: Expiry::new(splash.lifetime),
        }
    }
}
