//! Physics and splash configuration

use rainfall_math::{InvalidRange, UniformRange, Vec2};

use crate::ground::GroundPlane;

/// Default gravity in pixels per second squared (y grows downward)
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 500.0);

/// Default y coordinate of the ground plane
pub const DEFAULT_GROUND_Y: f32 = 480.0;

/// Default number of splash droplets per impact
pub const DEFAULT_SPLASH_COUNT: usize = 3;

/// Default lifetime of a splash droplet in seconds
pub const DEFAULT_SPLASH_LIFETIME: f32 = 1.0;

/// How a falling drop breaks up when it hits the ground
#[derive(Clone, Debug, PartialEq)]
pub struct SplashConfig {
    /// Droplets created per impact
    pub count: usize,
    /// Seconds each droplet lives
    pub lifetime: f32,
    /// Size step: droplet `i` gets size `(i + 1) * size_step`
    pub size_step: f32,
    /// Horizontal velocity of each droplet
    pub horizontal_speed: UniformRange,
    /// Fraction of the impact speed sent back upward
    pub rebound_factor: UniformRange,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SPLASH_COUNT,
            lifetime: DEFAULT_SPLASH_LIFETIME,
            size_step: 0.5,
            horizontal_speed: UniformRange::ordered(-100.0, 100.0),
            rebound_factor: UniformRange::ordered(0.1, 0.2),
        }
    }
}

impl SplashConfig {
    /// Build a splash config from raw bounds, validating both ranges
    pub fn new(
        count: usize,
        lifetime: f32,
        horizontal_speed: [f32; 2],
        rebound_factor: [f32; 2],
    ) -> Result<Self, InvalidRange> {
        Ok(Self {
            count,
            lifetime,
            size_step: 0.5,
            horizontal_speed: UniformRange::new(horizontal_speed[0], horizontal_speed[1])?,
            rebound_factor: UniformRange::new(rebound_factor[0], rebound_factor[1])?,
        })
    }

    /// Size of droplet `index`
    #[inline]
    pub fn droplet_size(&self, index: usize) -> f32 {
        (index + 1) as f32 * self.size_step
    }
}

/// Configuration for the physics system
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravitational acceleration
    pub gravity: Vec2,
    /// The only collider in the world
    pub ground: GroundPlane,
    /// Splash behavior on impact
    pub splash: SplashConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            ground: GroundPlane::new(DEFAULT_GROUND_Y),
            splash: SplashConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Create a physics config with the given gravity and default ground and splash
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    /// Set the ground plane height
    pub fn with_ground(mut self, ground_y: f32) -> Self {
        self.ground = GroundPlane::new(ground_y);
        self
    }

    /// Set the splash behavior
    pub fn with_splash(mut self, splash: SplashConfig) -> Self {
        self.splash = splash;
        self
    }
}
