//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`RAIN_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::fmt;
use std::path::Path;

use rainfall_core::{InvalidRange, Vec2};
use rainfall_physics::SplashConfig;
use rainfall_render::{Color, RenderStyle, SamplingMode};

use crate::systems::SpawnSettings;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame driver configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Spawn configuration
    #[serde(default)]
    pub spawn: SpawnConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`RAIN_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // RAIN_SPAWN__BATCH_SIZE=10 -> spawn.batch_size = 10
        figment = figment.merge(Env::prefixed("RAIN_").split("__"));

        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every random range and numeric bound
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.spawn.to_spawn_settings()?;
        self.physics.to_physics_config()?;
        Ok(())
    }
}

/// Frame driver configuration for the headless host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Random seed; omitted means seed from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Seconds per frame
    pub timestep: f32,
    /// Frames to run before exiting
    pub frames: u32,
    /// Log statistics every this many frames (0 disables)
    pub stats_interval: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            timestep: 1.0 / 60.0,
            frames: 600,
            stats_interval: 60,
        }
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.timestep.is_finite() || self.timestep < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "simulation.timestep must be a non-negative number, got {}",
                self.timestep
            )));
        }
        Ok(())
    }
}

/// Spawn configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Drops per batch
    pub batch_size: usize,
    /// Shortest delay between batches (seconds)
    pub min_delay: f32,
    /// Longest delay between batches (seconds)
    pub max_delay: f32,
    /// Drops spawn with x in [0, world_width)
    pub world_width: f32,
    /// Drops spawn with y in [spawn_y[0], spawn_y[1])
    pub spawn_y: [f32; 2],
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            min_delay: 0.0,
            max_delay: 0.0,
            world_width: 800.0,
            spawn_y: [-480.0, -240.0],
        }
    }
}

impl SpawnConfig {
    /// Validate into the spawn system's settings
    pub fn to_spawn_settings(&self) -> Result<SpawnSettings, ConfigError> {
        SpawnSettings::new(
            self.batch_size,
            self.world_width,
            self.spawn_y,
            self.min_delay,
            self.max_delay,
        )
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity [x, y] (positive y = down)
    pub gravity: [f32; 2],
    /// Ground plane Y position
    pub ground_y: f32,
    /// Splash droplets per impact
    pub splash_count: usize,
    /// Splash droplet lifetime (seconds)
    pub splash_lifetime: f32,
    /// Splash horizontal speed range [min, max]
    pub splash_horizontal_speed: [f32; 2],
    /// Fraction of impact speed sent back up [min, max]
    pub splash_rebound: [f32; 2],
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 500.0],
            ground_y: 480.0,
            splash_count: 3,
            splash_lifetime: 1.0,
            splash_horizontal_speed: [-100.0, 100.0],
            splash_rebound: [0.1, 0.2],
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's config, validating splash ranges
    pub fn to_physics_config(&self) -> Result<rainfall_physics::PhysicsConfig, ConfigError> {
        let splash = SplashConfig::new(
            self.splash_count,
            self.splash_lifetime,
            self.splash_horizontal_speed,
            self.splash_rebound,
        )
        .map_err(|e| ConfigError::invalid_range("physics.splash", e))?;

        Ok(rainfall_physics::PhysicsConfig::new(Vec2::from(self.gravity))
            .with_ground(self.ground_y)
            .with_splash(splash))
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a], premultiplied
    pub background_color: [f32; 4],
    /// Particle color [r, g, b, a], premultiplied
    pub particle_color: [f32; 4],
    /// Texture sampling for the particle batch
    pub sampling: SamplingMode,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        let style = RenderStyle::default();
        Self {
            background_color: style.background.to_array(),
            particle_color: style.particle.to_array(),
            sampling: style.sampling,
        }
    }
}

impl RenderingConfig {
    /// Convert to the render system's style
    pub fn to_render_style(&self) -> RenderStyle {
        RenderStyle {
            background: Color::from(self.background_color),
            particle: Color::from(self.particle_color),
            sampling: self.sampling,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema
    Load(String),
    /// A `[min, max]` pair was inverted or non-finite
    InvalidRange {
        /// Dotted path of the offending setting
        field: String,
        source: InvalidRange,
    },
    /// Any other out-of-bounds value
    Invalid(String),
}

impl ConfigError {
    /// Wrap a range error with the setting it came from
    pub fn invalid_range(field: impl Into<String>, source: InvalidRange) -> Self {
        ConfigError::InvalidRange {
            field: field.into(),
            source,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(e.to_string())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Configuration error: {}", msg),
            ConfigError::InvalidRange { field, source } => {
                write!(f, "Configuration error: {}: {}", field, source)
            }
            ConfigError::Invalid(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidRange { source, .. } => Some(source),
            ConfigError::Load(_) | ConfigError::Invalid(_) => None,
        }
    }
}
