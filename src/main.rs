//! Headless rainfall host
//!
//! Loads configuration, runs the simulation at a fixed timestep against an
//! in-memory draw surface, and logs statistics as it goes.

use std::process::ExitCode;

use rainfall::config::AppConfig;
use rainfall::{RecordingSurface, Simulation};

fn main() -> ExitCode {
    // Load configuration
    let config_result = AppConfig::load();
    let config = match &config_result {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };

    // Initialize logging; RUST_LOG overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting rainfall");

    if let Err(e) = config_result {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut sim = match Simulation::from_config(&config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let frames = config.simulation.frames;
    let dt = config.simulation.timestep;
    let interval = config.simulation.stats_interval;
    match config.simulation.seed {
        Some(seed) => log::info!("Running {} frames at dt={:.4}s (seed {})", frames, dt, seed),
        None => log::info!("Running {} frames at dt={:.4}s (unseeded)", frames, dt),
    }

    let mut surface = RecordingSurface::new();
    let mut total_spawned = 0;
    let mut total_impacts = 0;
    let mut total_expired = 0;

    for _ in 0..frames {
        surface.reset();
        let stats = match sim.frame(dt, &mut surface) {
            Ok(stats) => stats,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        total_spawned += stats.spawned;
        total_impacts += stats.impacts;
        total_expired += stats.expired;

        if interval > 0 && stats.frame % u64::from(interval) == 0 {
            log::info!(
                "frame {}: {} alive, {} drawn ({} bytes of instance data)",
                stats.frame,
                stats.alive,
                surface.rect_count(),
                surface.as_bytes().len()
            );
        }
    }

    log::info!(
        "Done: {} drops spawned, {} impacts, {} splashes expired, {} alive",
        total_spawned,
        total_impacts,
        total_expired,
        sim.world().entity_count()
    );
    ExitCode::SUCCESS
}
