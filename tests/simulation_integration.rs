//! Integration tests for the frame scheduler
//!
//! Drives full frames (spawn, physics, expiry, sweep, render) and checks the
//! behaviour a host can observe.

use rainfall::{
    RecordingSurface, Simulation, SpawnSettings, SpawnSystem,
};
use rainfall_core::{ComponentMask, EntityKey, Expiry, Raindrop, Transform, Vec2, World};

const DT: f32 = 1.0 / 60.0;

/// A simulation that never spawns, so tests control the population
fn quiet_simulation() -> Simulation {
    let settings = SpawnSettings::new(0, 800.0, [-480.0, -240.0], 0.0, 0.0).unwrap();
    Simulation::with_seed(5).with_spawn(SpawnSystem::new(settings))
}

fn add_drop(world: &mut World, position: Vec2, velocity: Vec2) -> EntityKey {
    let e = world.create();
    world.put(e, Transform::from_position(position)).unwrap();
    world.put(e, Raindrop::default().with_velocity(velocity)).unwrap();
    e
}

#[test]
fn test_zero_delay_spawns_fifty_per_frame() {
    let mut sim = Simulation::with_seed(1);

    for frame in 1..=5 {
        let stats = sim.update(DT).unwrap();
        assert_eq!(stats.spawned, 50);
        assert_eq!(stats.alive, 50 * frame);
    }

    for p in sim.particles().unwrap() {
        assert!(p.position.x >= 0.0 && p.position.x < 800.0);
        assert!(p.time_remaining.is_none());
    }
}

#[test]
fn test_drop_above_ground_keeps_falling() {
    let mut sim = quiet_simulation();
    let e = add_drop(sim.world_mut(), Vec2::new(10.0, 470.0), Vec2::new(0.0, 50.0));

    let stats = sim.update(0.01).unwrap();

    assert_eq!(stats.impacts, 0);
    let world = sim.world();
    assert!((world.get::<Raindrop>(e).unwrap().velocity.y - 55.0).abs() < 1e-4);
    assert!((world.get::<Transform>(e).unwrap().position.y - 470.55).abs() < 1e-3);
}

#[test]
fn test_impact_replaces_drop_with_three_splashes() {
    let mut sim = quiet_simulation();
    let e = add_drop(sim.world_mut(), Vec2::new(250.0, 479.0), Vec2::new(0.0, 300.0));

    let stats = sim.update(0.1).unwrap();

    assert_eq!(stats.impacts, 1);
    assert_eq!(stats.splashes, 3);
    assert_eq!(stats.destroyed, 1);
    assert_eq!(stats.alive, 3);
    assert!(!sim.world().is_alive(e));

    let splashes = sim.particles().unwrap();
    let sizes: Vec<f32> = splashes.iter().map(|p| p.size).collect();
    assert_eq!(sizes, vec![0.5, 1.0, 1.5]);
    for p in &splashes {
        assert_eq!(p.position, Vec2::new(250.0, 479.0));
        // Created at 1.0s, then counted down by this frame's expiry pass
        let remaining = p.time_remaining.unwrap();
        assert!((remaining - 0.9).abs() < 1e-6);
    }
}

#[test]
fn test_nearly_expired_splash_removed_same_frame() {
    let mut sim = quiet_simulation();
    let world = sim.world_mut();
    let e = add_drop(world, Vec2::new(0.0, 0.0), Vec2::ZERO);
    world.put(e, Expiry::new(0.05)).unwrap();

    let stats = sim.update(0.1).unwrap();

    assert_eq!(stats.expired, 1);
    assert!(!sim.world().is_alive(e));
}

#[test]
fn test_splash_expires_on_exact_frame() {
    let mut sim = quiet_simulation();
    let world = sim.world_mut();
    let e = add_drop(world, Vec2::new(0.0, 0.0), Vec2::ZERO);
    world.put(e, Expiry::new(1.0)).unwrap();

    for expected in [0.75, 0.5, 0.25] {
        sim.update(0.25).unwrap();
        assert_eq!(sim.world().get::<Expiry>(e).unwrap().time_remaining, expected);
    }
    let stats = sim.update(0.25).unwrap();
    assert_eq!(stats.expired, 1);
    assert!(!sim.world().is_alive(e));
}

#[test]
fn test_splashes_track_impacts_every_frame() {
    let mut sim = Simulation::with_seed(11);
    let mut total_impacts = 0;

    for _ in 0..240 {
        let stats = sim.update(DT).unwrap();
        assert_eq!(stats.splashes, 3 * stats.impacts);
        assert_eq!(stats.destroyed, stats.impacts + stats.expired);
        total_impacts += stats.impacts;
    }

    // Drops spawned on the first frames have had time to land
    assert!(total_impacts > 0);
}

#[test]
fn test_destroyed_entities_not_rendered() {
    let mut sim = quiet_simulation();
    add_drop(sim.world_mut(), Vec2::new(100.0, 479.0), Vec2::new(0.0, 300.0));
    let mut surface = RecordingSurface::new();

    sim.frame(0.1, &mut surface).unwrap();

    // Only the splashes remain; the impacting drop (size 3) is gone
    assert_eq!(surface.rect_count(), 3);
    assert!(surface.instances().iter().all(|r| r.size[0] < 3.0));
    assert_eq!(sim.world().count(ComponentMask::PARTICLE), 3);
}

#[test]
fn test_same_seed_same_trace() {
    let mut a = Simulation::with_seed(2024);
    let mut b = Simulation::with_seed(2024);

    for _ in 0..150 {
        let stats_a = a.update(DT).unwrap();
        let stats_b = b.update(DT).unwrap();
        assert_eq!(stats_a, stats_b);
    }
    assert_eq!(a.particles().unwrap(), b.particles().unwrap());
}

#[test]
fn test_different_seed_different_trace() {
    let mut a = Simulation::with_seed(1);
    let mut b = Simulation::with_seed(2);
    a.update(DT).unwrap();
    b.update(DT).unwrap();
    assert_ne!(a.particles().unwrap(), b.particles().unwrap());
}

#[test]
fn test_render_after_update_draws_every_particle() {
    let mut sim = Simulation::with_seed(9);
    let mut surface = RecordingSurface::new();

    for _ in 0..120 {
        surface.reset();
        let stats = sim.frame(DT, &mut surface).unwrap();
        assert_eq!(surface.rect_count(), stats.alive);
    }
    assert_eq!(surface.as_bytes().len(), surface.rect_count() * 32);
}
