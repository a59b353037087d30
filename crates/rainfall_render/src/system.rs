//! Particle render system

use rainfall_core::{ComponentMask, EcsError, Raindrop, Transform, World};
use rainfall_math::Vec2;

use crate::color::Color;
use crate::surface::{DrawSurface, SamplingMode};

/// Colors and sampling for a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    /// Clear color
    pub background: Color,
    /// Fill color of every particle
    pub particle: Color,
    /// Sampling for the particle batch
    pub sampling: SamplingMode,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color::DARK_BLUE.scaled(0.2),
            particle: Color::LIGHT_BLUE,
            sampling: SamplingMode::PointClamp,
        }
    }
}

/// Draws every particle as a filled square
///
/// Read-only over the world: it never creates, destroys, or mutates entities.
#[derive(Default)]
pub struct RenderSystem {
    style: RenderStyle,
}

impl RenderSystem {
    /// Aspect of the entities this system draws
    pub const ASPECT: ComponentMask = ComponentMask::PARTICLE;

    /// Create a render system with the given style
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// The style in use
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Draw one frame, returning the number of particles drawn
    pub fn draw<S: DrawSurface + ?Sized>(&self, world: &World, surface: &mut S) -> Result<usize, EcsError> {
        surface.clear(self.style.background);
        surface.begin_batch(self.style.sampling);

        let mut drawn = 0;
        for entity in world.query(Self::ASPECT) {
            let position = world.get::<Transform>(entity)?.position;
            let size = world.get::<Raindrop>(entity)?.size;
            surface.draw_filled_rect(position, Vec2::splat(size), self.style.particle);
            drawn += 1;
        }

        surface.end_batch();
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rainfall_core::Expiry;

    #[test]
    fn test_draws_each_particle_as_square() {
        let mut world = World::new();
        let e = world.create();
        world.put(e, Transform::from_position(Vec2::new(10.0, 20.0))).unwrap();
        world.put(e, Raindrop::default()).unwrap();
        let splash = world.create();
        world.put(splash, Transform::from_position(Vec2::new(5.0, 479.0))).unwrap();
        world.put(splash, Raindrop::default().with_size(1.5)).unwrap();
        world.put(splash, Expiry::new(1.0)).unwrap();

        let mut surface = RecordingSurface::new();
        let drawn = RenderSystem::default().draw(&world, &mut surface).unwrap();

        assert_eq!(drawn, 2);
        let rects = surface.instances();
        assert_eq!(rects[0].position, [10.0, 20.0]);
        assert_eq!(rects[0].size, [3.0, 3.0]);
        assert_eq!(rects[1].size, [1.5, 1.5]);
        assert_eq!(rects[0].color, Color::LIGHT_BLUE.to_array());
    }

    #[test]
    fn test_frame_structure() {
        let world = World::new();
        let mut surface = RecordingSurface::new();
        let style = RenderStyle::default();

        RenderSystem::new(style).draw(&world, &mut surface).unwrap();

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Clear(style.background),
                DrawCommand::BeginBatch(SamplingMode::PointClamp),
                DrawCommand::EndBatch,
            ]
        );
    }

    #[test]
    fn test_skips_entities_without_raindrop() {
        let mut world = World::new();
        let marker = world.create();
        world.put(marker, Transform::default()).unwrap();

        let mut surface = RecordingSurface::new();
        assert_eq!(RenderSystem::default().draw(&world, &mut surface).unwrap(), 0);
    }

    #[test]
    fn test_does_not_draw_swept_entities() {
        let mut world = World::new();
        let e = world.create();
        world.put(e, Transform::default()).unwrap();
        world.put(e, Raindrop::default()).unwrap();
        world.destroy(e);
        world.apply_destructions();

        let mut surface = RecordingSurface::new();
        assert_eq!(RenderSystem::default().draw(&world, &mut surface).unwrap(), 0);
    }
}
