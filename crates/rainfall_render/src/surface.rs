//! Drawing surface abstraction
//!
//! The renderer never talks to a graphics device directly. A host hands it
//! something implementing [`DrawSurface`]; [`RecordingSurface`] is the
//! in-memory implementation used by the headless host and by tests.

use bytemuck::{Pod, Zeroable};
use rainfall_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Texture sampling used for a batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Nearest-neighbor, clamped: keeps pixel-art squares crisp at any scale
    #[default]
    PointClamp,
    /// Bilinear, clamped
    LinearClamp,
}

/// Where the render system draws
pub trait DrawSurface {
    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Color);

    /// Start a batch of primitives sharing a sampling mode
    fn begin_batch(&mut self, sampling: SamplingMode);

    /// Draw an axis-aligned filled rectangle with its top-left corner at `position`
    fn draw_filled_rect(&mut self, position: Vec2, size: Vec2, color: Color);

    /// Finish the current batch
    fn end_batch(&mut self);
}

/// One filled rectangle in GPU instance-buffer layout
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    /// Top-left corner
    pub position: [f32; 2],
    /// Width and height
    pub size: [f32; 2],
    /// Premultiplied RGBA
    pub color: [f32; 4],
}

impl RectInstance {
    /// Create an instance from a rectangle and color
    pub fn new(position: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            position: position.to_array(),
            size: size.to_array(),
            color: color.to_array(),
        }
    }
}

/// A call made against a [`RecordingSurface`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    BeginBatch(SamplingMode),
    FillRect(RectInstance),
    EndBatch,
}

/// A [`DrawSurface`] that records one frame of calls in memory
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    instances: Vec<RectInstance>,
    clear_color: Option<Color>,
    in_batch: bool,
}

impl RecordingSurface {
    /// Create an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far, keeping allocations
    pub fn reset(&mut self) {
        self.commands.clear();
        self.instances.clear();
        self.clear_color = None;
        self.in_batch = false;
    }

    /// Every call, in order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Every rectangle drawn, in order
    pub fn instances(&self) -> &[RectInstance] {
        &self.instances
    }

    /// The rectangles as raw bytes, ready for an instance buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Number of rectangles drawn
    pub fn rect_count(&self) -> usize {
        self.instances.len()
    }

    /// Color of the most recent clear
    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    /// Whether a batch was begun and not yet ended
    pub fn in_batch(&self) -> bool {
        self.in_batch
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.clear_color = Some(color);
        self.commands.push(DrawCommand::Clear(color));
    }

    fn begin_batch(&mut self, sampling: SamplingMode) {
        if self.in_batch {
            log::warn!("begin_batch called while a batch is open");
        }
        self.in_batch = true;
        self.commands.push(DrawCommand::BeginBatch(sampling));
    }

    fn draw_filled_rect(&mut self, position: Vec2, size: Vec2, color: Color) {
        if !self.in_batch {
            log::warn!("draw_filled_rect called outside a batch");
        }
        let instance = RectInstance::new(position, size, color);
        self.instances.push(instance);
        self.commands.push(DrawCommand::FillRect(instance));
    }

    fn end_batch(&mut self) {
        self.in_batch = false;
        self.commands.push(DrawCommand::EndBatch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_order() {
        let mut surface = RecordingSurface::new();
        surface.clear(Color::BLACK);
        surface.begin_batch(SamplingMode::PointClamp);
        assert!(surface.in_batch());
        surface.draw_filled_rect(Vec2::new(1.0, 2.0), Vec2::splat(3.0), Color::WHITE);
        surface.end_batch();

        assert_eq!(surface.commands().len(), 4);
        assert_eq!(surface.commands()[0], DrawCommand::Clear(Color::BLACK));
        assert_eq!(surface.commands()[1], DrawCommand::BeginBatch(SamplingMode::PointClamp));
        assert_eq!(surface.commands()[3], DrawCommand::EndBatch);
        assert!(!surface.in_batch());
        assert_eq!(surface.clear_color(), Some(Color::BLACK));
    }

    #[test]
    fn test_instance_bytes() {
        let mut surface = RecordingSurface::new();
        surface.begin_batch(SamplingMode::PointClamp);
        surface.draw_filled_rect(Vec2::ZERO, Vec2::splat(1.0), Color::WHITE);
        surface.draw_filled_rect(Vec2::ZERO, Vec2::splat(1.0), Color::WHITE);
        surface.end_batch();

        assert_eq!(std::mem::size_of::<RectInstance>(), 32);
        assert_eq!(surface.as_bytes().len(), 64);
        assert_eq!(surface.rect_count(), 2);
    }

    #[test]
    fn test_reset() {
        let mut surface = RecordingSurface::new();
        surface.clear(Color::BLACK);
        surface.begin_batch(SamplingMode::LinearClamp);
        surface.reset();
        assert!(surface.commands().is_empty());
        assert!(surface.clear_color().is_none());
        assert!(!surface.in_batch());
    }

    #[test]
    fn test_sampling_mode_default() {
        assert_eq!(SamplingMode::default(), SamplingMode::PointClamp);
    }
}
