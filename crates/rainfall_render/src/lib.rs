//! Rendering for the rainfall simulation
//!
//! ## Key Components
//!
//! - [`DrawSurface`] - What a host provides to draw on
//! - [`RenderSystem`] - Draws every particle as a filled square
//! - [`RecordingSurface`] - In-memory surface producing GPU-ready [`RectInstance`]s
//! - [`Color`] / [`SamplingMode`] - Draw parameters

pub mod color;
pub mod surface;
pub mod system;

pub use color::Color;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, RectInstance, SamplingMode};
pub use system::{RenderStyle, RenderSystem};
