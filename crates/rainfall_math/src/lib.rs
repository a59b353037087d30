//! 2D Mathematics Library
//!
//! This crate provides the small set of math types the rainfall simulation needs.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components (y grows downward)
//! - [`UniformRange`] - Validated `[min, max]` interval for random sampling
//! - [`InvalidRange`] - Error for a malformed interval

mod vec2;
pub mod range;

pub use vec2::Vec2;
pub use range::{InvalidRange, UniformRange};
