//! Core types for the rainfall simulation
//!
//! This crate provides the entity-component store the systems run over:
//!
//! - [`World`] - Entity store with deferred destruction and aspect queries
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`ComponentTable`] / [`ComponentStore`] - Per-kind sparse component tables
//! - [`Transform`], [`Raindrop`], [`Expiry`] - The component kinds
//! - [`ComponentMask`] - Bitmask of kinds, doubling as a system's aspect
//! - [`EcsError`] - Storage errors

mod components;
mod error;
mod storage;
mod world;

pub use components::{Component, ComponentKind, ComponentMask, Expiry, Raindrop, Transform};
pub use error::EcsError;
pub use storage::{ComponentStore, ComponentTable};
pub use world::{EntityKey, FrameCounters, World};

// Re-export commonly used types from rainfall_math for convenience
pub use rainfall_math::{InvalidRange, UniformRange, Vec2};
