//! Component types
//!
//! The set of component kinds is closed: every kind has its own typed table in
//! [`ComponentStore`] and its own bit in [`ComponentMask`]. The [`Component`]
//! trait maps a Rust type to its table so the world can offer generic
//! `get::<T>` / `put::<T>` without any runtime type lookup.

use std::fmt;

use bitflags::bitflags;
use rainfall_math::Vec2;

use crate::storage::{ComponentStore, ComponentTable};

bitflags! {
    /// Which component kinds an entity holds
    ///
    /// Also used as the aspect a system requires: an entity matches when its
    /// mask contains every bit of the aspect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ComponentMask: u8 {
        /// No components
        const NONE = 0;
        /// Has a [`Transform`]
        const TRANSFORM = 1 << 0;
        /// Has a [`Raindrop`]
        const RAINDROP = 1 << 1;
        /// Has an [`Expiry`]
        const EXPIRY = 1 << 2;
        /// Aspect of anything that moves and draws
        const PARTICLE = Self::TRANSFORM.bits() | Self::RAINDROP.bits();
    }
}

/// The closed set of component kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Raindrop,
    Expiry,
}

impl ComponentKind {
    /// Every kind, in table order
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Transform,
        ComponentKind::Raindrop,
        ComponentKind::Expiry,
    ];

    /// The mask bit for this kind
    #[inline]
    pub fn mask(self) -> ComponentMask {
        match self {
            ComponentKind::Transform => ComponentMask::TRANSFORM,
            ComponentKind::Raindrop => ComponentMask::RAINDROP,
            ComponentKind::Expiry => ComponentMask::EXPIRY,
        }
    }

    /// Iterate the kinds present in `mask`
    pub fn iter_mask(mask: ComponentMask) -> impl Iterator<Item = ComponentKind> {
        Self::ALL.into_iter().filter(move |kind| mask.contains(kind.mask()))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Raindrop => "Raindrop",
            ComponentKind::Expiry => "Expiry",
        };
        f.write_str(name)
    }
}

/// A plain data record stored in one of the world's typed tables
pub trait Component: Sized + 'static {
    /// The kind tag for this type
    const KIND: ComponentKind;

    /// The table holding every value of this type
    fn table(store: &ComponentStore) -> &ComponentTable<Self>;

    /// Mutable access to the table holding every value of this type
    fn table_mut(store: &mut ComponentStore) -> &mut ComponentTable<Self>;
}

/// Screen-space position of a particle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec2,
}

impl Transform {
    /// Create a transform at the given position
    pub fn from_position(position: Vec2) -> Self {
        Self { position }
    }
}

/// Motion and render footprint of a particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Raindrop {
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Side length of the drawn square
    pub size: f32,
}

impl Raindrop {
    /// Size of a freshly spawned drop
    pub const DEFAULT_SIZE: f32 = 3.0;

    /// Create a raindrop with the given velocity and size
    pub fn new(velocity: Vec2, size: f32) -> Self {
        Self { velocity, size }
    }

    /// Set the velocity of this raindrop
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the size of this raindrop
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Default for Raindrop {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// Remaining lifetime of a splash droplet, in seconds
///
/// Only splash droplets carry this, so its presence also marks an entity as
/// already converted from a falling drop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expiry {
    pub time_remaining: f32,
}

impl Expiry {
    /// Create an expiry timer
    pub fn new(time_remaining: f32) -> Self {
        Self { time_remaining }
    }

    /// Whether the timer has run out
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.time_remaining <= 0.0
    }
}

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn table(store: &ComponentStore) -> &ComponentTable<Self> {
        &store.transforms
    }

    fn table_mut(store: &mut ComponentStore) -> &mut ComponentTable<Self> {
        &mut store.transforms
    }
}

impl Component for Raindrop {
    const KIND: ComponentKind = ComponentKind::Raindrop;

    fn table(store: &ComponentStore) -> &ComponentTable<Self> {
        &store.raindrops
    }

    fn table_mut(store: &mut ComponentStore) -> &mut ComponentTable<Self> {
        &mut store.raindrops
    }
}

impl Component for Expiry {
    const KIND: ComponentKind = ComponentKind::Expiry;

    fn table(store: &ComponentStore) -> &ComponentTable<Self> {
        &store.expiries
    }

    fn table_mut(store: &mut ComponentStore) -> &mut ComponentTable<Self> {
        &mut store.expiries
    }
}
