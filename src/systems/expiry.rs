//! Expiry system
//!
//! Counts down every [`Expiry`] timer and destroys the entity once it runs out.

use rainfall_core::{ComponentMask, EcsError, Expiry, World};

/// Destroys entities whose lifetime ran out
#[derive(Default)]
pub struct ExpirySystem;

impl ExpirySystem {
    /// Aspect of the entities this system processes
    pub const ASPECT: ComponentMask = ComponentMask::EXPIRY;

    pub fn new() -> Self {
        Self
    }

    /// Subtract `dt` from every timer; destroy (deferred) those at or below zero.
    /// Returns the number of entities marked for destruction.
    pub fn run(&self, world: &mut World, dt: f32) -> Result<usize, EcsError> {
        let mut expired = 0;
        for entity in world.query(Self::ASPECT) {
            let expiry = world.get_mut::<Expiry>(entity)?;
            expiry.time_remaining -= dt;
            if expiry.is_expired() {
                world.destroy(entity);
                expired += 1;
            }
        }
        if expired > 0 {
            log::trace!("{} droplets expired", expired);
        }
        Ok(expired)
    }
}
