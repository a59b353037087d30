//! ECS error types

use std::fmt;

use crate::components::ComponentKind;
use crate::world::EntityKey;

/// Error type for world and component storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// A component was read from an entity whose aspect guarantees it, but it
    /// was not there. This is an invariant violation, not a runtime condition.
    MissingComponent {
        /// Entity that was queried
        entity: EntityKey,
        /// Component kind that was expected
        kind: ComponentKind,
    },
    /// A component was attached to an entity that is not alive
    NoSuchEntity(EntityKey),
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::MissingComponent { entity, kind } => {
                write!(f, "Missing component {} on entity {:?}", kind, entity)
            }
            EcsError::NoSuchEntity(entity) => write!(f, "No such entity: {:?}", entity),
        }
    }
}

impl std::error::Error for EcsError {}
