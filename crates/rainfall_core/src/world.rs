//! World container for entities
//!
//! The World owns the entity slot map, the component tables, and the list of
//! entities waiting to be destroyed. Destruction is deferred: [`World::destroy`]
//! only marks an entity, and it stays fully readable until
//! [`World::apply_destructions`] sweeps it once per frame.

use slotmap::{new_key_type, SlotMap};

use crate::components::{Component, ComponentKind, ComponentMask};
use crate::error::EcsError;
use crate::storage::ComponentStore;

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Uses generational indexing, so a key kept after its entity was swept
    /// never resolves to a later entity that happens to reuse the slot.
    pub struct EntityKey;
}

/// Per-entity bookkeeping kept in the slot map
#[derive(Clone, Copy, Debug, Default)]
struct EntityRecord {
    mask: ComponentMask,
    pending_destroy: bool,
}

/// Entity churn during the current frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameCounters {
    /// Entities created since `begin_frame`
    pub created: usize,
    /// Entities swept since `begin_frame`
    pub destroyed: usize,
}

/// Container for every entity and its components
pub struct World {
    entities: SlotMap<EntityKey, EntityRecord>,
    components: ComponentStore,
    pending_destroy: Vec<EntityKey>,
    frame: u64,
    counters: FrameCounters,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            components: ComponentStore::new(),
            pending_destroy: Vec::new(),
            frame: 0,
            counters: FrameCounters::default(),
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
            ..Self::new()
        }
    }

    /// Start a new frame: advance the frame counter and reset churn counters
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.counters = FrameCounters::default();
    }

    /// Number of frames begun so far
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Entity churn for the current frame
    #[inline]
    pub fn counters(&self) -> FrameCounters {
        self.counters
    }

    /// Allocate a new entity with no components
    pub fn create(&mut self) -> EntityKey {
        self.counters.created += 1;
        self.entities.insert(EntityRecord::default())
    }

    /// Mark an entity for destruction at the next sweep
    ///
    /// Returns `true` if the entity was newly marked. Marking twice, or
    /// marking a key that is no longer alive, does nothing.
    pub fn destroy(&mut self, entity: EntityKey) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) if !record.pending_destroy => {
                record.pending_destroy = true;
                self.pending_destroy.push(entity);
                true
            }
            Some(_) => false,
            None => {
                log::debug!("destroy called on dead entity {:?}", entity);
                false
            }
        }
    }

    /// Remove every entity marked by [`destroy`](Self::destroy), along with all
    /// of its components. Returns the number of entities removed.
    pub fn apply_destructions(&mut self) -> usize {
        let mut removed = 0;
        for entity in self.pending_destroy.drain(..) {
            if let Some(record) = self.entities.remove(entity) {
                self.components.remove_all(entity, record.mask);
                removed += 1;
            }
        }
        self.counters.destroyed += removed;
        removed
    }

    /// Whether `entity` is alive (including entities pending destruction)
    #[inline]
    pub fn is_alive(&self, entity: EntityKey) -> bool {
        self.entities.contains_key(entity)
    }

    /// Whether `entity` is alive and marked for destruction
    pub fn is_pending_destroy(&self, entity: EntityKey) -> bool {
        self.entities
            .get(entity)
            .map(|record| record.pending_destroy)
            .unwrap_or(false)
    }

    /// Number of live entities (including those pending destruction)
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of entities waiting for the next sweep
    #[inline]
    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroy.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Component kinds held by `entity`
    pub fn mask(&self, entity: EntityKey) -> Option<ComponentMask> {
        self.entities.get(entity).map(|record| record.mask)
    }

    /// Whether `entity` holds a `T`
    #[inline]
    pub fn has<T: Component>(&self, entity: EntityKey) -> bool {
        self.components.table::<T>().has(entity)
    }

    /// Read the `T` of `entity`, failing with `MissingComponent` when absent
    #[inline]
    pub fn get<T: Component>(&self, entity: EntityKey) -> Result<&T, EcsError> {
        self.components.table::<T>().get(entity)
    }

    /// Mutable variant of [`get`](Self::get)
    #[inline]
    pub fn get_mut<T: Component>(&mut self, entity: EntityKey) -> Result<&mut T, EcsError> {
        self.components.table_mut::<T>().get_mut(entity)
    }

    /// Attach or overwrite the `T` of a live entity, returning the old value
    pub fn put<T: Component>(&mut self, entity: EntityKey, value: T) -> Result<Option<T>, EcsError> {
        let record = self
            .entities
            .get_mut(entity)
            .ok_or(EcsError::NoSuchEntity(entity))?;
        record.mask |= T::KIND.mask();
        Ok(self.components.table_mut::<T>().put(entity, value))
    }

    /// Detach the `T` of `entity`, returning it if there was one
    pub fn remove<T: Component>(&mut self, entity: EntityKey) -> Option<T> {
        let record = self.entities.get_mut(entity)?;
        record.mask.remove(T::KIND.mask());
        self.components.table_mut::<T>().remove(entity)
    }

    /// Snapshot of every live entity whose components include `aspect`
    ///
    /// The snapshot is taken up front, so systems can create and destroy
    /// entities while walking it. Entities created afterwards are not in it.
    /// Order is slot order, which is stable for a given history of creates
    /// and sweeps.
    pub fn query(&self, aspect: ComponentMask) -> Vec<EntityKey> {
        self.entities
            .iter()
            .filter(|(_, record)| record.mask.contains(aspect))
            .map(|(key, _)| key)
            .collect()
    }

    /// Number of live entities matching `aspect`
    pub fn count(&self, aspect: ComponentMask) -> usize {
        self.entities
            .values()
            .filter(|record| record.mask.contains(aspect))
            .count()
    }

    /// Iterate over every live entity key
    pub fn keys(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.entities.keys()
    }

    /// Read-only access to the component tables
    pub fn components(&self) -> &ComponentStore {
        &self.components
    }

    /// Remove every entity immediately, including pending ones
    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
        self.pending_destroy.clear();
    }

    /// Component kinds of `entity` as a list, for diagnostics
    pub fn kinds(&self, entity: EntityKey) -> Vec<ComponentKind> {
        self.mask(entity)
            .map(|mask| ComponentKind::iter_mask(mask).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Expiry, Raindrop, Transform};
    use rainfall_math::Vec2;

    fn spawn_particle(world: &mut World, x: f32, y: f32) -> EntityKey {
        let e = world.create();
        world.put(e, Transform::from_position(Vec2::new(x, y))).unwrap();
        world.put(e, Raindrop::default()).unwrap();
        e
    }

    #[test]
    fn test_world_new() {
        let world = World::new();
        assert!(world.is_empty());
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.frame(), 0);
    }

    #[test]
    fn test_create_unique_keys() {
        let mut world = World::new();
        let a = world.create();
        let b = world.create();
        assert_ne!(a, b);
        assert_eq!(world.entity_count(), 2);
        assert_eq!(world.counters().created, 2);
    }

    #[test]
    fn test_put_updates_mask() {
        let mut world = World::new();
        let e = spawn_particle(&mut world, 0.0, 0.0);
        assert_eq!(world.mask(e), Some(ComponentMask::PARTICLE));

        world.put(e, Expiry::new(1.0)).unwrap();
        assert!(world.mask(e).unwrap().contains(ComponentMask::EXPIRY));
        assert_eq!(
            world.kinds(e),
            vec![ComponentKind::Transform, ComponentKind::Raindrop, ComponentKind::Expiry]
        );
    }

    #[test]
    fn test_put_on_dead_entity_fails() {
        let mut world = World::new();
        let e = world.create();
        world.destroy(e);
        world.apply_destructions();

        let err = world.put(e, Expiry::new(1.0)).unwrap_err();
        assert_eq!(err, EcsError::NoSuchEntity(e));
    }

    #[test]
    fn test_remove_component_clears_mask() {
        let mut world = World::new();
        let e = spawn_particle(&mut world, 0.0, 0.0);
        assert!(world.remove::<Raindrop>(e).is_some());
        assert!(!world.has::<Raindrop>(e));
        assert_eq!(world.mask(e), Some(ComponentMask::TRANSFORM));
        assert!(world.remove::<Raindrop>(e).is_none());
    }

    #[test]
    fn test_destroy_is_deferred() {
        let mut world = World::new();
        let e = spawn_particle(&mut world, 5.0, 6.0);

        assert!(world.destroy(e));
        assert!(world.is_alive(e));
        assert!(world.is_pending_destroy(e));
        assert_eq!(world.get::<Transform>(e).unwrap().position, Vec2::new(5.0, 6.0));
        assert_eq!(world.query(ComponentMask::PARTICLE), vec![e]);

        assert_eq!(world.apply_destructions(), 1);
        assert!(!world.is_alive(e));
        assert!(!world.has::<Transform>(e));
        assert!(!world.has::<Raindrop>(e));
        assert!(world.query(ComponentMask::PARTICLE).is_empty());
        assert_eq!(world.counters().destroyed, 1);
    }

    #[test]
    fn test_destroy_twice_is_noop() {
        let mut world = World::new();
        let e = world.create();
        assert!(world.destroy(e));
        assert!(!world.destroy(e));
        assert_eq!(world.pending_destroy_count(), 1);
        assert_eq!(world.apply_destructions(), 1);
        assert!(!world.destroy(e));
        assert_eq!(world.apply_destructions(), 0);
    }

    #[test]
    fn test_stale_key_never_aliases() {
        let mut world = World::new();
        let old = spawn_particle(&mut world, 1.0, 1.0);
        world.destroy(old);
        world.apply_destructions();

        // The freed slot gets reused, but with a new generation
        let new = spawn_particle(&mut world, 2.0, 2.0);
        assert_ne!(old, new);
        assert!(world.get::<Transform>(old).is_err());
        assert_eq!(world.get::<Transform>(new).unwrap().position, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_query_by_aspect() {
        let mut world = World::new();
        let falling = spawn_particle(&mut world, 0.0, 0.0);
        let splash = spawn_particle(&mut world, 0.0, 0.0);
        world.put(splash, Expiry::new(1.0)).unwrap();
        let bare = world.create();

        let particles = world.query(ComponentMask::PARTICLE);
        assert_eq!(particles, vec![falling, splash]);
        assert_eq!(world.query(ComponentMask::EXPIRY), vec![splash]);
        assert_eq!(world.query(ComponentMask::NONE).len(), 3);
        assert!(!particles.contains(&bare));
        assert_eq!(world.count(ComponentMask::PARTICLE), 2);
    }

    #[test]
    fn test_query_is_a_snapshot() {
        let mut world = World::new();
        spawn_particle(&mut world, 0.0, 0.0);
        let snapshot = world.query(ComponentMask::PARTICLE);
        spawn_particle(&mut world, 1.0, 1.0);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(world.query(ComponentMask::PARTICLE).len(), 2);
    }

    #[test]
    fn test_begin_frame_resets_counters() {
        let mut world = World::new();
        world.create();
        world.begin_frame();
        assert_eq!(world.frame(), 1);
        assert_eq!(world.counters(), FrameCounters::default());
    }

    #[test]
    fn test_world_clear() {
        let mut world = World::new();
        let e = spawn_particle(&mut world, 0.0, 0.0);
        world.destroy(e);
        spawn_particle(&mut world, 0.0, 0.0);

        world.clear();
        assert!(world.is_empty());
        assert_eq!(world.pending_destroy_count(), 0);
        assert!(world.components().table::<Transform>().is_empty());
    }

    #[test]
    fn test_world_with_capacity() {
        let world = World::with_capacity(100);
        assert!(world.is_empty());
    }
}
