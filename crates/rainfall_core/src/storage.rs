//! Component storage
//!
//! One sparse table per component kind, keyed by [`EntityKey`]. Tables are
//! `slotmap::SecondaryMap`s over the world's entity slot map, so lookups are
//! O(1) and a stale key can never read a value that belongs to a newer entity
//! in the same slot.

use slotmap::SecondaryMap;

use crate::components::{Component, ComponentKind, ComponentMask, Expiry, Raindrop, Transform};
use crate::error::EcsError;
use crate::world::EntityKey;

/// Sparse table of one component type
pub struct ComponentTable<T> {
    values: SecondaryMap<EntityKey, T>,
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self {
            values: SecondaryMap::new(),
        }
    }
}

impl<T: Component> ComponentTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for `entity`, failing with `MissingComponent` when absent
    pub fn get(&self, entity: EntityKey) -> Result<&T, EcsError> {
        self.values.get(entity).ok_or(EcsError::MissingComponent {
            entity,
            kind: T::KIND,
        })
    }

    /// Mutable variant of [`get`](Self::get)
    pub fn get_mut(&mut self, entity: EntityKey) -> Result<&mut T, EcsError> {
        self.values.get_mut(entity).ok_or(EcsError::MissingComponent {
            entity,
            kind: T::KIND,
        })
    }

    /// Whether `entity` has a value in this table
    #[inline]
    pub fn has(&self, entity: EntityKey) -> bool {
        self.values.contains_key(entity)
    }

    /// Insert or overwrite the value for `entity`, returning the old value
    pub fn put(&mut self, entity: EntityKey, value: T) -> Option<T> {
        self.values.insert(entity, value)
    }

    /// Remove and return the value for `entity`
    pub fn remove(&mut self, entity: EntityKey) -> Option<T> {
        self.values.remove(entity)
    }

    /// Number of stored values
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over every `(entity, value)` pair
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &T)> {
        self.values.iter()
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// The parallel tables for every component kind
#[derive(Default)]
pub struct ComponentStore {
    pub(crate) transforms: ComponentTable<Transform>,
    pub(crate) raindrops: ComponentTable<Raindrop>,
    pub(crate) expiries: ComponentTable<Expiry>,
}

impl ComponentStore {
    /// Create empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for component type `T`
    #[inline]
    pub fn table<T: Component>(&self) -> &ComponentTable<T> {
        T::table(self)
    }

    /// Mutable table for component type `T`
    #[inline]
    pub fn table_mut<T: Component>(&mut self) -> &mut ComponentTable<T> {
        T::table_mut(self)
    }

    /// Remove the value of one kind for `entity`, returning whether one existed
    pub fn remove_kind(&mut self, entity: EntityKey, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.remove(entity).is_some(),
            ComponentKind::Raindrop => self.raindrops.remove(entity).is_some(),
            ComponentKind::Expiry => self.expiries.remove(entity).is_some(),
        }
    }

    /// Remove every component listed in `mask` for `entity`
    pub fn remove_all(&mut self, entity: EntityKey, mask: ComponentMask) {
        for kind in ComponentKind::iter_mask(mask) {
            self.remove_kind(entity, kind);
        }
    }

    /// Remove every value from every table
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.raindrops.clear();
        self.expiries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainfall_math::Vec2;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<EntityKey> {
        let mut map: SlotMap<EntityKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_put_get_has() {
        let k = keys(1)[0];
        let mut table = ComponentTable::<Transform>::new();
        assert!(!table.has(k));

        table.put(k, Transform::from_position(Vec2::new(1.0, 2.0)));
        assert!(table.has(k));
        assert_eq!(table.get(k).unwrap().position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_put_overwrites() {
        let k = keys(1)[0];
        let mut table = ComponentTable::<Expiry>::new();
        assert!(table.put(k, Expiry::new(1.0)).is_none());
        let old = table.put(k, Expiry::new(0.5));
        assert_eq!(old, Some(Expiry::new(1.0)));
        assert_eq!(table.get(k).unwrap().time_remaining, 0.5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_missing_fails() {
        let k = keys(1)[0];
        let table = ComponentTable::<Raindrop>::new();
        match table.get(k) {
            Err(EcsError::MissingComponent { entity, kind }) => {
                assert_eq!(entity, k);
                assert_eq!(kind, ComponentKind::Raindrop);
            }
            other => panic!("Expected MissingComponent, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_get_mut_modifies() {
        let k = keys(1)[0];
        let mut table = ComponentTable::<Raindrop>::new();
        table.put(k, Raindrop::default());
        table.get_mut(k).unwrap().velocity.y = 50.0;
        assert_eq!(table.get(k).unwrap().velocity.y, 50.0);
    }

    #[test]
    fn test_remove() {
        let k = keys(1)[0];
        let mut table = ComponentTable::<Expiry>::new();
        table.put(k, Expiry::new(1.0));
        assert_eq!(table.remove(k), Some(Expiry::new(1.0)));
        assert!(!table.has(k));
        assert!(table.remove(k).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_store_remove_all_by_mask() {
        let ks = keys(2);
        let mut store = ComponentStore::new();
        for &k in &ks {
            store.table_mut::<Transform>().put(k, Transform::default());
            store.table_mut::<Raindrop>().put(k, Raindrop::default());
        }
        store.table_mut::<Expiry>().put(ks[0], Expiry::new(1.0));

        store.remove_all(ks[0], ComponentMask::PARTICLE | ComponentMask::EXPIRY);

        assert!(!store.table::<Transform>().has(ks[0]));
        assert!(!store.table::<Raindrop>().has(ks[0]));
        assert!(!store.table::<Expiry>().has(ks[0]));
        assert!(store.table::<Transform>().has(ks[1]));
        assert!(store.table::<Raindrop>().has(ks[1]));
    }

    #[test]
    fn test_store_clear() {
        let k = keys(1)[0];
        let mut store = ComponentStore::new();
        store.table_mut::<Transform>().put(k, Transform::default());
        store.clear();
        assert!(store.table::<Transform>().is_empty());
    }
}
