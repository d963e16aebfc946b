//! Entity store
//!
//! Ordered collection of entities with stable IDs. IDs are handed out monotonically and
//! never reused, so the store stays sorted by ID and iteration order is deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind};

/// Stable entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Ordered, mutable collection of entities
#[derive(Debug, Clone)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u64,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Remove every entity. IDs keep counting up so stale references stay stale.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Append a new entity and return its ID
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity::new(id, kind, pos, vel));
        id
    }

    /// Remove a single entity. Returns false (and does nothing) for a stale ID.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.entities.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Position of an entity in iteration order
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let idx = self.index_of(id)?;
        Some(&self.entities[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let idx = self.index_of(id)?;
        Some(&mut self.entities[idx])
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Drop every entity whose index is flagged in `consumed`, in one pass.
    ///
    /// Indices past the end of `consumed` are kept. Returns the number removed.
    pub fn compact(&mut self, consumed: &[bool]) -> usize {
        let before = self.entities.len();
        let mut idx = 0;
        self.entities.retain(|_| {
            let keep = !consumed.get(idx).copied().unwrap_or(false);
            idx += 1;
            keep
        });
        before - self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(kinds: &[EntityKind]) -> EntityStore {
        let mut store = EntityStore::new();
        for (i, kind) in kinds.iter().enumerate() {
            store.spawn(*kind, Vec2::new(10.0 * i as f32, 10.0), Vec2::ZERO);
        }
        store
    }

    #[test]
    fn ids_are_monotonic_across_clear() {
        let mut store = store_with(&[EntityKind::Fissile, EntityKind::Neutron]);
        let last = store.as_slice()[1].id;
        store.clear();
        assert!(store.is_empty());
        let fresh = store.spawn(EntityKind::Neutron, Vec2::ZERO, Vec2::ZERO);
        assert!(fresh > last);
    }

    #[test]
    fn default_matches_new() {
        let mut store = EntityStore::default();
        assert_eq!(store.spawn(EntityKind::Fissile, Vec2::ZERO, Vec2::ZERO), EntityId(1));
        let mut store = EntityStore::new();
        assert_eq!(store.spawn(EntityKind::Fissile, Vec2::ZERO, Vec2::ZERO), EntityId(1));
    }

    #[test]
    fn ids_count_past_u32() {
        let mut store = EntityStore {
            entities: Vec::new(),
            next_id: u64::from(u32::MAX),
        };
        let a = store.spawn(EntityKind::Neutron, Vec2::ZERO, Vec2::ZERO);
        let b = store.spawn(EntityKind::Neutron, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(a, EntityId(u64::from(u32::MAX)));
        assert_eq!(b, EntityId(u64::from(u32::MAX) + 1));
        assert_eq!(store.index_of(b), Some(1));
    }

    #[test]
    fn remove_stale_id_is_noop() {
        let mut store = store_with(&[EntityKind::Fissile, EntityKind::Neutron]);
        let id = store.as_slice()[0].id;
        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn compact_keeps_order() {
        let mut store = store_with(&[
            EntityKind::Fissile,
            EntityKind::Neutron,
            EntityKind::Absorber,
            EntityKind::Byproduct,
        ]);
        let removed = store.compact(&[false, true, false, true]);
        assert_eq!(removed, 2);
        let kinds: Vec<_> = store.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntityKind::Fissile, EntityKind::Absorber]);
        assert!(store.as_slice().windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn count_by_kind() {
        let store = store_with(&[
            EntityKind::Neutron,
            EntityKind::Neutron,
            EntityKind::Fissile,
        ]);
        assert_eq!(store.count(EntityKind::Neutron), 2);
        assert_eq!(store.count(EntityKind::Absorber), 0);
    }
}
