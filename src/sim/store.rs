//! Entity registry
//!
//! Owns every live entity keyed by id. Iteration is in ascending id order
//! so the simulation stays deterministic. Removal is two-phase: `remove`
//! marks the entity dead (it disappears from every query at once) and
//! `flush` deletes the dead at the end of the frame.

use std::collections::BTreeMap;

use glam::Vec2;

use super::entity::{Entity, EntityId, EntityKind};

/// Visual side effects of store mutations, replayed to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualChange {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
    },
    Removed {
        id: EntityId,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: BTreeMap<EntityId, Entity>,
    /// Removed this frame, not yet deleted
    graveyard: Vec<EntityId>,
    changes: Vec<VisualChange>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        // Default-constructed stores start at 0; skip it so 0 is never handed out
        self.next_id = self.next_id.max(1);
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an entity (replacing any entity with the same id)
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.changes.push(VisualChange::Spawned {
            id,
            kind: entity.kind,
            pos: entity.pos,
        });
        self.entities.insert(id, entity);
        id
    }

    /// Allocate an id and insert in one go
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, size: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.add(Entity::new(id, kind, pos, size))
    }

    /// Remove an entity. Returns false if it was already gone.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.get_mut(&id) else {
            return false;
        };
        if !entity.alive {
            return false;
        }
        entity.alive = false;
        self.graveyard.push(id);
        self.changes.push(VisualChange::Removed { id });
        true
    }

    /// Delete entities removed since the last flush
    pub fn flush(&mut self) -> usize {
        let count = self.graveyard.len();
        for id in self.graveyard.drain(..) {
            self.entities.remove(&id);
        }
        count
    }

    /// Remove everything (reset). Ids keep counting upward.
    pub fn clear(&mut self) {
        let ids: Vec<EntityId> = self.query(|_| true).map(|e| e.id).collect();
        for id in ids {
            self.remove(id);
        }
        self.flush();
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id).filter(|e| e.alive)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id).filter(|e| e.alive)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Lazily iterate live entities matching a predicate
    pub fn query<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Entity> + 'a
    where
        P: Fn(&Entity) -> bool + 'a,
    {
        self.entities
            .values()
            .filter(move |e| e.alive && predicate(e))
    }

    /// Mutable variant of `query`
    pub fn query_mut<'a, P>(&'a mut self, predicate: P) -> impl Iterator<Item = &'a mut Entity> + 'a
    where
        P: Fn(&Entity) -> bool + 'a,
    {
        self.entities
            .values_mut()
            .filter(move |e| e.alive && predicate(e))
    }

    /// Live entities of a kind class
    pub fn of_kind<'a>(
        &'a self,
        matches: impl Fn(&EntityKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        self.query(move |e| matches(&e.kind))
    }

    pub fn count(&self, matches: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities
            .values()
            .filter(|e| e.alive && matches(&e.kind))
            .count()
    }

    /// Whether any live entity of the class covers `point`
    pub fn position_occupied_by(
        &self,
        matches: impl Fn(&EntityKind) -> bool,
        point: Vec2,
    ) -> bool {
        self.entities
            .values()
            .any(|e| e.alive && matches(&e.kind) && e.bounds().contains_point(point))
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.values().filter(|e| e.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the visual changes recorded since the last call
    pub fn drain_changes(&mut self) -> Vec<VisualChange> {
        std::mem::take(&mut self.changes)
    }
}
