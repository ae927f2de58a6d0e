//! Player shots and enemy bombs
//!
//! Shots fly straight up at a constant speed. Bombs start at rest and fall
//! under constant gravity with no drag. Both are despawned once they leave
//! the vertical play band.

use glam::Vec2;

use super::entity::{Entity, EntityId, EntityKind};
use super::store::EntityStore;
use crate::config::SimConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileManager {
    pub shot_speed: f32,
    pub bomb_gravity: f32,
    pub size: Vec2,
    pub upper_bound: f32,
    pub lower_bound: f32,
}

impl ProjectileManager {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            shot_speed: config.shot_speed,
            bomb_gravity: config.bomb_gravity,
            size: config.projectile_size,
            upper_bound: config.projectile_upper_bound,
            lower_bound: config.projectile_lower_bound,
        }
    }

    /// Fire a shot from `origin` (the ship's current position)
    pub fn spawn_player_shot(&self, store: &mut EntityStore, origin: Vec2) -> EntityId {
        let id = store.next_entity_id();
        store.add(
            Entity::new(id, EntityKind::PlayerShot, origin, self.size)
                .with_velocity(Vec2::new(0.0, self.shot_speed)),
        )
    }

    /// Drop a bomb at `pos`, initially at rest
    pub fn spawn_enemy_bomb(&self, store: &mut EntityStore, pos: Vec2) -> EntityId {
        let id = store.next_entity_id();
        store.add(Entity::new(id, EntityKind::EnemyBomb, pos, self.size).with_gravity())
    }

    /// Advance projectile motion by `dt`
    pub fn integrate(&self, store: &mut EntityStore, dt: f32) {
        let gravity = Vec2::new(0.0, -self.bomb_gravity);
        for projectile in store.query_mut(|e| e.kind.is_projectile()) {
            if projectile.affected_by_gravity {
                projectile.vel += gravity * dt;
            }
            projectile.pos += projectile.vel * dt;
        }
    }

    pub fn is_out_of_bounds(&self, y: f32) -> bool {
        y > self.upper_bound || y < self.lower_bound
    }

    /// Remove projectiles outside the play band. Returns how many went.
    pub fn cleanup(&self, store: &mut EntityStore) -> usize {
        let expired: Vec<EntityId> = store
            .query(|e| e.kind.is_projectile() && self.is_out_of_bounds(e.pos.y))
            .map(|e| e.id)
            .collect();
        expired.into_iter().filter(|id| store.remove(*id)).count()
    }
}
