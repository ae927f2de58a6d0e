//! Bomb-drop targeting
//!
//! Only front-row enemies (nothing alive one row below them) may drop a
//! bomb. One of them is picked uniformly at random on every bomb tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{EntityId, EntityKind};
use super::projectile::ProjectileManager;
use super::store::EntityStore;

#[derive(Debug, Clone)]
pub struct BomberSelector {
    rng: Pcg32,
    /// Distance below an enemy probed for a blocking neighbor (one row)
    row_spacing: f32,
}

impl BomberSelector {
    pub fn new(seed: u64, row_spacing: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            row_spacing,
        }
    }

    /// Restart the random sequence (for reproducible runs)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Enemies with no living enemy directly below them, in id order
    pub fn front_row(&self, store: &EntityStore) -> Vec<EntityId> {
        store
            .of_kind(EntityKind::is_enemy)
            .filter(|enemy| {
                let below = enemy.pos - Vec2::new(0.0, self.row_spacing);
                !store.position_occupied_by(EntityKind::is_enemy, below)
            })
            .map(|enemy| enemy.id)
            .collect()
    }

    /// Pick a bomber using the built-in RNG
    pub fn select(&mut self, store: &EntityStore) -> Option<EntityId> {
        let candidates = self.front_row(store);
        pick_bomber(&candidates, &mut self.rng)
    }

    /// Pick a bomber with a caller-supplied random source
    pub fn select_with<R: Rng>(
        &self,
        store: &EntityStore,
        rng: &mut R,
    ) -> Option<EntityId> {
        pick_bomber(&self.front_row(store), rng)
    }

    /// Where a bomb dropped by `enemy` appears (half a row below it)
    pub fn drop_point(&self, enemy_pos: Vec2) -> Vec2 {
        enemy_pos - Vec2::new(0.0, self.row_spacing / 2.0)
    }

    /// Run one bomb tick. Returns the spawned bomb, if any.
    pub fn drop_bomb(
        &mut self,
        store: &mut EntityStore,
        projectiles: &ProjectileManager,
    ) -> Option<EntityId> {
        let bomber = self.select(store)?;
        let enemy = store.get(bomber)?;
        let (origin, tier) = match enemy.kind {
            EntityKind::Enemy { tier } => (enemy.pos, tier.number()),
            _ => return None,
        };
        let bomb = projectiles.spawn_enemy_bomb(store, self.drop_point(origin));
        log::debug!("Tier {} enemy {:?} dropped bomb {:?}", tier, bomber, bomb);
        Some(bomb)
    }
}

/// Uniform pick over `[0, candidates.len())`; `None` when empty
pub fn pick_bomber<R: Rng>(candidates: &[EntityId], rng: &mut R) -> Option<EntityId> {
    if candidates.is_empty() {
        return None;
    }
    let index = rng.random_range(0..candidates.len());
    Some(candidates[index])
}
