//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies; effects leave as events

pub mod bomber;
pub mod collision;
pub mod entity;
pub mod events;
pub mod formation;
pub mod input;
pub mod projectile;
pub mod state;
pub mod store;
pub mod tick;

pub use bomber::{BomberSelector, pick_bomber};
pub use collision::{Aabb, Contact, ContactOutcome, ContactTracker, detect_overlaps, resolve_contact};
pub use entity::{EnemyTier, Entity, EntityId, EntityKind};
pub use events::{GameEvent, Presenter, dispatch};
pub use formation::{Direction, FormationMove, FormationState};
pub use input::{PointerId, PointerState, ShipMotion};
pub use projectile::ProjectileManager;
pub use state::{GamePhase, GameState, Score};
pub use store::{EntityStore, VisualChange};
pub use tick::{Cadence, tick};

impl GameState {
    /// Advance the simulation by `dt` seconds (see [`tick`])
    pub fn tick(&mut self, dt: f32) {
        tick::tick(self, dt);
    }
}
