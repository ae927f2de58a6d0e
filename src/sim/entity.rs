//! Simulation entities
//!
//! Every live object in the world is an `Entity` tagged with an
//! `EntityKind`. Kinds also carry the collision layer scheme that decides
//! which pairs can produce contact events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Stable entity identity (never reused within a game)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Enemy rank; top row is tier one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    One,
    Two,
    Three,
}

impl EnemyTier {
    /// Tier for a formation row (0 = top)
    pub fn for_row(row: u32) -> Self {
        match row {
            0 => EnemyTier::One,
            1 | 2 => EnemyTier::Two,
            _ => EnemyTier::Three,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            EnemyTier::One => 1,
            EnemyTier::Two => 2,
            EnemyTier::Three => 3,
        }
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Spaceship,
    Enemy { tier: EnemyTier },
    /// One destructible sub-block of a shield house
    Shield { house: u8, block: u8 },
    PlayerShot,
    EnemyBomb,
}

/// Collision layers (what an entity is, for contact filtering)
pub const LAYER_NONE: u32 = 0;
pub const LAYER_ENEMY: u32 = 0b0001;
pub const LAYER_SHIELD: u32 = 0b0010;
pub const LAYER_SHOT: u32 = 0b0100;
pub const LAYER_BOMB: u32 = 0b1000;

/// Contact masks (which layers an entity reports contacts with)
pub const MASK_ENEMY: u32 = LAYER_SHIELD | LAYER_SHOT;
pub const MASK_SHIELD: u32 = LAYER_ENEMY | LAYER_BOMB | LAYER_SHOT;
/// Shots report contacts with everything that has a body, other shots included
pub const MASK_SHOT: u32 = LAYER_ENEMY | LAYER_SHIELD | LAYER_SHOT | LAYER_BOMB;
pub const MASK_BOMB: u32 = LAYER_SHIELD | LAYER_SHOT;

impl EntityKind {
    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityKind::Enemy { .. })
    }

    pub fn is_shield(&self) -> bool {
        matches!(self, EntityKind::Shield { .. })
    }

    pub fn is_shot(&self) -> bool {
        matches!(self, EntityKind::PlayerShot)
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, EntityKind::EnemyBomb)
    }

    /// Shot or bomb
    pub fn is_projectile(&self) -> bool {
        self.is_shot() || self.is_bomb()
    }

    pub fn layer(&self) -> u32 {
        match self {
            EntityKind::Spaceship => LAYER_NONE,
            EntityKind::Enemy { .. } => LAYER_ENEMY,
            EntityKind::Shield { .. } => LAYER_SHIELD,
            EntityKind::PlayerShot => LAYER_SHOT,
            EntityKind::EnemyBomb => LAYER_BOMB,
        }
    }

    pub fn contact_mask(&self) -> u32 {
        match self {
            EntityKind::Spaceship => LAYER_NONE,
            EntityKind::Enemy { .. } => MASK_ENEMY,
            EntityKind::Shield { .. } => MASK_SHIELD,
            EntityKind::PlayerShot => MASK_SHOT,
            EntityKind::EnemyBomb => MASK_BOMB,
        }
    }

    /// Whether two kinds can produce a contact event
    pub fn can_contact(&self, other: &EntityKind) -> bool {
        (self.layer() & other.contact_mask()) != 0 || (other.layer() & self.contact_mask()) != 0
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Spaceship => "spaceship",
            EntityKind::Enemy { .. } => "enemy",
            EntityKind::Shield { .. } => "shield",
            EntityKind::PlayerShot => "shot",
            EntityKind::EnemyBomb => "bomb",
        }
    }
}

/// A live simulation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position
    pub pos: Vec2,
    /// Bounding box size
    pub size: Vec2,
    /// Linear velocity (units/s)
    pub vel: Vec2,
    /// Falls under the configured bomb gravity
    pub affected_by_gravity: bool,
    /// Cleared by `EntityStore::remove`, purged on flush
    pub alive: bool,
}

impl Entity {
    /// A motionless entity
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            affected_by_gravity: false,
            alive: true,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_gravity(mut self) -> Self {
        self.affected_by_gravity = true;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}
