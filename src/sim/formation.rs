//! Enemy formation movement
//!
//! The formation marches sideways one step per movement tick. When the
//! outermost enemy's next step would reach the world edge, that tick is
//! spent descending one row instead and the direction flips.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::store::EntityStore;
use crate::config::SimConfig;

/// Horizontal marching direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// +1 for right, -1 for left
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Result of one movement tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormationMove {
    /// No enemies left
    Idle,
    /// Every enemy shifted sideways by `dx`
    Shift { dx: f32 },
    /// Every enemy moved down by `dy`; direction is now `heading`
    Descend { dy: f32, heading: Direction },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationState {
    pub direction: Direction,
    pub horizontal_step: f32,
    pub vertical_step: f32,
    pub bounds_left: f32,
    pub bounds_right: f32,
}

impl FormationState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            direction: Direction::Right,
            horizontal_step: config.horizontal_step,
            vertical_step: config.vertical_step,
            bounds_left: config.bounds_left(),
            bounds_right: config.bounds_right(),
        }
    }

    /// Decide the next move without touching the store
    pub fn plan(&self, store: &EntityStore) -> FormationMove {
        let mut extent: Option<(f32, f32)> = None;
        for enemy in store.of_kind(EntityKind::is_enemy) {
            let x = enemy.pos.x;
            extent = Some(match extent {
                None => (x, x),
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
            });
        }
        let Some((min_x, max_x)) = extent else {
            return FormationMove::Idle;
        };

        let turn = match self.direction {
            Direction::Right => max_x + self.horizontal_step >= self.bounds_right,
            Direction::Left => min_x - self.horizontal_step <= self.bounds_left,
        };

        if turn {
            FormationMove::Descend {
                dy: -self.vertical_step,
                heading: self.direction.flipped(),
            }
        } else {
            FormationMove::Shift {
                dx: self.direction.sign() * self.horizontal_step,
            }
        }
    }

    /// Run one movement tick. All enemies move by the same offset.
    pub fn step(&mut self, store: &mut EntityStore) -> FormationMove {
        let planned = self.plan(store);
        let offset = match planned {
            FormationMove::Idle => return planned,
            FormationMove::Shift { dx } => Vec2::new(dx, 0.0),
            FormationMove::Descend { dy, heading } => {
                log::debug!("Formation descends, now heading {:?}", heading);
                self.direction = heading;
                Vec2::new(0.0, dy)
            }
        };
        for enemy in store.query_mut(|e| e.kind.is_enemy()) {
            enemy.pos += offset;
        }
        planned
    }
}
