//! Pointer input and spaceship steering
//!
//! The first pointer to touch down takes hold of the ship and steers it
//! horizontally. While the ship is held, any further press fires a shot.
//! The ship glides to its target with an ease-in-ease-out curve.

use glam::Vec2;

use super::entity::EntityId;
use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use crate::audio::SoundEffect;
use crate::consts::{SHIP_DRAG_DURATION, SHIP_GRAB_DURATION};
use crate::ease_in_out;

/// Host-assigned pointer (touch) identity
pub type PointerId = u64;

/// An in-flight ship glide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipMotion {
    pub from_x: f32,
    pub to_x: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl ShipMotion {
    pub fn new(from_x: f32, to_x: f32, duration: f32) -> Self {
        Self {
            from_x,
            to_x,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn current_x(&self) -> f32 {
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.from_x + (self.to_x - self.from_x) * ease_in_out(t)
    }

    /// Advance the glide and return the new x
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration.max(0.0));
        self.current_x()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Pointer currently holding the ship
    pub holder: Option<PointerId>,
    pub motion: Option<ShipMotion>,
}

impl GameState {
    /// Touch down: grab the ship, or fire if it is already held
    pub fn on_pointer_down(&mut self, pointer: PointerId, pos: Vec2) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if self.pointer.holder.is_some() {
            self.fire();
            return;
        }
        self.pointer.holder = Some(pointer);
        self.steer_ship(pos.x, SHIP_GRAB_DURATION);
    }

    /// Drag: retarget the ship if this pointer holds it
    pub fn on_pointer_move(&mut self, pointer: PointerId, pos: Vec2) {
        if self.phase == GamePhase::GameOver || self.pointer.holder != Some(pointer) {
            return;
        }
        self.steer_ship(pos.x, SHIP_DRAG_DURATION);
    }

    /// Touch up or cancel: release the ship if this pointer held it
    pub fn on_pointer_up(&mut self, pointer: PointerId) {
        if self.pointer.holder == Some(pointer) {
            self.pointer.holder = None;
        }
    }

    /// Fire a shot from the ship's current position
    pub fn fire(&mut self) -> Option<EntityId> {
        if self.phase == GamePhase::GameOver {
            return None;
        }
        let origin = self.spaceship_pos();
        let shot = self.projectiles.spawn_player_shot(&mut self.store, origin);
        self.sync_visuals();
        self.push_event(GameEvent::Sound(SoundEffect::LaserShot));
        Some(shot)
    }

    fn steer_ship(&mut self, target_x: f32, duration: f32) {
        let limit = (self.config.world_width - self.config.ship_size.x).max(0.0) / 2.0;
        let target_x = target_x.clamp(-limit, limit);
        let from_x = self.spaceship_pos().x;
        self.pointer.motion = Some(ShipMotion::new(from_x, target_x, duration));
    }

    /// Per-frame ship glide
    pub(crate) fn update_ship(&mut self, dt: f32) {
        let Some(motion) = self.pointer.motion.as_mut() else {
            return;
        };
        let x = motion.advance(dt);
        if motion.is_finished() {
            self.pointer.motion = None;
        }
        if let Some(ship) = self.store.get_mut(self.spaceship) {
            ship.pos.x = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::entity::EntityKind;

    fn state() -> GameState {
        let mut state = GameState::new(SimConfig::default()).unwrap();
        state.drain_events();
        state
    }

    #[test]
    fn test_ship_motion_eases() {
        let mut motion = ShipMotion::new(0.0, 100.0, 0.5);
        let quarter = motion.advance(0.125);
        assert!(quarter > 0.0 && quarter < 25.0);
        assert!((motion.advance(0.125) - 50.0).abs() < 1e-3);
        assert_eq!(motion.advance(10.0), 100.0);
        assert!(motion.is_finished());
    }

    #[test]
    fn test_zero_duration_motion_jumps() {
        let mut motion = ShipMotion::new(5.0, -5.0, 0.0);
        assert_eq!(motion.advance(0.0), -5.0);
        assert!(motion.is_finished());
    }

    #[test]
    fn test_first_press_grabs_without_firing() {
        let mut state = state();
        state.on_pointer_down(1, Vec2::new(100.0, -500.0));
        assert_eq!(state.pointer.holder, Some(1));
        assert_eq!(state.projectile_count(), 0);

        for _ in 0..40 {
            state.update_ship(1.0 / 60.0);
        }
        assert!((state.spaceship_pos().x - 100.0).abs() < 1e-3);
        assert!(state.pointer.motion.is_none());
    }

    #[test]
    fn test_second_press_fires_from_ship() {
        let mut state = state();
        state.on_pointer_down(1, Vec2::new(0.0, -500.0));
        state.on_pointer_down(2, Vec2::new(200.0, 0.0));

        let shots: Vec<_> = state.store.of_kind(EntityKind::is_shot).collect();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].pos, state.spaceship_pos());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundEffect::LaserShot)));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::SpawnVisual {
                kind: EntityKind::PlayerShot,
                ..
            }
        )));

        // The firing pointer lifting does not release the ship
        state.on_pointer_up(2);
        assert_eq!(state.pointer.holder, Some(1));
        state.on_pointer_up(1);
        assert_eq!(state.pointer.holder, None);
    }

    #[test]
    fn test_drag_only_from_holder() {
        let mut state = state();
        state.on_pointer_down(1, Vec2::ZERO);
        state.on_pointer_move(9, Vec2::new(300.0, 0.0));
        assert_eq!(state.pointer.motion.unwrap().to_x, 0.0);

        state.on_pointer_move(1, Vec2::new(-120.0, 0.0));
        let motion = state.pointer.motion.unwrap();
        assert_eq!(motion.to_x, -120.0);
        assert_eq!(motion.duration, SHIP_DRAG_DURATION);
    }

    #[test]
    fn test_target_clamped_to_world() {
        let mut state = state();
        state.on_pointer_down(1, Vec2::new(10_000.0, 0.0));
        assert_eq!(state.pointer.motion.unwrap().to_x, 375.0 - 25.0);
    }

    #[test]
    fn test_no_input_after_loss() {
        let mut state = state();
        state.phase = GamePhase::GameOver;
        state.on_pointer_down(1, Vec2::ZERO);
        assert_eq!(state.pointer.holder, None);
        assert_eq!(state.fire(), None);
    }
}
