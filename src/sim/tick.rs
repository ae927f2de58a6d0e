//! Frame update
//!
//! One call to `tick` advances the whole simulation by a frame. The two
//! gameplay cadences (formation movement and bomb drops) run off their own
//! accumulators inside it, so every step of a frame runs to completion
//! before the next one looks at the world.

use serde::{Deserialize, Serialize};

use super::collision::{ContactOutcome, resolve_contact};
use super::events::GameEvent;
use super::formation::FormationMove;
use super::state::{GamePhase, GameState};
use crate::audio::SoundEffect;
use crate::consts::MAX_CADENCE_FIRINGS;

/// A fixed-interval repeating timer driven by frame time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    pub period: f32,
    pub elapsed: f32,
}

impl Cadence {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Add frame time; returns how many times the cadence fires this frame
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !(self.period > 0.0) {
            return 0;
        }
        self.elapsed += dt;
        if self.elapsed < self.period {
            return 0;
        }

        let due = (self.elapsed / self.period).floor();
        self.elapsed = self.elapsed.rem_euclid(self.period);
        if self.elapsed >= self.period {
            self.elapsed = 0.0;
        }
        // Stalled host: drop the backlog rather than replaying it
        due.min(MAX_CADENCE_FIRINGS as f32) as u32
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    if !(dt > 0.0 && dt.is_finite()) {
        return;
    }

    // A lost round is wiped before anything else moves
    if state.phase == GamePhase::GameOver {
        state.reset();
        return;
    }

    state.frames += 1;
    state.update_ship(dt);

    for _ in 0..state.move_cadence.advance(dt) {
        if state.formation.step(&mut state.store) == FormationMove::Idle {
            break;
        }
    }

    for _ in 0..state.bomb_cadence.advance(dt) {
        state.bomber.drop_bomb(&mut state.store, &state.projectiles);
    }

    state.projectiles.integrate(&mut state.store, dt);
    resolve_contacts(state);
    state.projectiles.cleanup(&mut state.store);
    state.store.flush();
    state.sync_visuals();
}

/// Feed this frame's new contacts to the resolver
fn resolve_contacts(state: &mut GameState) {
    let contacts = state.contacts.begin_contacts(&state.store);

    for contact in contacts {
        let outcome = resolve_contact(&mut state.store, &mut state.score, contact.a, contact.b);
        if outcome != ContactOutcome::Ignored {
            log::trace!("Contact {:?} -> {:?}", contact, outcome);
        }

        match outcome {
            ContactOutcome::EnemyDestroyed { .. } => {
                state.push_event(GameEvent::Sound(SoundEffect::Destroy));
                state.push_event(GameEvent::ScoreChanged {
                    score: state.score.value(),
                });
            }
            ContactOutcome::ShieldHit { .. } => {
                state.push_event(GameEvent::Sound(SoundEffect::Impact));
            }
            ContactOutcome::FormationLanded { .. } => {
                let final_score = state.score.value();
                log::info!("Game over: formation reached the shields, {}", state.score);
                state.phase = GamePhase::GameOver;
                state.games_lost += 1;
                state.push_event(GameEvent::Sound(SoundEffect::GameOver));
                state.push_event(GameEvent::GameOver { final_score });
                // The world is about to be rebuilt; later contacts are moot
                break;
            }
            ContactOutcome::ProjectilesCancelled { .. }
            | ContactOutcome::ShotAbsorbed { .. }
            | ContactOutcome::Ignored => {}
        }
    }
}
