//! Events emitted to the host shell
//!
//! The simulation never renders or plays audio itself. It queues
//! `GameEvent`s which the host drains, either raw or through a `Presenter`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};
use super::store::VisualChange;
use crate::audio::SoundEffect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new entity needs a sprite
    SpawnVisual {
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
    },
    /// An entity's sprite should go away
    RemoveVisual { id: EntityId },
    Sound(SoundEffect),
    ScoreChanged { score: u64 },
    /// The formation reached the shields; reset follows on the next tick
    GameOver { final_score: u64 },
}

impl From<VisualChange> for GameEvent {
    fn from(change: VisualChange) -> Self {
        match change {
            VisualChange::Spawned { id, kind, pos } => GameEvent::SpawnVisual { id, kind, pos },
            VisualChange::Removed { id } => GameEvent::RemoveVisual { id },
        }
    }
}

/// Host-side rendering/audio collaborator
pub trait Presenter {
    fn spawn_visual(&mut self, id: EntityId, kind: EntityKind, pos: Vec2);
    fn remove_visual(&mut self, id: EntityId);
    fn play_sound(&mut self, effect: SoundEffect);

    /// HUD hook
    fn score_changed(&mut self, _score: u64) {}

    fn game_over(&mut self, _final_score: u64) {}
}

/// Replay events into a presenter, in order
pub fn dispatch<P: Presenter + ?Sized>(events: impl IntoIterator<Item = GameEvent>, presenter: &mut P) {
    for event in events {
        match event {
            GameEvent::SpawnVisual { id, kind, pos } => presenter.spawn_visual(id, kind, pos),
            GameEvent::RemoveVisual { id } => presenter.remove_visual(id),
            GameEvent::Sound(effect) => presenter.play_sound(effect),
            GameEvent::ScoreChanged { score } => presenter.score_changed(score),
            GameEvent::GameOver { final_score } => presenter.game_over(final_score),
        }
    }
}
