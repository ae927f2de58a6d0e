//! Game state and world setup
//!
//! `GameState` owns everything the simulation mutates: the entity store,
//! formation, bomber RNG, score, cadences and the outgoing event queue.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bomber::BomberSelector;
use super::collision::ContactTracker;
use super::entity::{EnemyTier, Entity, EntityId, EntityKind};
use super::events::{GameEvent, Presenter, dispatch};
use super::formation::FormationState;
use super::input::PointerState;
use super::projectile::ProjectileManager;
use super::store::EntityStore;
use super::tick::Cadence;
use crate::config::{ConfigError, SimConfig};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Formation reached the shields; the next tick resets the world
    GameOver,
}

/// Enemies destroyed this round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u64);

impl Score {
    pub fn increment(&mut self) {
        self.0 += 1;
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCORE: {}", self.0)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub store: EntityStore,
    pub formation: FormationState,
    pub bomber: BomberSelector,
    pub projectiles: ProjectileManager,
    pub score: Score,
    pub phase: GamePhase,
    /// The player's ship (never removed)
    pub spaceship: EntityId,
    pub pointer: PointerState,
    pub move_cadence: Cadence,
    pub bomb_cadence: Cadence,
    pub contacts: ContactTracker,
    /// Frames simulated since the last reset
    pub frames: u64,
    /// Rounds lost since the state was created
    pub games_lost: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a validated game with its world populated
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut state = Self {
            formation: FormationState::new(&config),
            bomber: BomberSelector::new(config.seed, config.enemy_vertical_spacing),
            projectiles: ProjectileManager::new(&config),
            move_cadence: Cadence::new(config.move_period),
            bomb_cadence: Cadence::new(config.bomb_period),
            store: EntityStore::new(),
            score: Score::default(),
            phase: GamePhase::Playing,
            spaceship: EntityId(0),
            pointer: PointerState::default(),
            contacts: ContactTracker::new(),
            frames: 0,
            games_lost: 0,
            events: Vec::new(),
            config,
        };
        state.populate();

        log::info!(
            "Simulation initialized: world {}x{}, {} enemies, {} shield blocks",
            state.config.world_width,
            state.config.world_height,
            state.enemy_count(),
            state.shield_count()
        );
        Ok(state)
    }

    /// Default tuning for a world of the given size
    pub fn initialize(world_width: f32, world_height: f32) -> Result<Self, ConfigError> {
        Self::new(SimConfig::for_world(world_width, world_height))
    }

    /// Spawn ship, shields and formation into an empty store
    fn populate(&mut self) {
        let ship_pos = Vec2::new(0.0, self.config.ship_y());
        self.spaceship = self
            .store
            .spawn(EntityKind::Spaceship, ship_pos, self.config.ship_size);
        self.spawn_shields(ship_pos.y);
        self.spawn_formation();
        self.sync_visuals();
    }

    fn spawn_shields(&mut self, ship_y: f32) {
        let spacing = self.config.world_width / SHIELD_SPACING_DIVISOR;
        let first_x = self.config.bounds_left() + 0.5 * spacing;
        let y = ship_y + self.config.shield_offset_above_ship;
        let size = self.config.shield_block_size;

        for house in 0..SHIELD_HOUSES {
            let center = Vec2::new(first_x + house as f32 * SHIELD_HOUSE_PITCH * spacing, y);
            for block in 0..SHIELD_BLOCKS_PER_HOUSE {
                let row = (block / 3) as usize;
                let column = (block % 3) as f32;
                let pos = Vec2::new(
                    center.x + (column + 1.0) * SHIELD_BLOCK_WIDTH,
                    center.y - (row as f32 - 1.0) * SHIELD_ROW_HEIGHTS[row],
                );
                let kind = EntityKind::Shield {
                    house: house as u8,
                    block: block as u8,
                };
                self.store.spawn(kind, pos, size);
            }
        }
    }

    fn spawn_formation(&mut self) {
        let config = &self.config;
        let start_x = config.bounds_left() + ENEMY_LEFT_INSET;
        let start_y = config.world_height / 2.0 - ENEMY_TOP_INSET;
        let pitch = config.enemy_column_spacing_factor * config.horizontal_step;

        for row in 0..config.enemy_rows {
            let y = start_y - row as f32 * config.enemy_vertical_spacing;
            let tier = EnemyTier::for_row(row);
            for column in 0..config.enemy_columns {
                let pos = Vec2::new(start_x + column as f32 * pitch, y);
                let id = self.store.next_entity_id();
                self.store.add(Entity::new(
                    id,
                    EntityKind::Enemy { tier },
                    pos,
                    config.enemy_size,
                ));
            }
        }
    }

    /// Put everything back to its initial state (score, world, cadences)
    pub fn reset(&mut self) {
        self.store.clear();
        self.score = Score::default();
        self.phase = GamePhase::Playing;
        self.formation = FormationState::new(&self.config);
        self.move_cadence.restart();
        self.bomb_cadence.restart();
        self.pointer = PointerState::default();
        self.contacts.clear();
        self.frames = 0;
        self.populate();
        self.push_event(GameEvent::ScoreChanged { score: 0 });
        log::info!("World reset ({} rounds lost so far)", self.games_lost);
    }

    pub fn current_score(&self) -> u64 {
        self.score.value()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn enemy_count(&self) -> usize {
        self.store.count(EntityKind::is_enemy)
    }

    pub fn shield_count(&self) -> usize {
        self.store.count(EntityKind::is_shield)
    }

    pub fn projectile_count(&self) -> usize {
        self.store.count(EntityKind::is_projectile)
    }

    /// Snapshot iterator for hosts that redraw every frame
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.store.query(|_| true)
    }

    pub fn spaceship_pos(&self) -> Vec2 {
        self.store
            .get(self.spaceship)
            .map_or(Vec2::new(0.0, self.config.ship_y()), |ship| ship.pos)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Move pending store changes into the event queue
    pub(crate) fn sync_visuals(&mut self) {
        let changes = self.store.drain_changes();
        self.events.extend(changes.into_iter().map(GameEvent::from));
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.sync_visuals();
        std::mem::take(&mut self.events)
    }

    /// Deliver all queued events to a presenter
    pub fn present<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        let events = self.drain_events();
        dispatch(events, presenter);
    }
}
