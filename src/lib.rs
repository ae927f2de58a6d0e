//! Invaders - a touch-driven space invaders arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (formation, bombs, projectiles, contacts)
//! - `config`: Tunable world and gameplay parameters
//! - `audio`: Sound effect vocabulary and playback gate

pub mod audio;
pub mod config;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, SoundEffect};
pub use config::{ConfigError, SimConfig};

/// Game configuration constants
pub mod consts {
    /// Reference world size (portrait phone scene)
    pub const DEFAULT_WORLD_WIDTH: f32 = 750.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 1334.0;

    /// Fixed step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Formation cadence (seconds)
    pub const MOVE_PERIOD: f32 = 1.0;
    /// Bomb cadence (seconds)
    pub const BOMB_PERIOD: f32 = 1.5;
    /// Maximum firings of one cadence inside a single frame
    pub const MAX_CADENCE_FIRINGS: u32 = 4;

    /// Enemy grid
    pub const ENEMY_ROWS: u32 = 5;
    pub const ENEMY_COLUMNS: u32 = 9;
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 24.0;
    /// Distance between enemy rows, also the downward step of the formation
    pub const ENEMY_VERTICAL_SPACING: f32 = 50.0;
    /// Column pitch as a multiple of the horizontal step
    pub const ENEMY_COLUMN_SPACING_FACTOR: f32 = 1.5;
    /// Horizontal step is world_width / this
    pub const HORIZONTAL_STEP_DIVISOR: f32 = 16.0;
    /// First column inset from the left edge
    pub const ENEMY_LEFT_INSET: f32 = 30.0;
    /// Top row inset from the top edge
    pub const ENEMY_TOP_INSET: f32 = 100.0;

    /// Spaceship
    pub const SHIP_WIDTH: f32 = 50.0;
    pub const SHIP_HEIGHT: f32 = 25.0;
    pub const SHIP_OFFSET_FROM_BOTTOM: f32 = 100.0;
    /// Easing time when a pointer first grabs the ship
    pub const SHIP_GRAB_DURATION: f32 = 0.5;
    /// Easing time while dragging
    pub const SHIP_DRAG_DURATION: f32 = 0.05;

    /// Shields: 4 houses of 3x3 sub-blocks
    pub const SHIELD_HOUSES: u32 = 4;
    pub const SHIELD_BLOCKS_PER_HOUSE: u32 = 9;
    pub const SHIELD_OFFSET_ABOVE_SHIP: f32 = 150.0;
    pub const SHIELD_BLOCK_WIDTH: f32 = 30.0;
    pub const SHIELD_BLOCK_HEIGHT: f32 = 18.0;
    /// Vertical offset multipliers per sub-block row
    pub const SHIELD_ROW_HEIGHTS: [f32; 3] = [11.0, 25.0, 26.0];
    /// House pitch is world_width / this
    pub const SHIELD_SPACING_DIVISOR: f32 = 9.0;
    pub const SHIELD_HOUSE_PITCH: f32 = 2.2;

    /// Projectiles
    pub const SHOT_SPEED: f32 = 500.0;
    /// 9.8 m/s² at 150 units per meter
    pub const BOMB_GRAVITY: f32 = 9.8 * 150.0;
    pub const PROJECTILE_WIDTH: f32 = 6.0;
    pub const PROJECTILE_HEIGHT: f32 = 18.0;
    /// Despawn bounds sit this far beyond the top/bottom world edge
    pub const DESPAWN_MARGIN: f32 = 33.0;
}

/// Smooth ease-in-ease-out curve on [0, 1]
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
