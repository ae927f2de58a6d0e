//! Simulation configuration
//!
//! World geometry, formation layout, cadence periods and projectile tuning.
//! Loaded from JSON or derived from the world size; validated before a
//! `GameState` is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected at initialization
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world size must be positive, got {width}x{height}")]
    NonPositiveWorld { width: f32, height: f32 },

    #[error("formation needs at least one enemy, got {rows} rows x {columns} columns")]
    EmptyFormation { rows: u32, columns: u32 },

    #[error("{name} period must be positive, got {value}")]
    NonPositivePeriod { name: &'static str, value: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositiveStep { name: &'static str, value: f32 },

    #[error("projectile bounds are inverted: lower {lower} >= upper {upper}")]
    InvalidBounds { lower: f32, upper: f32 },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    /// World width (origin at the center, y up)
    pub world_width: f32,
    /// World height
    pub world_height: f32,
    /// Seed for the bomber RNG
    pub seed: u64,

    // === Formation ===
    pub enemy_rows: u32,
    pub enemy_columns: u32,
    pub enemy_size: Vec2,
    /// Distance between enemy rows (also the front-row probe distance)
    pub enemy_vertical_spacing: f32,
    /// Column pitch as a multiple of `horizontal_step`
    pub enemy_column_spacing_factor: f32,
    /// Sideways shift per movement tick
    pub horizontal_step: f32,
    /// Downward shift when the formation turns around
    pub vertical_step: f32,

    // === Cadences ===
    /// Formation movement period (seconds)
    pub move_period: f32,
    /// Bomb drop period (seconds)
    pub bomb_period: f32,

    // === Projectiles ===
    /// Player shot speed (units/s, upward)
    pub shot_speed: f32,
    /// Bomb gravity (units/s², downward)
    pub bomb_gravity: f32,
    pub projectile_size: Vec2,
    /// Projectiles above this y are despawned
    pub projectile_upper_bound: f32,
    /// Projectiles below this y are despawned
    pub projectile_lower_bound: f32,

    // === Spaceship & shields ===
    pub ship_size: Vec2,
    pub ship_offset_from_bottom: f32,
    pub shield_offset_above_ship: f32,
    pub shield_block_size: Vec2,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::for_world(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}

impl SimConfig {
    /// Create a config with all world-dependent values derived from the size
    pub fn for_world(width: f32, height: f32) -> Self {
        Self {
            world_width: width,
            world_height: height,
            seed: 42,

            enemy_rows: ENEMY_ROWS,
            enemy_columns: ENEMY_COLUMNS,
            enemy_size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            enemy_vertical_spacing: ENEMY_VERTICAL_SPACING,
            enemy_column_spacing_factor: ENEMY_COLUMN_SPACING_FACTOR,
            horizontal_step: width / HORIZONTAL_STEP_DIVISOR,
            vertical_step: ENEMY_VERTICAL_SPACING,

            move_period: MOVE_PERIOD,
            bomb_period: BOMB_PERIOD,

            shot_speed: SHOT_SPEED,
            bomb_gravity: BOMB_GRAVITY,
            projectile_size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            projectile_upper_bound: height / 2.0 + DESPAWN_MARGIN,
            projectile_lower_bound: -(height / 2.0 + DESPAWN_MARGIN),

            ship_size: Vec2::new(SHIP_WIDTH, SHIP_HEIGHT),
            ship_offset_from_bottom: SHIP_OFFSET_FROM_BOTTOM,
            shield_offset_above_ship: SHIELD_OFFSET_ABOVE_SHIP,
            shield_block_size: Vec2::new(SHIELD_BLOCK_WIDTH, SHIELD_BLOCK_HEIGHT),
        }
    }

    /// Same config with a different bomber seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a JSON config; missing fields fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "Loaded config: world {}x{}, {}x{} enemies",
            config.world_width,
            config.world_height,
            config.enemy_columns,
            config.enemy_rows
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::NonPositiveWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.enemy_rows == 0 || self.enemy_columns == 0 {
            return Err(ConfigError::EmptyFormation {
                rows: self.enemy_rows,
                columns: self.enemy_columns,
            });
        }
        for (name, value) in [("move", self.move_period), ("bomb", self.bomb_period)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositivePeriod { name, value });
            }
        }
        for (name, value) in [
            ("horizontal_step", self.horizontal_step),
            ("vertical_step", self.vertical_step),
            ("enemy_vertical_spacing", self.enemy_vertical_spacing),
            ("shot_speed", self.shot_speed),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositiveStep { name, value });
            }
        }
        if self.projectile_lower_bound >= self.projectile_upper_bound {
            return Err(ConfigError::InvalidBounds {
                lower: self.projectile_lower_bound,
                upper: self.projectile_upper_bound,
            });
        }
        Ok(())
    }

    /// Left edge of the world
    pub fn bounds_left(&self) -> f32 {
        -self.world_width / 2.0
    }

    /// Right edge of the world
    pub fn bounds_right(&self) -> f32 {
        self.world_width / 2.0
    }

    /// Spaceship row y
    pub fn ship_y(&self) -> f32 {
        -self.world_height / 2.0 + self.ship_offset_from_bottom
    }

    /// Total enemies in a fresh formation
    pub fn enemy_count(&self) -> usize {
        (self.enemy_rows * self.enemy_columns) as usize
    }

    /// Total shield sub-blocks in a fresh world
    pub fn shield_block_count(&self) -> usize {
        (SHIELD_HOUSES * SHIELD_BLOCKS_PER_HOUSE) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_world() {
        let config = SimConfig::default();
        assert_eq!(config.world_width, 750.0);
        assert!((config.horizontal_step - 46.875).abs() < 1e-4);
        assert_eq!(config.projectile_upper_bound, 700.0);
        assert_eq!(config.projectile_lower_bound, -700.0);
        assert_eq!(config.ship_y(), -567.0);
        assert_eq!(config.enemy_count(), 45);
        assert_eq!(config.shield_block_count(), 36);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_formation() {
        let config = SimConfig {
            enemy_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyFormation { rows: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_period() {
        let config = SimConfig {
            bomb_period: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositivePeriod { name: "bomb", .. }));
        assert!(err.to_string().contains("bomb period"));
    }

    #[test]
    fn test_rejects_nan_step() {
        let config = SimConfig {
            horizontal_step: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveStep { name: "horizontal_step", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_world_and_bounds() {
        let config = SimConfig::for_world(0.0, 100.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveWorld { .. })
        ));

        let config = SimConfig {
            projectile_lower_bound: 10.0,
            projectile_upper_bound: 10.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { .. })));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "move_period": 0.5 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.move_period, 0.5);
        assert_eq!(config.enemy_columns, ENEMY_COLUMNS);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            SimConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "enemy_columns": 0 }"#),
            Err(ConfigError::EmptyFormation { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_preserves_config() {
        let config = SimConfig::for_world(600.0, 900.0).with_seed(99);
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }
}
