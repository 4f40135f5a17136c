//! Game configuration
//!
//! Geometry and tuning values consumed by the simulation. Defaults match the
//! classic 800×600 layout; the browser shell may override any subset from a
//! JSON blob.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How vertical velocity responds when several bricks are hit in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrickBounce {
    /// Invert `vy` once per destroyed brick (even hit counts cancel out)
    #[default]
    PerBrick,
    /// Invert `vy` at most once per tick regardless of hit count
    OncePerTick,
}

impl BrickBounce {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickBounce::PerBrick => "per_brick",
            BrickBounce::OncePerTick => "once_per_tick",
        }
    }
}

/// Configuration rejected by [`GameConfig::validate`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("brick grid must have at least one row and one column")]
    EmptyGrid,
    #[error("paddle width {paddle} exceeds field width {field}")]
    PaddleTooWide { paddle: f32, field: f32 },
    #[error("{what} does not fit inside the play field")]
    OutOfField { what: &'static str },
    #[error("brick pitch is smaller than the brick size, bricks would overlap")]
    BricksOverlap,
    #[error("ball speed {speed} could skip over the {what} ({depth} deep)")]
    Tunneling {
        what: &'static str,
        speed: f32,
        depth: f32,
    },
    #[error("{points} points per brick overflows the score over {bricks} bricks")]
    ScoreOverflow { points: u32, bricks: usize },
}

/// Geometry and tuning for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Y of the paddle's top edge (fixed for the whole game)
    pub paddle_top: f32,
    pub paddle_start_x: f32,
    /// Units moved per tick while a direction is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Speed magnitude in units per tick
    pub ball_speed: f32,
    pub ball_spawn_x: f32,
    pub ball_spawn_y: f32,

    // === Rules ===
    pub starting_lives: u8,
    pub points_per_brick: u32,
    pub brick_bounce: BrickBounce,

    // === Brick grid ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_pitch_x: f32,
    pub brick_pitch_y: f32,
    pub brick_top_offset: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_top: PADDLE_TOP,
            paddle_start_x: PADDLE_START_X,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            ball_spawn_x: BALL_SPAWN_X,
            ball_spawn_y: BALL_SPAWN_Y,

            starting_lives: STARTING_LIVES,
            points_per_brick: POINTS_PER_BRICK,
            brick_bounce: BrickBounce::PerBrick,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_pitch_x: BRICK_PITCH_X,
            brick_pitch_y: BRICK_PITCH_Y,
            brick_top_offset: BRICK_TOP_OFFSET,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the geometry is playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (field, value) in positives {
            // Negated comparison also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.paddle_width > self.field_width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                field: self.field_width,
            });
        }
        // Negated comparisons below also reject NaN
        if !(self.paddle_top >= 0.0) || self.paddle_top + self.paddle_height > self.field_height {
            return Err(ConfigError::OutOfField { what: "paddle" });
        }
        if !(self.paddle_start_x >= 0.0 && self.paddle_start_x <= self.paddle_max_x()) {
            return Err(ConfigError::OutOfField { what: "paddle start" });
        }

        // Spawn box sits inside the field and above the paddle
        if !(self.ball_spawn_x >= 0.0
            && self.ball_spawn_x + self.ball_size <= self.field_width
            && self.ball_spawn_y >= 0.0
            && self.ball_spawn_y + self.ball_size <= self.paddle_top)
        {
            return Err(ConfigError::OutOfField { what: "ball spawn" });
        }

        if !(self.brick_pitch_x >= self.brick_width && self.brick_pitch_y >= self.brick_height) {
            return Err(ConfigError::BricksOverlap);
        }
        let grid_right =
            (self.brick_cols - 1) as f32 * self.brick_pitch_x + self.brick_width;
        let grid_bottom = self.brick_top_offset
            + (self.brick_rows - 1) as f32 * self.brick_pitch_y
            + self.brick_height;
        if !(self.brick_top_offset >= 0.0)
            || grid_right > self.field_width
            || grid_bottom > self.paddle_top
        {
            return Err(ConfigError::OutOfField { what: "brick grid" });
        }

        // Each tick must land at least once inside every band the ball can
        // collide with, or it steps straight over it
        if self.ball_speed >= self.paddle_height {
            return Err(ConfigError::Tunneling {
                what: "paddle",
                speed: self.ball_speed,
                depth: self.paddle_height,
            });
        }
        let brick_depth = self.brick_height + self.ball_size;
        if self.ball_speed >= brick_depth {
            return Err(ConfigError::Tunneling {
                what: "bricks",
                speed: self.ball_speed,
                depth: brick_depth,
            });
        }

        let bricks = self.brick_count();
        let max_score = u32::try_from(bricks)
            .ok()
            .and_then(|n| n.checked_mul(self.points_per_brick));
        if max_score.is_none() {
            return Err(ConfigError::ScoreOverflow {
                points: self.points_per_brick,
                bricks,
            });
        }

        Ok(())
    }

    /// Largest valid paddle x (left edge)
    #[inline]
    pub fn paddle_max_x(&self) -> f32 {
        self.field_width - self.paddle_width
    }

    /// Total number of bricks laid out at game start
    #[inline]
    pub fn brick_count(&self) -> usize {
        self.brick_rows * self.brick_cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brick_count(), 40);
        assert_eq!(config.paddle_max_x(), 700.0);
    }

    #[test]
    fn test_partial_json_override() {
        let config =
            GameConfig::from_json(r#"{ "paddle_width": 140, "brick_bounce": "once_per_tick" }"#)
                .unwrap();
        assert_eq!(config.paddle_width, 140.0);
        assert_eq!(config.brick_bounce, BrickBounce::OncePerTick);
        // Untouched fields keep their defaults
        assert_eq!(config.ball_speed, BALL_SPEED);
        assert_eq!(config.brick_rows, BRICK_ROWS);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_unplayable_geometry() {
        let err = GameConfig::from_json(r#"{ "ball_speed": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive { field: "ball_speed", .. }
        ));

        let err = GameConfig::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoLives));

        let err = GameConfig::from_json(r#"{ "brick_cols": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyGrid));

        let err = GameConfig::from_json(r#"{ "paddle_width": 900 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::PaddleTooWide { .. }));

        let err = GameConfig::from_json(r#"{ "brick_cols": 9 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfField { what: "brick grid" }));
    }

    #[test]
    fn test_rejects_misplaced_spawn_and_grid() {
        let cases = [
            (r#"{ "ball_spawn_y": 700 }"#, "ball spawn"),
            // Spawn box would overlap the paddle (565 + 15 > 570)
            (r#"{ "ball_spawn_y": 560 }"#, "ball spawn"),
            (r#"{ "ball_spawn_x": -5 }"#, "ball spawn"),
            (r#"{ "ball_spawn_x": 790 }"#, "ball spawn"),
            (r#"{ "paddle_start_x": 750 }"#, "paddle start"),
            (r#"{ "paddle_start_x": -1 }"#, "paddle start"),
            (r#"{ "paddle_top": -10 }"#, "paddle"),
            (r#"{ "brick_top_offset": -20 }"#, "brick grid"),
        ];
        for (json, expected) in cases {
            match GameConfig::from_json(json) {
                Err(ConfigError::OutOfField { what }) => assert_eq!(what, expected, "{json}"),
                other => panic!("{json}: expected OutOfField, got {other:?}"),
            }
        }

        let err = GameConfig::from_json(r#"{ "ball_spawn_y": 700, "brick_pitch_x": -100 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfField { what: "ball spawn" }));

        for json in [
            r#"{ "brick_pitch_x": -100 }"#,
            r#"{ "brick_pitch_x": 50 }"#,
            r#"{ "brick_pitch_y": 20 }"#,
        ] {
            let err = GameConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::BricksOverlap), "{json}");
        }
    }

    #[test]
    fn test_rejects_speeds_that_skip_collisions() {
        let err = GameConfig::from_json(r#"{ "ball_speed": 20 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Tunneling { what: "paddle", .. }));

        // Paddle thick enough, but the ball would hop over a brick row
        let err = GameConfig::from_json(
            r#"{ "ball_speed": 50, "paddle_height": 60, "paddle_top": 520, "ball_spawn_y": 500 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Tunneling { what: "bricks", .. }));

        // Just under the paddle depth is fine
        assert!(GameConfig::from_json(r#"{ "ball_speed": 14.5 }"#).is_ok());
    }

    #[test]
    fn test_rejects_score_overflow() {
        let err = GameConfig::from_json(r#"{ "points_per_brick": 4294967295 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ScoreOverflow { points: u32::MAX, bricks: 40 }
        ));
        // 40 * 100_000_000 still fits in a u32
        assert!(GameConfig::from_json(r#"{ "points_per_brick": 100000000 }"#).is_ok());
    }

    #[test]
    fn test_bounce_policy_names() {
        assert_eq!(BrickBounce::PerBrick.as_str(), "per_brick");
        let json = serde_json::to_string(&BrickBounce::OncePerTick).unwrap();
        assert_eq!(json, "\"once_per_tick\"");
    }
}
