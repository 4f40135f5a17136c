//! Brick Breaker - a single-screen brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `settings`: Data-driven geometry and tuning (`GameConfig`)
//! - `platform`: Input mapping and fixed-step frame clock
//! - `renderer`: HUD text, menu visibility and the DOM adapter

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BrickBounce, ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_TOP: f32 = 570.0;
    pub const PADDLE_START_X: f32 = 350.0;
    /// Horizontal displacement per tick while a direction key is held
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    /// Constant speed magnitude (units per tick)
    pub const BALL_SPEED: f32 = 6.0;
    pub const BALL_SPAWN_X: f32 = 390.0;
    pub const BALL_SPAWN_Y: f32 = 550.0;
    /// Full span of paddle reflection angles (edges leave at ±30° from vertical)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    pub const STARTING_LIVES: u8 = 3;

    /// Brick grid
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 8;
    pub const BRICK_WIDTH: f32 = 98.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    /// Distance between the left edges of neighbouring columns
    pub const BRICK_PITCH_X: f32 = 100.0;
    /// Distance between the top edges of neighbouring rows
    pub const BRICK_PITCH_Y: f32 = 40.0;
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
    pub const POINTS_PER_BRICK: u32 = 10;

    /// Cosmetic brick colors, picked per brick at game start
    pub const BRICK_PALETTE: [&str; 6] = [
        "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff",
    ];
}

/// Sign of `value` as -1, 0 or 1 (unlike `f32::signum`, zero maps to zero)
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
