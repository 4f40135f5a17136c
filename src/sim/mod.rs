//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick displacement only
//! - Seeded RNG only (brick colors)
//! - Stable iteration order (row-major bricks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{WallHit, ball_paddle_contact, bounce_velocity, reflection_angle};
pub use geometry::Rect;
pub use state::{
    Ball, Brick, GamePhase, GameState, Paddle, RngState, Snapshot, TickEvents, TickInput,
};
pub use tick::{autopilot_input, generate_bricks, tick};
