//! Game state and core simulation types
//!
//! Everything the presentation layer may read lives here; it only ever sees
//! it through [`GameState::snapshot`] or the public fields.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::BRICK_PALETTE;
use crate::settings::GameConfig;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start menu shown, no bricks laid out yet
    NotStarted,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// All bricks cleared
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    /// Won and Lost only leave through a full reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Won => "won",
            GamePhase::Lost => "lost",
        }
    }
}

/// The ball (square bounding box, top-left anchored)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    /// A ball at the spawn point with the serve velocity
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.ball_spawn_x, config.ball_spawn_y),
            vel: Self::serve_velocity(config.ball_speed),
            size: config.ball_size,
        }
    }

    /// 45° up and to the right at `speed`
    ///
    /// The classic serve is (6, -6), which moves at ~8.49 until the first
    /// paddle bounce renormalizes it. Scaling the diagonal keeps the ball at
    /// `ball_speed` from the first tick.
    pub fn serve_velocity(speed: f32) -> Vec2 {
        Vec2::new(1.0, -1.0).normalize() * speed
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle; only `x` ever changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.paddle_start_x.clamp(0.0, config.paddle_max_x()),
            top: config.paddle_top,
            width: config.paddle_width,
            height: config.paddle_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(
            Vec2::new(self.x, self.top),
            Vec2::new(self.width, self.height),
        )
    }

    /// Move by `direction * speed`, staying within `[0, max_x]`
    pub fn steer(&mut self, direction: f32, speed: f32, max_x: f32) {
        self.x = (self.x + direction * speed).clamp(0.0, max_x);
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    /// Index into [`BRICK_PALETTE`] (cosmetic only)
    pub color: u8,
    pub alive: bool,
}

impl Brick {
    pub fn color_hex(&self) -> &'static str {
        BRICK_PALETTE[self.color as usize % BRICK_PALETTE.len()]
    }
}

/// Held direction keys, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_held: bool,
    pub right_held: bool,
}

impl TickInput {
    /// -1 (left), 0 (none or both), or 1 (right)
    pub fn direction(&self) -> f32 {
        match (self.left_held, self.right_held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// What happened during one tick, for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickEvents {
    /// Indices into [`GameState::bricks`] destroyed this tick
    pub bricks_destroyed: Vec<usize>,
    pub paddle_hit: bool,
    /// Ball bounced off a side wall or the ceiling
    pub wall_hit: bool,
    pub ball_lost: bool,
    pub won: bool,
    pub lost: bool,
    pub score_delta: u32,
}

/// Read-only view of the state for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub ball: Vec2,
    pub paddle_x: f32,
    pub bricks_alive: Vec<bool>,
    pub score: u32,
    pub lives: u8,
    pub game_time: u32,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// Move to a fresh stream so the next game gets different colors
    pub fn advance(&mut self) {
        self.stream = self.stream.wrapping_add(1);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub rng_state: RngState,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Whole seconds spent in Playing
    pub game_time: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Row-major brick grid; empty until the game starts
    pub bricks: Vec<Brick>,
}

impl GameState {
    /// Create a game waiting on the start menu
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            rng_state: RngState::new(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            lives: config.starting_lives,
            game_time: 0,
            time_ticks: 0,
            ball: Ball::spawn(&config),
            paddle: Paddle::new(&config),
            bricks: Vec::new(),
            config,
        }
    }

    /// NotStarted → Playing. Lays out a fresh brick grid.
    ///
    /// Returns false (and changes nothing) from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            log::debug!("start ignored in phase {}", self.phase.as_str());
            return false;
        }

        super::tick::generate_bricks(self);
        self.respawn_ball();
        self.phase = GamePhase::Playing;
        log::info!("Game started with {} bricks", self.bricks.len());
        true
    }

    /// Playing ⇄ Paused. Returns false from any other phase.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => {
                log::debug!("pause toggle ignored in phase {}", other.as_str());
                return false;
            }
        };
        log::info!("Game {}", self.phase.as_str());
        true
    }

    /// Discard all entity state and return to NotStarted (valid from any phase)
    pub fn reset(&mut self) {
        let mut rng_state = self.rng_state.clone();
        rng_state.advance();
        *self = Self::new(self.config.clone(), rng_state.seed);
        self.rng_state = rng_state;
        log::info!("Game reset");
    }

    /// One-second timer callback. Counts only while Playing.
    pub fn on_second_elapsed(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.game_time += 1;
        true
    }

    /// Put the ball back at the spawn point with the serve velocity
    pub fn respawn_ball(&mut self) {
        self.ball = Ball::spawn(&self.config);
    }

    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            ball: self.ball.pos,
            paddle_x: self.paddle.x,
            bricks_alive: self.bricks.iter().map(|b| b.alive).collect(),
            score: self.score,
            lives: self.lives,
            game_time: self.game_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 42)
    }

    #[test]
    fn test_initial_state() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(state.bricks.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(390.0, 550.0));
        assert_eq!(state.paddle.x, 350.0);
        assert!((state.ball.speed() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut state = new_state();
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bricks.len(), 40);
        assert_eq!(state.alive_bricks(), 40);

        // Second start is a no-op
        state.bricks[0].alive = false;
        assert!(!state.start());
        assert!(!state.bricks[0].alive);

        state.phase = GamePhase::Won;
        assert!(!state.start());
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = new_state();
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::NotStarted);

        state.start();
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::Lost;
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Lost);
    }

    #[test]
    fn test_reset_from_any_phase() {
        for phase in [
            GamePhase::Playing,
            GamePhase::Paused,
            GamePhase::Won,
            GamePhase::Lost,
        ] {
            let mut state = new_state();
            state.start();
            state.score = 120;
            state.lives = 1;
            state.game_time = 33;
            state.bricks[3].alive = false;
            state.paddle.x = 0.0;
            state.phase = phase;

            state.reset();
            assert_eq!(state.phase, GamePhase::NotStarted);
            assert_eq!(state.score, 0);
            assert_eq!(state.lives, 3);
            assert_eq!(state.game_time, 0);
            assert!(state.bricks.is_empty());
            assert_eq!(state.paddle.x, 350.0);

            // And a new game can begin
            assert!(state.start());
            assert_eq!(state.alive_bricks(), 40);
        }
    }

    #[test]
    fn test_reset_changes_color_stream() {
        let mut state = new_state();
        state.reset();
        assert_eq!(state.rng_state.seed, 42);
        assert_eq!(state.rng_state.stream, 1);
    }

    #[test]
    fn test_timer_counts_only_while_playing() {
        let mut state = new_state();
        assert!(!state.on_second_elapsed());
        state.start();
        assert!(state.on_second_elapsed());
        assert!(state.on_second_elapsed());
        state.toggle_pause();
        assert!(!state.on_second_elapsed());
        assert_eq!(state.game_time, 2);
    }

    #[test]
    fn test_input_direction() {
        let none = TickInput::default();
        assert_eq!(none.direction(), 0.0);
        let left = TickInput {
            left_held: true,
            ..Default::default()
        };
        assert_eq!(left.direction(), -1.0);
        let both = TickInput {
            left_held: true,
            right_held: true,
        };
        assert_eq!(both.direction(), 0.0);
    }

    #[test]
    fn test_paddle_steer_clamps() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.x = 4.0;
        paddle.steer(-1.0, 8.0, config.paddle_max_x());
        assert_eq!(paddle.x, 0.0);
        paddle.x = 696.0;
        paddle.steer(1.0, 8.0, config.paddle_max_x());
        assert_eq!(paddle.x, 700.0);
    }

    #[test]
    fn test_snapshot() {
        let mut state = new_state();
        state.start();
        state.bricks[5].alive = false;
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.bricks_alive.len(), 40);
        assert!(!snap.bricks_alive[5]);
        assert_eq!(snap.ball, state.ball.pos);

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}
