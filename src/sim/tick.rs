//! Fixed-step simulation tick
//!
//! One call advances the game by one logical frame. The ball moves by its
//! velocity per tick; there is no elapsed-time scaling, the shell's frame
//! clock decides how many ticks run.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    ball_paddle_contact, bounce_velocity, paddle_contact_point, reflection_angle, wall_response,
};
use super::geometry::Rect;
use super::state::{Brick, GamePhase, GameState, TickEvents, TickInput};
use crate::consts::BRICK_PALETTE;
use crate::settings::BrickBounce;

/// Advance the game state by one tick
///
/// Does nothing unless the game is Playing. Order within a tick: paddle,
/// ball motion, ball-lost check, paddle bounce, walls, bricks, win check.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    // Paddle moves every tick, whatever the ball does
    let max_x = state.config.paddle_max_x();
    state
        .paddle
        .steer(input.direction(), state.config.paddle_speed, max_x);

    state.ball.pos += state.ball.vel;

    // Fell past the bottom edge
    if state.ball.pos.y >= state.config.field_height {
        events.ball_lost = true;
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = GamePhase::Lost;
            events.lost = true;
            log::info!("Game over, final score {}", state.score);
        } else {
            log::debug!("Ball lost, {} lives left", state.lives);
            state.respawn_ball();
        }
        return events;
    }

    let ball_rect = state.ball.rect();
    let paddle_rect = state.paddle.rect();

    // A paddle bounce ends collision handling for this tick
    if ball_paddle_contact(&ball_rect, state.ball.vel, &paddle_rect) {
        let angle = reflection_angle(paddle_contact_point(&ball_rect, &paddle_rect));
        state.ball.vel = bounce_velocity(angle, state.config.ball_speed);
        state.ball.pos.y = paddle_rect.top() - state.ball.size;
        events.paddle_hit = true;
        return events;
    }

    events.wall_hit = wall_response(
        &mut state.ball.pos,
        &mut state.ball.vel,
        state.ball.size,
        state.config.field_width,
    )
    .any();

    // Bricks are tested against the box the ball occupied before wall clamping
    for (idx, brick) in state.bricks.iter_mut().enumerate() {
        if brick.alive && brick.rect.overlaps(&ball_rect) {
            brick.alive = false;
            events.bricks_destroyed.push(idx);
            log::debug!("Brick {} (row {}, col {}) destroyed", idx, brick.row, brick.col);
        }
    }

    let hits = events.bricks_destroyed.len();
    if hits > 0 {
        let flips = match state.config.brick_bounce {
            BrickBounce::PerBrick => hits,
            BrickBounce::OncePerTick => 1,
        };
        if flips % 2 == 1 {
            state.ball.vel.y = -state.ball.vel.y;
        }

        // Validated configs cannot overflow; saturate for hand-built ones
        events.score_delta = u32::try_from(hits)
            .unwrap_or(u32::MAX)
            .saturating_mul(state.config.points_per_brick);
        state.score = state.score.saturating_add(events.score_delta);
    }

    if state.alive_bricks() == 0 {
        state.phase = GamePhase::Won;
        events.won = true;
        log::info!("All bricks cleared, final score {}", state.score);
    }

    events
}

/// Lay out the full brick grid with seeded cosmetic colors
pub fn generate_bricks(state: &mut GameState) {
    let config = &state.config;
    let mut rng = state.rng_state.to_rng();
    let size = Vec2::new(config.brick_width, config.brick_height);

    let mut bricks = Vec::with_capacity(config.brick_count());
    for row in 0..config.brick_rows {
        for col in 0..config.brick_cols {
            let pos = Vec2::new(
                col as f32 * config.brick_pitch_x,
                config.brick_top_offset + row as f32 * config.brick_pitch_y,
            );
            bricks.push(Brick {
                row,
                col,
                rect: Rect::from_pos_size(pos, size),
                color: rng.random_range(0..BRICK_PALETTE.len()) as u8,
                alive: true,
            });
        }
    }

    state.bricks = bricks;
}

/// Demo input that keeps the paddle centered under the ball
pub fn autopilot_input(state: &GameState) -> TickInput {
    let target = state.ball.rect().center().x;
    let paddle_center = state.paddle.x + state.paddle.width / 2.0;
    // Dead zone avoids jittering around the target
    let dead_zone = state.config.paddle_speed / 2.0;

    TickInput {
        left_held: target < paddle_center - dead_zone,
        right_held: target > paddle_center + dead_zone,
    }
}
