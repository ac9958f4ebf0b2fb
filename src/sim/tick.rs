//! Per-frame simulation step
//!
//! Advances the match by exactly one step per call. Speeds are per step, so
//! the elapsed time handed in is recorded but does not scale motion.

use glam::Vec2;

use super::collision::circle_intersects_rect;
use super::state::{Ball, GameEvent, GameState, Paddle, Side};
use crate::consts::*;

/// Human intent for a single step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move up by the paddle speed
    pub up: bool,
    /// Move down by the paddle speed
    pub down: bool,
    /// Absolute pointer position (playfield y) to center the paddle on
    pub pointer_y: Option<f32>,
}

/// Advance the match by one step
///
/// Does nothing while the match is not running.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if !state.running {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_ms += dt_ms;

    // Human paddle: absolute pointer first, then held keys
    let human = &mut state.human;
    if let Some(pointer_y) = input.pointer_y {
        human.y = pointer_y - human.height / 2.0;
    }
    if input.up {
        human.y -= human.speed;
    }
    if input.down {
        human.y += human.speed;
    }
    human.clamp_to_playfield();

    follow_ball(&mut state.follower, &state.ball);

    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // Top and bottom walls
    let mut wall_bounce = false;
    if ball.pos.y - ball.radius <= 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        wall_bounce = true;
    } else if ball.pos.y + ball.radius >= PLAYFIELD_HEIGHT {
        ball.pos.y = PLAYFIELD_HEIGHT - ball.radius;
        ball.vel.y = -ball.vel.y;
        wall_bounce = true;
    }
    if wall_bounce {
        state.push_event(GameEvent::WallBounce);
    }

    for side in [Side::Human, Side::Follower] {
        let paddle = state.paddle(side).clone();
        if bounce_off_paddle(&mut state.ball, &paddle, side) {
            log::debug!("Paddle hit ({:?}), speed {:.2}", side, state.ball.speed);
            state.push_event(GameEvent::PaddleHit { side });
        }
    }

    // At most one side can score per step
    let left_edge = state.ball.pos.x - state.ball.radius;
    let right_edge = state.ball.pos.x + state.ball.radius;
    if left_edge <= 0.0 {
        state.award_point(Side::Follower);
    } else if right_edge >= PLAYFIELD_WIDTH {
        state.award_point(Side::Human);
    }
}

/// Move the follower paddle toward the ball's height
///
/// Speed grows slightly with ball speed. Inside the deadzone the paddle
/// holds still, and it never overshoots its target in one step.
pub fn follow_ball(paddle: &mut Paddle, ball: &Ball) {
    let target_y = ball.pos.y - paddle.height / 2.0;
    let diff = target_y - paddle.y;
    let follow_speed =
        paddle.speed + (FOLLOWER_SPEED_GAIN * ball.speed).min(FOLLOWER_MAX_BONUS);

    if diff.abs() > FOLLOWER_DEADZONE {
        paddle.y += diff.signum() * follow_speed.min(diff.abs());
    }
    paddle.clamp_to_playfield();
}

/// Bounce the ball off `paddle` if it overlaps while heading toward `side`
///
/// The exit angle depends on where the ball struck: center returns it flat,
/// the ends deflect it by `MAX_BOUNCE_ANGLE`, and a hit on a corner,
/// with the ball center past the paddle end, deflects a little further.
/// Returns true on a hit.
fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Side) -> bool {
    let approaching = match side {
        Side::Human => ball.vel.x < 0.0,
        Side::Follower => ball.vel.x > 0.0,
    };
    if !approaching || !circle_intersects_rect(ball.pos, ball.radius, &paddle.rect()) {
        return false;
    }

    let half_height = paddle.height / 2.0;
    let offset = (ball.pos.y - paddle.center_y()) / half_height;
    let bounce_angle = offset * MAX_BOUNCE_ANGLE;

    ball.speed = (ball.speed + BALL_SPEED_STEP).min(BALL_MAX_SPEED);
    let away = match side {
        Side::Human => 1.0,
        Side::Follower => -1.0,
    };
    ball.vel = Vec2::new(
        away * (ball.speed * bounce_angle.cos()).abs(),
        ball.speed * bounce_angle.sin(),
    );

    // Park the ball just clear of the paddle face
    ball.pos.x = match side {
        Side::Human => paddle.x + paddle.width + ball.radius + BALL_PUSH_OUT,
        Side::Follower => paddle.x - ball.radius - BALL_PUSH_OUT,
    };

    true
}
