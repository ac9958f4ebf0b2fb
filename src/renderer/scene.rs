//! Scene tessellation
//!
//! Turns a read-only view of the match into one triangle list, back to
//! front: vignette, net, paddles, ball, ball glow.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Rect};

/// Corner radius of the paddles
pub const PADDLE_CORNER_RADIUS: f32 = 4.0;
/// Net dash height
pub const NET_SEGMENT: f32 = 12.0;
/// Distance between the tops of consecutive net dashes
pub const NET_SPACING: f32 = NET_SEGMENT * 1.8;
pub const NET_WIDTH: f32 = 2.0;
/// Glow extent as multiples of the ball radius
pub const GLOW_INNER_SCALE: f32 = 0.2;
pub const GLOW_OUTER_SCALE: f32 = 6.0;

/// Dashes of the center line
pub fn net_segments() -> Vec<Rect> {
    let x = PLAYFIELD_WIDTH / 2.0 - NET_WIDTH / 2.0;
    let mut segments = Vec::new();
    let mut y = 0.0;
    while y < PLAYFIELD_HEIGHT {
        segments.push(Rect::new(x, y, NET_WIDTH, NET_SEGMENT));
        y += NET_SPACING;
    }
    segments
}

/// Build the frame's vertices; same state and settings give the same output
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::with_capacity(1024);

    if settings.vignette {
        let area = Rect::new(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        vertices.extend(shapes::vignette(
            &area,
            colors::VIGNETTE_CENTER,
            colors::VIGNETTE_EDGE,
        ));
    }

    if settings.net {
        for dash in net_segments() {
            vertices.extend(shapes::rect(&dash, colors::NET));
        }
    }

    for paddle in [&state.human, &state.follower] {
        vertices.extend(shapes::rounded_rect(
            &paddle.rect(),
            PADDLE_CORNER_RADIUS,
            colors::PADDLE,
            settings.quality.corner_segments(),
        ));
    }

    let ball = &state.ball;
    vertices.extend(shapes::circle(ball.pos, ball.radius, colors::BALL, segments));

    if settings.ball_glow {
        vertices.extend(shapes::radial_glow(
            ball.pos,
            ball.radius * GLOW_INNER_SCALE,
            ball.radius * GLOW_OUTER_SCALE,
            colors::GLOW_INNER,
            colors::GLOW_OUTER,
            segments,
        ));
    }

    vertices
}
