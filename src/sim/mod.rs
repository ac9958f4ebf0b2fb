//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Motion is a fixed step per `tick` call
//! - Seeded RNG only
//! - State is only mutated by `tick`, serves and the serve clock

pub mod collision;
pub mod serve;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_intersects_rect, clamp};
pub use serve::{ServeScheduler, ServeTicket};
pub use state::{Ball, GameEvent, GameState, Paddle, Side};
pub use tick::{TickInput, follow_ball, tick};
