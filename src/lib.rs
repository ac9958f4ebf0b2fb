//! Duel Pong - a classic two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation (paddles, ball, collisions, scoring, serves)
//! - `input`: Pointer/keyboard intent gathered between frames
//! - `session`: Frame driver and match control surface
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Persisted visual preferences

pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{InputState, Key};
pub use session::{ScoreDisplay, Session};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Speeds are in playfield units per simulation step, not per second.
pub mod consts {
    /// Playfield dimensions (the canvas backing size at 1x)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Paddle geometry
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 110.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 10.0;
    pub const HUMAN_PADDLE_SPEED: f32 = 7.0;
    pub const FOLLOWER_PADDLE_SPEED: f32 = 5.0;

    /// Follower tuning
    pub const FOLLOWER_DEADZONE: f32 = 4.0;
    /// Extra follow speed per unit of ball speed
    pub const FOLLOWER_SPEED_GAIN: f32 = 0.01;
    pub const FOLLOWER_MAX_BONUS: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Speed on every serve
    pub const BALL_SERVE_SPEED: f32 = 6.0;
    pub const BALL_MAX_SPEED: f32 = 12.0;
    /// Speed added on each paddle hit
    pub const BALL_SPEED_STEP: f32 = 0.25;
    /// Clearance left between ball and paddle after a bounce
    pub const BALL_PUSH_OUT: f32 = 0.1;

    /// Largest deflection off a paddle end (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Serve angle is drawn from [-SERVE_SPREAD, SERVE_SPREAD] (45 degrees)
    pub const SERVE_SPREAD: f32 = std::f32::consts::FRAC_PI_4;
    /// Pause between a point and the next rally
    pub const SERVE_DELAY_MS: f64 = 600.0;
}
