//! Match state and core simulation types
//!
//! One `GameState` owns both paddles, the ball, the scores and the serve
//! clock. Nothing outside `sim` mutates it except through its methods.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, clamp};
use super::serve::{ServeScheduler, ServeTicket};
use crate::consts::*;

/// Which end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by pointer/keyboard
    Human,
    /// Right paddle, tracks the ball on its own
    Follower,
}

/// Something that happened during a step or serve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a paddle
    PaddleHit { side: Side },
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// A point was won; carries the new totals
    Scored { scorer: Side, human: u32, follower: u32 },
    /// Ball placed at center; `direction` is the horizontal sign
    Served { direction: f32 },
    /// Both scores were zeroed
    ScoresReset,
}

/// A paddle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge (fixed per side)
    pub x: f32,
    /// Top edge, always within [0, PLAYFIELD_HEIGHT - height]
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Movement per step
    pub speed: f32,
    pub score: u32,
}

impl Paddle {
    /// Create a vertically centered paddle for `side`
    pub fn for_side(side: Side) -> Self {
        let (x, speed) = match side {
            Side::Human => (PADDLE_MARGIN, HUMAN_PADDLE_SPEED),
            Side::Follower => (
                PLAYFIELD_WIDTH - PADDLE_WIDTH - PADDLE_MARGIN,
                FOLLOWER_PADDLE_SPEED,
            ),
        };
        Self {
            x,
            y: (PLAYFIELD_HEIGHT - PADDLE_HEIGHT) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed,
            score: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Largest legal `y`
    #[inline]
    pub fn max_y(&self) -> f32 {
        PLAYFIELD_HEIGHT - self.height
    }

    /// Pull `y` back inside the playfield
    pub fn clamp_to_playfield(&mut self) {
        self.y = clamp(self.y, 0.0, self.max_y());
    }
}

/// The ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Displacement per step
    pub vel: Vec2,
    pub radius: f32,
    /// Magnitude of `vel` after every serve and paddle bounce
    pub speed: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed: BALL_SERVE_SPEED,
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub human: Paddle,
    pub follower: Paddle,
    pub ball: Ball,
    /// Simulation runs only while this is set
    pub running: bool,
    /// Seed of the serve-angle RNG
    pub seed: u64,
    rng: Pcg32,
    /// Bumped on every serve; resumes for older generations are ignored
    pub serve_generation: u64,
    resumes: ServeScheduler,
    /// Match clock in milliseconds, advanced by the frame driver
    pub clock_ms: f64,
    /// Number of running steps taken
    pub time_ticks: u64,
    /// Sum of `dt` over running steps (tracked, never used to scale motion)
    pub elapsed_ms: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new match and make the opening serve
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            human: Paddle::for_side(Side::Human),
            follower: Paddle::for_side(Side::Follower),
            ball: Ball::default(),
            running: false,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            serve_generation: 0,
            resumes: ServeScheduler::new(),
            clock_ms: 0.0,
            time_ticks: 0,
            elapsed_ms: 0.0,
            events: Vec::new(),
        };

        state.reset_ball(None);

        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Human => &self.human,
            Side::Follower => &self.follower,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Human => &mut self.human,
            Side::Follower => &mut self.follower,
        }
    }

    /// Scores as (human, follower)
    pub fn scores(&self) -> (u32, u32) {
        (self.human.score, self.follower.score)
    }

    /// Serve from the center and freeze play until the serve delay elapses
    ///
    /// `winner` is the side that just won the point: the ball heads left
    /// after a human point and right otherwise, at a random angle within
    /// the serve spread.
    pub fn reset_ball(&mut self, winner: Option<Side>) -> ServeTicket {
        let direction = if winner == Some(Side::Human) { -1.0 } else { 1.0 };
        let angle = self.rng.random_range(-SERVE_SPREAD..=SERVE_SPREAD);

        self.ball.pos = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0);
        self.ball.speed = BALL_SERVE_SPEED;
        self.ball.vel = Vec2::new(
            direction * self.ball.speed * angle.cos(),
            self.ball.speed * angle.sin(),
        );
        self.running = false;

        self.serve_generation += 1;
        let ticket = ServeTicket {
            generation: self.serve_generation,
        };
        self.resumes.schedule(ticket, self.clock_ms + SERVE_DELAY_MS);
        self.events.push(GameEvent::Served { direction });

        log::info!(
            "Serve #{} toward {} at {:.1} degrees",
            ticket.generation,
            if direction < 0.0 { "human" } else { "follower" },
            angle.to_degrees()
        );

        ticket
    }

    /// Resume play for `ticket`; returns false if a newer serve replaced it
    pub fn resume(&mut self, ticket: ServeTicket) -> bool {
        if ticket.generation != self.serve_generation {
            log::debug!(
                "Ignoring stale resume for serve #{} (current #{})",
                ticket.generation,
                self.serve_generation
            );
            return false;
        }
        self.running = true;
        true
    }

    /// Advance the match clock and fire any serve resumes that came due
    pub fn advance_clock(&mut self, dt_ms: f64) {
        self.clock_ms += dt_ms.max(0.0);
        for ticket in self.resumes.fire_due(self.clock_ms) {
            self.resume(ticket);
        }
    }

    /// Number of resumes still scheduled (stale ones included)
    pub fn pending_resumes(&self) -> usize {
        self.resumes.len()
    }

    /// Zero both scores, re-serve and run immediately
    pub fn start_match(&mut self) {
        self.human.score = 0;
        self.follower.score = 0;
        self.events.push(GameEvent::ScoresReset);
        self.reset_ball(None);
        self.running = true;
        log::info!("Match started");
    }

    /// User activation (click/tap): re-serve if paused, then run
    ///
    /// Returns true if a new serve was made.
    pub fn activate(&mut self) -> bool {
        let served = if !self.running {
            self.reset_ball(None);
            true
        } else {
            false
        };
        self.running = true;
        served
    }

    /// Credit a point to `scorer` and serve again
    pub(crate) fn award_point(&mut self, scorer: Side) {
        self.paddle_mut(scorer).score += 1;
        let (human, follower) = self.scores();
        self.events.push(GameEvent::Scored {
            scorer,
            human,
            follower,
        });
        log::info!("{:?} scores: {} - {}", scorer, human, follower);
        self.reset_ball(Some(scorer));
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(7);
        assert_eq!(state.human.x, 10.0);
        assert_eq!(state.follower.x, PLAYFIELD_WIDTH - PADDLE_WIDTH - 10.0);
        assert_eq!(state.human.y, (PLAYFIELD_HEIGHT - PADDLE_HEIGHT) / 2.0);
        assert_eq!(state.scores(), (0, 0));
        // Opening serve waits for its resume
        assert!(!state.running);
        assert_eq!(state.serve_generation, 1);
        assert_eq!(state.pending_resumes(), 1);
    }

    #[test]
    fn test_reset_ball_direction_and_speed() {
        let mut state = GameState::new(1);
        for _ in 0..50 {
            state.ball.speed = 11.0;
            state.reset_ball(Some(Side::Human));
            assert!(state.ball.vel.x < 0.0);
            assert_eq!(state.ball.speed, BALL_SERVE_SPEED);
            assert!((state.ball.vel.length() - BALL_SERVE_SPEED).abs() < 1e-4);

            state.reset_ball(Some(Side::Follower));
            assert!(state.ball.vel.x > 0.0);

            state.reset_ball(None);
            assert!(state.ball.vel.x > 0.0);
        }
    }

    #[test]
    fn test_serve_angle_within_spread() {
        let mut state = GameState::new(424242);
        for _ in 0..200 {
            state.reset_ball(None);
            let angle = state.ball.vel.y.atan2(state.ball.vel.x.abs());
            assert!(angle.abs() <= SERVE_SPREAD + 1e-5);
            assert_eq!(
                state.ball.pos,
                Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0)
            );
        }
    }

    #[test]
    fn test_serve_resumes_after_delay() {
        let mut state = GameState::new(3);
        state.advance_clock(SERVE_DELAY_MS - 1.0);
        assert!(!state.running);
        state.advance_clock(1.0);
        assert!(state.running);
        assert_eq!(state.pending_resumes(), 0);
    }

    #[test]
    fn test_two_resets_within_delay_keep_newest_pause() {
        let mut state = GameState::new(9);
        state.advance_clock(SERVE_DELAY_MS);
        assert!(state.running);

        state.reset_ball(Some(Side::Human));
        state.advance_clock(300.0);
        state.reset_ball(Some(Side::Follower));
        assert_eq!(state.pending_resumes(), 2);

        // First serve's resume comes due here but is stale
        state.advance_clock(300.0);
        assert!(!state.running);
        assert_eq!(state.pending_resumes(), 1);

        state.advance_clock(299.0);
        assert!(!state.running);
        state.advance_clock(1.0);
        assert!(state.running);
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut state = GameState::new(5);
        let old = ServeTicket {
            generation: state.serve_generation,
        };
        state.reset_ball(None);
        assert!(!state.resume(old));
        assert!(!state.running);
    }

    #[test]
    fn test_start_match_zeroes_and_runs() {
        let mut state = GameState::new(11);
        state.human.score = 4;
        state.follower.score = 2;
        state.drain_events();

        state.start_match();
        assert_eq!(state.scores(), (0, 0));
        assert!(state.running);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::ScoresReset);
        assert!(matches!(events[1], GameEvent::Served { direction } if direction > 0.0));
    }

    #[test]
    fn test_activate_only_serves_when_paused() {
        let mut state = GameState::new(13);
        let generation = state.serve_generation;
        assert!(state.activate());
        assert!(state.running);
        assert_eq!(state.serve_generation, generation + 1);

        assert!(!state.activate());
        assert_eq!(state.serve_generation, generation + 1);
    }

    #[test]
    fn test_same_seed_same_serves() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        for _ in 0..10 {
            a.reset_ball(None);
            b.reset_ball(None);
            assert_eq!(a.ball.vel, b.ball.vel);
        }
    }
}
