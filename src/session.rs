//! Frame driver and match control surface
//!
//! A `Session` owns the match state and the pending input. The platform
//! layer calls `frame` once per display refresh and renders afterwards.

use crate::input::InputState;
use crate::sim::{GameEvent, GameState, tick};

/// Where score text goes (the page's two score fields on the web)
pub trait ScoreDisplay {
    fn show_scores(&mut self, human: u32, follower: u32);
}

/// One running match plus the input feeding it
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: InputState,
    last_time: Option<f64>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: InputState::new(),
            last_time: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Input sink for event handlers
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Run one frame at host time `now_ms`
    ///
    /// Advances the serve clock, applies any activation, then steps the
    /// simulation once. Returns the events the frame produced.
    pub fn frame(&mut self, now_ms: f64, display: &mut dyn ScoreDisplay) -> Vec<GameEvent> {
        let dt = match self.last_time {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now_ms);

        self.state.advance_clock(dt);

        if self.input.take_activate() && self.state.activate() {
            log::info!("Serve on activation");
        }

        let input = self.input.take_tick_input(self.state.running);
        tick(&mut self.state, &input, dt);

        self.publish(display)
    }

    /// Zero the scores and serve immediately
    pub fn start_match(&mut self, display: &mut dyn ScoreDisplay) -> Vec<GameEvent> {
        self.state.start_match();
        self.publish(display)
    }

    fn publish(&mut self, display: &mut dyn ScoreDisplay) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        let scores_changed = events
            .iter()
            .any(|e| matches!(e, GameEvent::Scored { .. } | GameEvent::ScoresReset));
        if scores_changed {
            let (human, follower) = self.state.scores();
            display.show_scores(human, follower);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Side;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingDisplay {
        shown: Vec<(u32, u32)>,
    }

    impl ScoreDisplay for RecordingDisplay {
        fn show_scores(&mut self, human: u32, follower: u32) {
            self.shown.push((human, follower));
        }
    }

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Drive frames until `until_ms` host time, starting at `from_ms`
    fn run_frames(
        session: &mut Session,
        display: &mut RecordingDisplay,
        from_ms: f64,
        until_ms: f64,
    ) {
        let mut t = from_ms;
        while t <= until_ms {
            session.frame(t, display);
            t += FRAME_MS;
        }
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut session = Session::new(1);
        let mut display = RecordingDisplay::default();
        session.frame(123_456.0, &mut display);
        assert_eq!(session.state().clock_ms, 0.0);
        assert!(!session.state().running);
    }

    #[test]
    fn test_opening_serve_starts_after_delay() {
        let mut session = Session::new(2);
        let mut display = RecordingDisplay::default();

        session.frame(1000.0, &mut display);
        session.frame(1000.0 + SERVE_DELAY_MS - 10.0, &mut display);
        assert!(!session.state().running);
        let ball = session.state().ball.pos;

        session.frame(1000.0 + SERVE_DELAY_MS, &mut display);
        assert!(session.state().running);
        // The resuming frame also steps the ball
        assert_ne!(session.state().ball.pos, ball);
        assert!(display.shown.is_empty());
    }

    #[test]
    fn test_activation_serves_and_runs() {
        let mut session = Session::new(3);
        let mut display = RecordingDisplay::default();
        session.frame(0.0, &mut display);

        session.input_mut().activate();
        let events = session.frame(FRAME_MS, &mut display);
        assert!(session.state().running);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Served { .. })));
        assert_eq!(session.state().serve_generation, 2);
    }

    #[test]
    fn test_start_match_pushes_zero_scores() {
        let mut session = Session::new(4);
        let mut display = RecordingDisplay::default();
        session.start_match(&mut display);
        assert_eq!(display.shown, vec![(0, 0)]);
        assert!(session.state().running);
    }

    #[test]
    fn test_score_reaches_display() {
        let mut session = Session::new(5);
        let mut display = RecordingDisplay::default();
        session.start_match(&mut display);
        display.shown.clear();

        // Hold the human paddle at the top and let the serve run out left
        session.input_mut().pointer_moved(0.0);
        session.state.ball.vel = Vec2::new(-BALL_SERVE_SPEED, 0.0);

        let mut t = 0.0;
        let mut scored = None;
        for _ in 0..200 {
            let events = session.frame(t, &mut display);
            t += FRAME_MS;
            if let Some(GameEvent::Scored { scorer, .. }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::Scored { .. }))
            {
                scored = Some(*scorer);
                break;
            }
        }

        assert_eq!(scored, Some(Side::Follower));
        assert_eq!(display.shown, vec![(0, 1)]);
        assert!(!session.state().running);
    }

    #[test]
    fn test_pointer_while_paused_applies_on_resume() {
        let mut session = Session::new(6);
        let mut display = RecordingDisplay::default();
        session.frame(0.0, &mut display);
        let start_y = session.state().human.y;

        session.input_mut().pointer_moved(100.0);
        session.frame(FRAME_MS, &mut display);
        assert_eq!(session.state().human.y, start_y);

        run_frames(&mut session, &mut display, 2.0 * FRAME_MS, SERVE_DELAY_MS + 3.0 * FRAME_MS);
        assert!(session.state().running);
        assert_eq!(session.state().human.y, 100.0 - PADDLE_HEIGHT / 2.0);
    }
}
