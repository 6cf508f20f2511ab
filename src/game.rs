//! The game loop
//!
//! One frame, in this exact order:
//! 1. drain input (close always counts, paddle keys only while running)
//! 2. draw and present
//! 3. paddle collisions, 4. scoring (both on the dot as drawn)
//! 5. while running: advance the dot, then check for the end of the match
//! 6. wait for the next frame (in [`GameLoop::run`])
//!
//! The loop exits after the frame in which a close was requested, whether or
//! not the match finished.

use serde::Serialize;

use crate::clock::FrameClock;
use crate::consts::TARGET_FPS;
use crate::error::Result;
use crate::input::InputSource;
use crate::render::{Renderer, draw_frame};
use crate::sim::{self, FrameEvents, GamePhase, GameState, Side};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub left_score: u32,
    pub right_score: u32,
    /// Side that reached the win score, if the match got that far
    pub winner: Option<Side>,
    pub frames: u64,
}

impl MatchSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            left_score: state.score.left,
            right_score: state.score.right,
            winner: match state.phase {
                GamePhase::Over => state.score.winner(),
                GamePhase::Running => None,
            },
            frames: state.frame,
        }
    }

    pub fn finished(&self) -> bool {
        self.winner.is_some()
    }
}

/// Owns the match state and the front end that shows it
pub struct GameLoop<R, I> {
    state: GameState,
    renderer: R,
    input: I,
}

impl<R: Renderer, I: InputSource> GameLoop<R, I> {
    pub fn new(renderer: R, input: I) -> Self {
        Self::with_state(GameState::new(), renderer, input)
    }

    /// Start from an arbitrary state (tests, demos)
    pub fn with_state(state: GameState, renderer: R, input: I) -> Self {
        Self {
            state,
            renderer,
            input,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Whether a close request has been seen
    pub fn should_close(&self) -> bool {
        self.state.close_requested
    }

    /// Run one frame without waiting
    pub fn frame(&mut self) -> Result<FrameEvents> {
        let events = self.input.poll_events()?;
        sim::handle_events(&mut self.state, &events);
        draw_frame(&self.state, &mut self.renderer)?;
        Ok(sim::step(&mut self.state))
    }

    /// Run frames at the target rate until a close is requested
    pub fn run<C: FrameClock>(mut self, clock: &mut C) -> Result<MatchSummary> {
        log::info!("Match started");
        while !self.state.close_requested {
            self.frame()?;
            clock.tick(TARGET_FPS);
        }
        let summary = MatchSummary::from_state(&self.state);
        log::info!(
            "Closed after {} frames at {} - {}",
            summary.frames,
            summary.left_score,
            summary.right_score
        );
        Ok(summary)
    }

    /// Split the loop back into its parts
    pub fn into_parts(self) -> (GameState, R, I) {
        (self.state, self.renderer, self.input)
    }
}
