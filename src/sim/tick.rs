//! Per-frame simulation step
//!
//! The game loop calls [`handle_events`] before drawing and [`step`] after,
//! so collisions and scoring always see the dot where it was drawn.

use super::collision::resolve_paddle_collision;
use super::score::Scored;
use super::state::{GamePhase, GameState, Side};
use crate::input::{Command, InputEvent};

/// What happened during one [`step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// Paddle that turned the dot around
    pub paddle_hit: Option<Side>,
    pub scored: Scored,
    /// The match ended on this frame
    pub match_ended: bool,
}

/// Apply one frame's worth of input, oldest event first
///
/// A close request is always honored. Paddle commands only count while the
/// match is running.
pub fn handle_events(state: &mut GameState, events: &[InputEvent]) {
    for event in events {
        match *event {
            InputEvent::Close => {
                if !state.close_requested {
                    log::info!("Close requested at frame {}", state.frame);
                }
                state.close_requested = true;
            }
            InputEvent::KeyPressed(command) if state.is_running() => {
                apply_command(state, command);
            }
            InputEvent::KeyPressed(_) => {}
        }
    }
}

/// Move a paddle one step
pub fn apply_command(state: &mut GameState, command: Command) {
    let arena_height = state.arena.y;
    let paddle = state.paddle_mut(command.side());
    if command.is_up() {
        paddle.move_up_step();
    } else {
        paddle.move_down_step(arena_height);
    }
}

/// Collide, score, then (while running) advance and check for the end
pub fn step(state: &mut GameState) -> FrameEvents {
    let mut events = FrameEvents {
        paddle_hit: resolve_paddle_collision(&mut state.dot, &state.left.rect, &state.right.rect),
        ..Default::default()
    };
    if let Some(side) = events.paddle_hit {
        log::debug!("Dot hit {} paddle at {:?}", side.as_str(), state.dot.center);
    }

    events.scored = state
        .score
        .update(state.dot.center, state.dot.radius, state.arena.x);
    if events.scored.any() {
        log::debug!(
            "Score {} - {} (frame {})",
            state.score.left,
            state.score.right,
            state.frame
        );
    }

    if state.is_running() {
        state.dot.advance(state.arena);
        if state.score.is_match_over() {
            state.phase = GamePhase::Over;
            events.match_ended = true;
            log::info!(
                "Match over: {} - {} after {} frames",
                state.score.left,
                state.score.right,
                state.frame + 1
            );
        }
    }

    state.frame += 1;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_step_moves_dot_while_running() {
        let mut state = GameState::new();
        let events = step(&mut state);
        assert_eq!(events, FrameEvents::default());
        assert_eq!(state.dot.center, IVec2::new(255, 203));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_score_uses_position_before_advance() {
        let mut state = GameState::new();
        state.dot.center = IVec2::new(10, 100);
        state.dot.velocity = IVec2::new(5, 3);
        let events = step(&mut state);
        assert!(events.scored.right);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.dot.center, IVec2::new(15, 103));
    }

    #[test]
    fn test_collision_happens_before_advance() {
        let mut state = GameState::new();
        state.dot.center = IVec2::new(60, 200);
        state.dot.velocity = IVec2::new(-5, 3);
        let events = step(&mut state);
        assert_eq!(events.paddle_hit, Some(Side::Left));
        assert_eq!(state.dot.center, IVec2::new(65, 203));
    }

    #[test]
    fn test_reaching_win_score_ends_match() {
        let mut state = GameState::new();
        state.score.left = 10;
        state.dot.center = IVec2::new(490, 200);
        let events = step(&mut state);
        assert!(events.match_ended);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.score.winner(), Some(Side::Left));
    }

    #[test]
    fn test_over_freezes_dot_but_still_scores() {
        let mut state = GameState::new();
        state.phase = GamePhase::Over;
        state.dot.center = IVec2::new(4, 50);
        state.dot.velocity = IVec2::new(5, 3);
        for _ in 0..3 {
            let events = step(&mut state);
            assert!(!events.match_ended);
        }
        assert_eq!(state.dot.center, IVec2::new(4, 50));
        assert_eq!(state.score.right, 3);
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_keys_ignored_after_match_over() {
        let mut state = GameState::new();
        state.phase = GamePhase::Over;
        handle_events(
            &mut state,
            &[InputEvent::KeyPressed(Command::LeftUp), InputEvent::Close],
        );
        assert_eq!(state.left.rect.top(), 165);
        assert!(state.close_requested);
    }

    #[test]
    fn test_events_apply_in_order() {
        let mut state = GameState::new();
        handle_events(
            &mut state,
            &[
                InputEvent::KeyPressed(Command::RightUp),
                InputEvent::KeyPressed(Command::RightUp),
                InputEvent::KeyPressed(Command::LeftDown),
            ],
        );
        assert_eq!(state.right.rect.top(), 145);
        assert_eq!(state.left.rect.top(), 175);
        assert!(!state.close_requested);
    }
}
