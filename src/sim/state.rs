//! Game state and core simulation types
//!
//! Everything the match needs lives in `GameState`, owned by the game loop
//! and mutated only through `&mut` borrows.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::score::ScoreTracker;
use crate::consts::*;
use crate::render::Color;

/// Which half of the arena a paddle or score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Dot moves, paddles respond to keys
    Running,
    /// A side reached the win score; the frame keeps rendering but nothing advances
    Over,
}

/// The moving dot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dot {
    pub center: IVec2,
    /// Units per frame; only the signs ever change
    pub velocity: IVec2,
    pub radius: i32,
    pub color: Color,
}

impl Default for Dot {
    fn default() -> Self {
        Self {
            center: IVec2::new(DOT_START_X, DOT_START_Y),
            velocity: IVec2::new(DOT_START_VEL_X, DOT_START_VEL_Y),
            radius: DOT_RADIUS,
            color: Color::WHITE,
        }
    }
}

impl Dot {
    /// Move one frame and bounce off the arena walls
    ///
    /// Each axis is handled on its own: after the move, the velocity on that
    /// axis flips if the dot touches the near wall, and flips (again) if it
    /// touches the far wall. The position is left where it landed, so a fast
    /// dot can sit partly outside the arena until the next frame.
    pub fn advance(&mut self, arena: IVec2) {
        for axis in 0..2 {
            self.center[axis] += self.velocity[axis];
            if self.center[axis] <= self.radius {
                self.velocity[axis] = -self.velocity[axis];
            }
            if self.center[axis] + self.radius >= arena[axis] {
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
}

impl Paddle {
    /// Paddle at its starting position for the given side
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => LEFT_PADDLE_OFFSET,
            Side::Right => ARENA_WIDTH - RIGHT_PADDLE_OFFSET,
        };
        Self {
            side,
            rect: Rect::new(x, PADDLE_START_TOP, PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// One step toward the top wall, stopping at it
    pub fn move_up_step(&mut self) {
        self.rect.set_top(self.rect.top() - PADDLE_STEP);
        if self.rect.top() < 0 {
            self.rect.set_top(0);
        }
    }

    /// One step toward the bottom wall, stopping at it
    pub fn move_down_step(&mut self, arena_height: i32) {
        self.rect.set_bottom(self.rect.bottom() + PADDLE_STEP);
        if self.rect.bottom() > arena_height {
            self.rect.set_bottom(arena_height);
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Arena extent (width, height)
    pub arena: IVec2,
    pub dot: Dot,
    pub left: Paddle,
    pub right: Paddle,
    pub score: ScoreTracker,
    pub phase: GamePhase,
    /// Set by a close signal; the loop exits once the current frame finishes
    pub close_requested: bool,
    /// Frames fully processed so far
    pub frame: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh match with everything at its starting position
    pub fn new() -> Self {
        Self {
            arena: crate::arena_size(),
            dot: Dot::default(),
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            score: ScoreTracker::new(WIN_SCORE),
            phase: GamePhase::Running,
            close_requested: false,
            frame: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
