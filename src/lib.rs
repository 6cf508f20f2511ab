//! Pong - two paddles, one dot, first to eleven
//!
//! Core modules:
//! - `sim`: Deterministic simulation (dot physics, paddles, collisions, scoring)
//! - `game`: Frame sequencing around the simulation and its collaborators
//! - `render`, `input`, `clock`: Contracts the game loop expects from a front end
//! - `platform`: Terminal (native) and canvas (browser) front ends
//! - `settings`: Front-end preferences

pub mod clock;
pub mod error;
pub mod game;
pub mod input;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use game::{GameLoop, MatchSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the game loop
    pub const TARGET_FPS: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: i32 = 500;
    pub const ARENA_HEIGHT: i32 = 400;

    /// Dot defaults
    pub const DOT_START_X: i32 = 250;
    pub const DOT_START_Y: i32 = 200;
    pub const DOT_START_VEL_X: i32 = 5;
    pub const DOT_START_VEL_Y: i32 = 3;
    pub const DOT_RADIUS: i32 = 10;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 10;
    pub const PADDLE_HEIGHT: i32 = 70;
    pub const PADDLE_START_TOP: i32 = 165;
    /// Left paddle's left edge, measured from the left wall
    pub const LEFT_PADDLE_OFFSET: i32 = 50;
    /// Right paddle's left edge, measured from the right wall
    pub const RIGHT_PADDLE_OFFSET: i32 = 60;
    /// Distance a paddle travels per key press
    pub const PADDLE_STEP: i32 = 10;

    /// First score to reach this ends the match
    pub const WIN_SCORE: u32 = 11;

    /// Key repeat defaults (milliseconds)
    pub const KEY_REPEAT_DELAY_MS: u32 = 20;
    pub const KEY_REPEAT_INTERVAL_MS: u32 = 20;
}

/// Arena size as a vector, for per-axis checks
#[inline]
pub fn arena_size() -> glam::IVec2 {
    glam::IVec2::new(consts::ARENA_WIDTH, consts::ARENA_HEIGHT)
}
