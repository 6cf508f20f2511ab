//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, integer units per frame
//! - No randomness
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Deflection, deflect, leading_edge, paddle_hit, resolve_paddle_collision};
pub use rect::Rect;
pub use score::{ScoreTracker, Scored};
pub use state::{Dot, GamePhase, GameState, Paddle, Side};
pub use tick::{FrameEvents, apply_command, handle_events, step};
