//! Drawing contract between the game loop and a front end
//!
//! The loop issues a fixed sequence of commands per frame: clear, dot, both
//! scores, both paddles, present. Front ends that cannot draw immediately
//! (the terminal) record the commands in a [`DisplayList`] and replay them
//! on `present`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::{Dot, GameState, Paddle, Rect};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation (`#rrggbb`)
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::BLACK;
    pub const SCORE_TEXT: Color = Color::WHITE;
    pub const PADDLE: Color = Color::WHITE;
}

/// Where a text label is pinned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Left-aligned against the top-left corner
    TopLeft,
    /// Right-aligned against the top-right corner
    TopRight,
}

/// A front end's drawing surface
pub trait Renderer {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn fill_circle(&mut self, center: IVec2, radius: i32, color: Color);
    /// Draw `text` with `background` painted behind the glyphs
    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color, background: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Make everything drawn since the last `clear` visible
    fn present(&mut self) -> Result<()>;
}

/// Things that know how to put themselves on a [`Renderer`]
pub trait Draw {
    fn draw(&self, renderer: &mut dyn Renderer);
}

impl Draw for Dot {
    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.fill_circle(self.center, self.radius, self.color);
    }
}

impl Draw for Paddle {
    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.fill_rect(self.rect, colors::PADDLE);
    }
}

/// Draw one complete frame and present it
pub fn draw_frame(state: &GameState, renderer: &mut dyn Renderer) -> Result<()> {
    renderer.clear(colors::BACKGROUND);
    state.dot.draw(renderer);
    renderer.draw_text(
        &state.score.left.to_string(),
        TextAnchor::TopLeft,
        colors::SCORE_TEXT,
        colors::BACKGROUND,
    );
    renderer.draw_text(
        &state.score.right.to_string(),
        TextAnchor::TopRight,
        colors::SCORE_TEXT,
        colors::BACKGROUND,
    );
    state.left.draw(renderer);
    state.right.draw(renderer);
    renderer.present()
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: IVec2,
        radius: i32,
        color: Color,
    },
    Text {
        text: String,
        anchor: TextAnchor,
        color: Color,
        background: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
}

/// Renderer that records commands instead of drawing them
///
/// `present` moves the pending commands into `presented`, so after a frame
/// `presented` holds exactly what that frame drew.
#[derive(Debug, Default)]
pub struct DisplayList {
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames: u64,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the most recently presented frame
    pub fn presented(&self) -> &[DrawCommand] {
        &self.presented
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Finish the current frame and hand back its commands
    pub fn take_frame(&mut self) -> Vec<DrawCommand> {
        self.frames += 1;
        std::mem::take(&mut self.pending)
    }
}

impl Renderer for DisplayList {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: IVec2, radius: i32, color: Color) {
        self.pending.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color, background: Color) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            color,
            background,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.pending.push(DrawCommand::Rect { rect, color });
    }

    fn present(&mut self) -> Result<()> {
        self.presented = self.take_frame();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_draw_order() {
        let state = GameState::new();
        let mut list = DisplayList::new();
        draw_frame(&state, &mut list).unwrap();

        let frame = list.presented();
        assert_eq!(frame.len(), 6);
        assert_eq!(frame[0], DrawCommand::Clear(Color::BLACK));
        assert_eq!(
            frame[1],
            DrawCommand::Circle {
                center: IVec2::new(250, 200),
                radius: 10,
                color: Color::WHITE,
            }
        );
        assert!(matches!(
            &frame[2],
            DrawCommand::Text { text, anchor: TextAnchor::TopLeft, background: Color::BLACK, .. } if text == "0"
        ));
        assert!(matches!(
            &frame[3],
            DrawCommand::Text { anchor: TextAnchor::TopRight, .. }
        ));
        assert_eq!(
            frame[4],
            DrawCommand::Rect {
                rect: Rect::new(50, 165, 10, 70),
                color: Color::WHITE,
            }
        );
        assert_eq!(
            frame[5],
            DrawCommand::Rect {
                rect: Rect::new(440, 165, 10, 70),
                color: Color::WHITE,
            }
        );
        assert_eq!(list.frames(), 1);
    }

    #[test]
    fn test_clear_discards_unpresented_commands() {
        let mut list = DisplayList::new();
        list.fill_circle(IVec2::ZERO, 3, Color::WHITE);
        list.clear(Color::BLACK);
        list.present().unwrap();
        assert_eq!(list.presented(), &[DrawCommand::Clear(Color::BLACK)]);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
    }
}
