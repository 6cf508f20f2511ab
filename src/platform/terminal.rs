//! Terminal front end (crossterm + ratatui)
//!
//! The arena is drawn on a braille canvas scaled to the terminal, with the
//! scores on the top row. Canvas y grows upward, so every y is flipped
//! against the arena height on the way out.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::supports_keyboard_enhancement;
use glam::IVec2;
use ratatui::layout::Alignment;
use ratatui::style::{Color as TermColor, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::{DefaultTerminal, Frame};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::Result;
use crate::input::{Command, InputEvent, InputSource, KeyRepeat};
use crate::render::{Color, DisplayList, DrawCommand, Renderer, TextAnchor};
use crate::settings::Settings;
use crate::sim::Rect;

/// Take over the terminal and build both collaborators
///
/// The terminal is handed back to the shell when the renderer is dropped.
pub fn init(settings: &Settings) -> Result<(TerminalRenderer, TerminalInput)> {
    let terminal = ratatui::try_init()?;
    let renderer = TerminalRenderer {
        terminal,
        list: DisplayList::new(),
    };

    // Key release events let us run our own repeat; without them we take
    // whatever auto-repeat the terminal sends.
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        log::info!(
            "Key repeat: {} ms delay, {} ms interval",
            settings.key_repeat_delay_ms,
            settings.key_repeat_interval_ms
        );
    } else {
        log::info!("Terminal reports no key releases, using its auto-repeat");
    }

    let input = TerminalInput {
        repeat: enhanced.then(|| {
            KeyRepeat::new(settings.key_repeat_delay_ms, settings.key_repeat_interval_ms)
        }),
        started: Instant::now(),
    };
    Ok((renderer, input))
}

pub struct TerminalRenderer {
    terminal: DefaultTerminal,
    list: DisplayList,
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self, color: Color) {
        self.list.clear(color);
    }

    fn fill_circle(&mut self, center: IVec2, radius: i32, color: Color) {
        self.list.fill_circle(center, radius, color);
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color, background: Color) {
        self.list.draw_text(text, anchor, color, background);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.list.fill_rect(rect, color);
    }

    fn present(&mut self) -> Result<()> {
        let commands = self.list.take_frame();
        self.terminal.draw(|frame| draw_commands(frame, &commands))?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(e) = ratatui::try_restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

/// Arena y (down) to canvas y (up)
fn flip_y(y: i32) -> f64 {
    f64::from(ARENA_HEIGHT - y)
}

fn draw_commands(frame: &mut Frame, commands: &[DrawCommand]) {
    let area = frame.area();
    let background = match commands.first() {
        Some(DrawCommand::Clear(color)) => term_color(*color),
        _ => TermColor::Reset,
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds([0.0, f64::from(ARENA_WIDTH)])
        .y_bounds([0.0, f64::from(ARENA_HEIGHT)])
        .paint(|ctx| {
            for command in commands {
                match command {
                    DrawCommand::Circle {
                        center,
                        radius,
                        color,
                    } => ctx.draw(&Circle {
                        x: f64::from(center.x),
                        y: flip_y(center.y),
                        radius: f64::from(*radius),
                        color: term_color(*color),
                    }),
                    // Canvas rectangles are outlines; fill with one line per column
                    DrawCommand::Rect { rect, color } => {
                        for x in rect.left()..rect.right() {
                            ctx.draw(&CanvasLine {
                                x1: f64::from(x),
                                y1: flip_y(rect.top()),
                                x2: f64::from(x),
                                y2: flip_y(rect.bottom()),
                                color: term_color(*color),
                            });
                        }
                    }
                    DrawCommand::Clear(_) | DrawCommand::Text { .. } => {}
                }
            }
        });
    frame.render_widget(canvas, area);

    let top_row = ratatui::layout::Rect {
        height: area.height.min(1),
        ..area
    };
    for command in commands {
        if let DrawCommand::Text {
            text,
            anchor,
            color,
            background,
        } = command
        {
            let alignment = match anchor {
                TextAnchor::TopLeft => Alignment::Left,
                TextAnchor::TopRight => Alignment::Right,
            };
            let style = Style::default().fg(term_color(*color)).bg(term_color(*background));
            let label = Paragraph::new(Line::styled(text.as_str(), style)).alignment(alignment);
            frame.render_widget(label, top_row);
        }
    }
}

pub struct TerminalInput {
    /// Present when the terminal reports key releases
    repeat: Option<KeyRepeat>,
    started: Instant,
}

impl TerminalInput {
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn on_key(&mut self, key: KeyEvent, events: &mut Vec<InputEvent>) {
        let is_ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || is_ctrl_c {
            if key.kind == KeyEventKind::Press {
                events.push(InputEvent::Close);
            }
            return;
        }

        let KeyCode::Char(c) = key.code else {
            return;
        };
        let Some(command) = Command::from_key(c) else {
            return;
        };

        let now = self.now_ms();
        match (key.kind, self.repeat.as_mut()) {
            (KeyEventKind::Press, Some(repeat)) => {
                if repeat.press(command, now) {
                    events.push(InputEvent::KeyPressed(command));
                }
            }
            (KeyEventKind::Release, Some(repeat)) => repeat.release(command),
            // We synthesize our own repeats
            (KeyEventKind::Repeat, Some(_)) => {}
            (KeyEventKind::Press | KeyEventKind::Repeat, None) => {
                events.push(InputEvent::KeyPressed(command));
            }
            (KeyEventKind::Release, None) => {}
        }
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.on_key(key, &mut events),
                Event::FocusLost => {
                    if let Some(repeat) = self.repeat.as_mut() {
                        repeat.release_all();
                    }
                }
                _ => {}
            }
        }

        let now = self.now_ms();
        if let Some(repeat) = self.repeat.as_mut() {
            events.extend(repeat.due(now).into_iter().map(InputEvent::KeyPressed));
        }
        Ok(events)
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.repeat.is_some() {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }
}
