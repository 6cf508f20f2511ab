//! Browser front end (canvas 2D)
//!
//! Expects a `<canvas id="canvas">` on the page. Keyboard listeners feed a
//! queue the game loop drains once per frame; `requestAnimationFrame` drives
//! the loop through a [`FrameThrottle`] so fast displays still run at the
//! target rate.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::IVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, Window};

use crate::clock::FrameThrottle;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, TARGET_FPS};
use crate::error::{Error, Result};
use crate::game::{GameLoop, MatchSummary};
use crate::input::{Command, InputEvent, InputSource, KeyRepeat};
use crate::render::{Color, Renderer, TextAnchor};
use crate::settings::Settings;
use crate::sim::Rect;

const CANVAS_ID: &str = "canvas";
const SCORE_FONT_PX: f64 = 48.0;

fn js_err(value: JsValue) -> Error {
    Error::Platform(format!("{value:?}"))
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Platform("no window".to_string()))
}

/// Milliseconds on the page's monotonic clock
fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Size the arena canvas and grab its 2D context
    pub fn attach(document: &Document) -> Result<Self> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| Error::Platform(format!("no #{CANVAS_ID} element")))?
            .dyn_into()
            .map_err(|_| Error::Platform(format!("#{CANVAS_ID} is not a canvas")))?;
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| Error::Platform("2d context unavailable".to_string()))?
            .dyn_into()
            .map_err(|_| Error::Platform("unexpected context type".to_string()))?;

        Ok(Self {
            ctx,
            width: f64::from(ARENA_WIDTH),
            height: f64::from(ARENA_HEIGHT),
        })
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, center: IVec2, radius: i32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color, background: Color) {
        self.ctx.set_font(&format!("{SCORE_FONT_PX}px sans-serif"));
        self.ctx.set_text_baseline("top");
        self.ctx.set_text_align("left");
        let width = self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
        let x = match anchor {
            TextAnchor::TopLeft => 0.0,
            TextAnchor::TopRight => self.width - width,
        };

        self.ctx.set_fill_style_str(&background.to_css());
        self.ctx.fill_rect(x, 0.0, width, SCORE_FONT_PX);
        self.ctx.set_fill_style_str(&color.to_css());
        if let Err(e) = self.ctx.fill_text(text, x, 0.0) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn present(&mut self) -> Result<()> {
        // The browser composites the canvas when the frame callback returns
        Ok(())
    }
}

/// Keyboard input gathered by DOM listeners
pub struct WebInput {
    window: Window,
    queue: Rc<RefCell<VecDeque<InputEvent>>>,
    repeat: Rc<RefCell<KeyRepeat>>,
}

impl WebInput {
    /// Register keyboard and page listeners on `window`
    pub fn listen(window: &Window, settings: &Settings) -> Result<Self> {
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let repeat = Rc::new(RefCell::new(KeyRepeat::new(
            settings.key_repeat_delay_ms,
            settings.key_repeat_interval_ms,
        )));

        // Key down
        {
            let queue = queue.clone();
            let repeat = repeat.clone();
            let win = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "Escape" {
                    queue.borrow_mut().push_back(InputEvent::Close);
                    return;
                }
                let Some(command) = key_command(&key) else {
                    return;
                };
                event.prevent_default();
                // Browser auto-repeat is replaced by KeyRepeat
                if event.repeat() {
                    return;
                }
                if repeat.borrow_mut().press(command, now_ms(&win)) {
                    queue.borrow_mut().push_back(InputEvent::KeyPressed(command));
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Key up
        {
            let repeat = repeat.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(command) = key_command(&event.key()) {
                    repeat.borrow_mut().release(command);
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Focus lost - key ups will never arrive
        {
            let repeat = repeat.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                repeat.borrow_mut().release_all();
            });
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Page going away
        {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                queue.borrow_mut().push_back(InputEvent::Close);
            });
            window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        Ok(Self {
            window: window.clone(),
            queue,
            repeat,
        })
    }
}

/// Paddle command for a `KeyboardEvent.key` value
fn key_command(key: &str) -> Option<Command> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Command::from_key(c),
        _ => None,
    }
}

impl InputSource for WebInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events: Vec<InputEvent> = self.queue.borrow_mut().drain(..).collect();
        let due = self.repeat.borrow_mut().due(now_ms(&self.window));
        events.extend(due.into_iter().map(InputEvent::KeyPressed));
        Ok(events)
    }
}

struct WebGame {
    game: GameLoop<CanvasRenderer, WebInput>,
    throttle: FrameThrottle,
}

impl WebGame {
    /// Handle one animation frame; false once the loop should stop
    fn on_animation_frame(&mut self, time: f64) -> bool {
        if !self.throttle.ready(time) {
            return true;
        }
        if let Err(e) = self.game.frame() {
            log::error!("Frame failed: {}", e);
            return false;
        }
        if self.game.should_close() {
            let summary = MatchSummary::from_state(self.game.state());
            log::info!(
                "Closed after {} frames at {} - {}",
                summary.frames,
                summary.left_score,
                summary.right_score
            );
            return false;
        }
        true
    }
}

/// Set up the page and start the animation loop
pub fn start() -> Result<()> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| Error::Platform("no document".to_string()))?;

    let settings = Settings::load();
    let renderer = CanvasRenderer::attach(&document)?;
    let input = WebInput::listen(&window, &settings)?;

    let game = Rc::new(RefCell::new(WebGame {
        game: GameLoop::new(renderer, input),
        throttle: FrameThrottle::new(TARGET_FPS),
    }));
    log::info!("Match started");
    request_animation_frame(game)
}

fn request_animation_frame(game: Rc<RefCell<WebGame>>) -> Result<()> {
    let window = window()?;
    let closure = Closure::once(move |time: f64| {
        let keep_going = game.borrow_mut().on_animation_frame(time);
        if keep_going {
            if let Err(e) = request_animation_frame(game) {
                log::error!("Could not schedule next frame: {}", e);
            }
        }
    });
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}
