//! Pong entry point
//!
//! Native builds play in the terminal; wasm builds draw on a page canvas
//! (run with `trunk serve`).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    log::info!("Pong starting...");
    if let Err(e) = pong::platform::web::start() {
        log::error!("Pong failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use pong::clock::FixedRateClock;
    use pong::platform::terminal;
    use pong::{GameLoop, Settings};

    env_logger::init();
    log::info!("Pong (native) starting...");

    let settings = Settings::load();
    let (renderer, input) = terminal::init(&settings).context("failed to set up the terminal")?;

    // The terminal is restored when `run` drops the renderer
    let summary = GameLoop::new(renderer, input).run(&mut FixedRateClock::new())?;
    log::info!("Summary: {}", serde_json::to_string(&summary)?);

    match summary.winner {
        Some(side) => println!(
            "{} player wins, {} - {}",
            side.as_str(),
            summary.left_score,
            summary.right_score
        ),
        None => println!(
            "Match left unfinished at {} - {}",
            summary.left_score, summary.right_score
        ),
    }
    Ok(())
}
