//! Platform front ends
//!
//! Each front end supplies the game loop's collaborators:
//! - a [`Renderer`](crate::render::Renderer) for the arena
//! - an [`InputSource`](crate::input::InputSource) for paddle keys and close
//! - a way to pace frames (blocking clock natively, animation frames on the web)

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

#[cfg(target_arch = "wasm32")]
pub mod web;
