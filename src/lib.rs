//! Folio - portfolio site runtime
//!
//! Project image galleries in a lightbox, plus the page effects around them
//! (typewriter hero, scroll reveals, navbar auto-hide, video autoplay).
//! The browser build wires everything to the DOM; the native build offers a
//! terminal walkthrough of the same gallery logic.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod events;
pub mod gallery;
pub mod keybindings;
pub mod surface;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(test)]
mod test_utils;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_effects;
#[cfg(target_arch = "wasm32")]
mod wasm_surface;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
