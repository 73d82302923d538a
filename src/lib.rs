//! imlabel - browser client of the image labeling service
//!
//! Keyboard shortcuts, checkbox label selection, save/delete/clear requests
//! for the current image, and masonry reflow of the preview grid. The core
//! is platform neutral; the `web` module binds it to the DOM when built for
//! WebAssembly.

pub mod actions;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod input;
pub mod keybindings;
pub mod labels;
pub mod logging;
pub mod page;
pub mod request;

#[cfg(test)]
mod testing;

pub use actions::{LabelActions, Outcome};
pub use config::ClientConfig;
pub use error::RequestError;
pub use input::InputHandler;
pub use keybindings::{KeyAction, KeyBindings, KeyPress, Shortcut};

// Browser bindings and WASM entry point
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
