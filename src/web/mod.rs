//! Browser bindings (WASM only).

mod grid;
mod listener;
mod page;
mod transport;

pub use grid::DomGrid;
pub use listener::{KeyListener, install_grid_reflow};
pub use page::DomPage;
pub use transport::FetchTransport;
