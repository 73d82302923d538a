//! DOM event wiring: the page's key listener and the grid reflow triggers.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, Window};

use super::grid::DomGrid;
use super::page::query_all;
use crate::constants::dom;
use crate::grid::{reflow_all, reflow_tile};
use crate::input::InputHandler;
use crate::keybindings::{KeyAction, KeyPress, Modifiers};
use crate::page::Page;
use crate::request::Transport;

/// The single `keydown` listener of a page view.
///
/// Dropping it removes the listener from the document.
pub struct KeyListener {
    document: Document,
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyListener {
    pub fn install<P, T>(document: &Document, handler: Rc<InputHandler<P, T>>) -> Result<Self, JsValue>
    where
        P: Page + 'static,
        T: Transport + 'static,
    {
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let press = KeyPress::new(
                event.key(),
                Modifiers {
                    shift: event.shift_key(),
                    ctrl: event.ctrl_key(),
                    alt: event.alt_key(),
                    meta: event.meta_key(),
                },
            );

            // Shift+letter would otherwise also type into a focused field
            if matches!(handler.bindings().resolve(&press), KeyAction::Shortcut(_)) {
                event.prevent_default();
            }

            let handler = Rc::clone(&handler);
            wasm_bindgen_futures::spawn_local(async move {
                handler.handle_key(&press).await;
            });
        });

        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        log::debug!("Key listener installed");
        Ok(Self {
            document: document.clone(),
            closure,
        })
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
    }
}

/// Reflow the grid now and whenever the window resizes, the page finishes
/// loading, or a tile's image loads.
///
/// Does nothing on pages without a grid.
pub fn install_grid_reflow(window: &Window) -> Result<(), JsValue> {
    let Some(grid) = DomGrid::find(window) else {
        log::debug!("No grid on this page");
        return Ok(());
    };

    reflow_all(&grid);

    for event in ["load", "resize"] {
        let grid = grid.clone();
        let on_layout = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            reflow_all(&grid);
        });
        window.add_event_listener_with_callback(event, on_layout.as_ref().unchecked_ref())?;
        on_layout.forget(); // Lives as long as the page
    }

    let Some(document) = window.document() else {
        return Ok(());
    };
    let tile_selector = format!(".{}", dom::GRID_ITEM_CLASS);
    for image in query_all(&document, &format!("{} img", tile_selector)) {
        let Some(tile) = image
            .closest(&tile_selector)
            .ok()
            .flatten()
            .and_then(|tile| tile.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        let grid = grid.clone();
        let on_image_load = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            reflow_tile(&grid, &tile);
        });
        image.add_event_listener_with_callback("load", on_image_load.as_ref().unchecked_ref())?;
        on_image_load.forget(); // Lives as long as the image
    }

    Ok(())
}
