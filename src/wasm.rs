use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::actions::LabelActions;
use crate::config::ClientConfig;
use crate::grid::reflow_all;
use crate::input::InputHandler;
use crate::labels::ImagePath;
use crate::logging;
use crate::web::{DomGrid, DomPage, FetchTransport, KeyListener, install_grid_reflow};

type Client = InputHandler<DomPage, FetchTransport>;

thread_local! {
    /// Input handler of this page view, shared with the exported functions
    static CLIENT: RefCell<Option<Rc<Client>>> = const { RefCell::new(None) };
    /// The page's only key listener
    static KEY_LISTENER: RefCell<Option<KeyListener>> = const { RefCell::new(None) };
}

fn client() -> Option<Rc<Client>> {
    let client = CLIENT.with(|client| client.borrow().clone());
    if client.is_none() {
        log::warn!("imlabel is not initialized on this page");
    }
    client
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::load_from_local_storage().unwrap_or_default();
    logging::init(config.log_level);

    if let Err(e) = install(&config) {
        log::error!("Failed to initialize imlabel: {:?}", e);
    }
}

fn install(config: &ClientConfig) -> Result<(), JsValue> {
    let page = DomPage::new().ok_or_else(|| JsValue::from_str("no window or document"))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = page.document().clone();

    let actions = LabelActions::new(page, FetchTransport::new(window.clone()), config);
    let handler = Rc::new(InputHandler::new(config.keybindings.clone(), actions));

    // Replacing the old listener drops it, which unregisters it
    let listener = KeyListener::install(&document, Rc::clone(&handler))?;
    KEY_LISTENER.with(|slot| *slot.borrow_mut() = Some(listener));
    CLIENT.with(|slot| *slot.borrow_mut() = Some(handler));

    install_grid_reflow(&window)?;
    log::info!("imlabel ready");
    Ok(())
}

/// Save the checked labels. Resolves to true on success.
#[wasm_bindgen(js_name = saveImage)]
pub async fn save_image() -> bool {
    match client() {
        Some(client) => client.actions().save().await,
        None => false,
    }
}

#[wasm_bindgen(js_name = nextImage)]
pub async fn next_image() {
    if let Some(client) = client() {
        client.actions().next_image().await;
    }
}

#[wasm_bindgen(js_name = saveAndClose)]
pub async fn save_and_close() {
    if let Some(client) = client() {
        client.actions().save_and_close().await;
    }
}

#[wasm_bindgen(js_name = deleteImage)]
pub async fn delete_image() {
    if let Some(client) = client() {
        client.actions().delete_image().await;
    }
}

#[wasm_bindgen(js_name = clearLabeling)]
pub async fn clear_labeling() {
    if let Some(client) = client() {
        client.actions().clear_labeling().await;
    }
}

/// Open the label editor of the image at `path` in a new window.
#[wasm_bindgen(js_name = editLabels)]
pub async fn edit_labels(path: String) {
    if let Some(client) = client() {
        client.actions().edit_labels(&ImagePath::new(path)).await;
    }
}

#[wasm_bindgen(js_name = skipImage)]
pub fn skip_image() {
    if let Some(client) = client() {
        client.actions().skip_image();
    }
}

#[wasm_bindgen(js_name = goBack)]
pub fn go_back() {
    if let Some(client) = client() {
        client.actions().go_back();
    }
}

#[wasm_bindgen(js_name = closeWindow)]
pub fn close_window() {
    if let Some(client) = client() {
        client.actions().close_window();
    }
}

/// Reload the labeled-images view with the labels checked in the filter.
#[wasm_bindgen(js_name = updatePage)]
pub fn update_page() {
    if let Some(client) = client() {
        client.actions().update_page();
    }
}

/// Recompute the row span of every grid tile.
#[wasm_bindgen(js_name = resizeAllGridItems)]
pub fn resize_all_grid_items() {
    if let Some(grid) = web_sys::window().and_then(|window| DomGrid::find(&window)) {
        reflow_all(&grid);
    }
}
