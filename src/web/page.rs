//! [`Page`] on top of the browser DOM.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use crate::constants::dom;
use crate::labels::{ImagePath, LabelCheckbox};
use crate::page::{CheckboxScope, Page};

/// The document of the current browser window.
#[derive(Debug, Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    /// Bind to the current window. Returns None outside a browser window.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        query_all(&self.document, selector)
    }
}

/// All elements matching `selector` in `root`, in document order.
pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("Invalid selector {:?}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Quote `value` for use inside a double-quoted CSS attribute selector.
pub(crate) fn css_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl Page for DomPage {
    fn current_image(&self) -> Option<ImagePath> {
        self.query(dom::CURRENT_IMAGE_SELECTOR)?
            .get_attribute(dom::DATA_PATH)
            .map(ImagePath::new)
    }

    fn checkboxes(&self, scope: CheckboxScope) -> Vec<LabelCheckbox> {
        let selector = match scope {
            CheckboxScope::Labels => dom::LABEL_CHECKBOX_SELECTOR,
            CheckboxScope::Filter => dom::FILTER_CHECKBOX_SELECTOR,
        };
        self.query_all(selector)
            .into_iter()
            .filter_map(|element| {
                let label = element.get_attribute(dom::DATA_LABEL)?;
                let input = element.dyn_into::<HtmlInputElement>().ok()?;
                Some(LabelCheckbox::new(label, input.checked()))
            })
            .collect()
    }

    fn click_key_target(&self, key: &str) -> bool {
        let selector = format!("[{}={}]", dom::DATA_KEY, css_string(key));
        match self
            .query(&selector)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            Some(element) => {
                element.click();
                true
            }
            None => false,
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert() failed: {:?}", e);
        }
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.open_with_url_and_target(url, "_self") {
            log::error!("Failed to open {}: {:?}", url, e);
        }
    }

    fn close(&self) {
        if let Err(e) = self.window.close() {
            log::error!("Failed to close window: {:?}", e);
        }
    }

    fn history_back(&self) {
        if let Err(e) = self.window.history().and_then(|history| history.back()) {
            log::error!("history.back() failed: {:?}", e);
        }
    }

    fn open_html(&self, html: &str) {
        let opened = self
            .window
            .open_with_url_and_target("about:blank", "_blank")
            .ok()
            .flatten()
            .and_then(|window| window.document());
        let Some(document) = opened else {
            log::warn!("Could not open a new window (blocked popup?)");
            return;
        };

        let text = js_sys::Array::of1(&html.into());
        if let Err(e) = document.write(&text).and_then(|()| document.close()) {
            log::error!("Failed to write into new window: {:?}", e);
        }
    }

    fn set_busy(&self, busy: bool) {
        let selector = format!("[{}]", dom::DATA_ACTION);
        for control in self.query_all(&selector) {
            let result = if busy {
                control.set_attribute("disabled", "")
            } else {
                control.remove_attribute("disabled")
            };
            if let Err(e) = result {
                log::warn!("Failed to toggle control: {:?}", e);
            }
        }
    }
}
