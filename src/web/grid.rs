//! [`GridSurface`] for the `.grid` container of the preview pages.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

use crate::constants::dom;
use crate::grid::{GridMetrics, GridSurface};

#[derive(Debug, Clone)]
pub struct DomGrid {
    window: Window,
    container: Element,
}

impl DomGrid {
    /// Find the first grid container of the document.
    pub fn find(window: &Window) -> Option<Self> {
        let container = window
            .document()?
            .get_elements_by_class_name(dom::GRID_CLASS)
            .item(0)?;
        Some(Self {
            window: window.clone(),
            container,
        })
    }

    fn style_value(&self, property: &str) -> Option<String> {
        let style = self.window.get_computed_style(&self.container).ok()??;
        style
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }
}

impl GridSurface for DomGrid {
    type Tile = HtmlElement;

    fn metrics(&self) -> GridMetrics {
        let row_height = self.style_value(dom::GRID_AUTO_ROWS).unwrap_or_default();
        let row_gap = self
            .style_value(dom::GRID_ROW_GAP)
            .or_else(|| self.style_value(dom::ROW_GAP))
            .unwrap_or_default();
        GridMetrics::from_css(&row_height, &row_gap)
    }

    fn tiles(&self) -> Vec<HtmlElement> {
        let items = self
            .container
            .get_elements_by_class_name(dom::GRID_ITEM_CLASS);
        (0..items.length())
            .filter_map(|i| items.item(i))
            .filter_map(|item| item.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn content_height(&self, tile: &HtmlElement) -> f64 {
        match tile.query_selector(dom::GRID_ITEM_CONTENT_SELECTOR) {
            Ok(Some(content)) => content.get_bounding_client_rect().height(),
            _ => {
                log::warn!("Grid tile without {}", dom::GRID_ITEM_CONTENT_SELECTOR);
                0.0
            }
        }
    }

    fn set_row_span(&self, tile: &HtmlElement, span: u32) {
        if let Err(e) = tile
            .style()
            .set_property("grid-row-end", &format!("span {}", span))
        {
            log::warn!("Failed to set grid-row-end: {:?}", e);
        }
    }
}
