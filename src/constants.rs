//! Global constants for the imlabel client

/// Default timeout for every label request, in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 1000;

/// Number of previews per page when navigating to the labeled-images view
pub const DEFAULT_LABELED_PER_PAGE: u32 = 10;

/// Server endpoint paths
pub mod endpoint {
    pub const SAVE: &str = "/save";
    pub const DELETE: &str = "/delete";
    pub const CLEAR_LABELING: &str = "/clear_labeling";
    pub const EDITING_LABELS: &str = "/editing_labels";
    pub const NEXT: &str = "/next";
    pub const LABELED: &str = "/labeled";
}

/// DOM hooks provided by the server-rendered templates
pub mod dom {
    /// Grid container class
    pub const GRID_CLASS: &str = "grid";
    /// Tile class inside the grid
    pub const GRID_ITEM_CLASS: &str = "grid-item";
    /// Selector for the measured content inside a tile
    pub const GRID_ITEM_CONTENT_SELECTOR: &str = ".grid-item-content";
    /// Computed style property holding the implicit row height
    pub const GRID_AUTO_ROWS: &str = "grid-auto-rows";
    /// Computed style property holding the row gap
    pub const GRID_ROW_GAP: &str = "grid-row-gap";
    /// Standard name of the row gap property, used when the legacy one is empty
    pub const ROW_GAP: &str = "row-gap";

    /// Attribute with the label identifier of a checkbox
    pub const DATA_LABEL: &str = "data-label";
    /// Attribute binding an element to an unshifted key
    pub const DATA_KEY: &str = "data-key";
    /// Attribute with the path of the current image
    pub const DATA_PATH: &str = "data-path";
    /// Attribute marking controls that are disabled while a request runs
    pub const DATA_ACTION: &str = "data-action";

    /// Label checkboxes anywhere on the page
    pub const LABEL_CHECKBOX_SELECTOR: &str = "input[type=checkbox]";
    /// Checkboxes inside the labeled-images filter panel
    pub const FILTER_CHECKBOX_SELECTOR: &str = ".selected_labels input[type=checkbox]";
    /// The active image element
    pub const CURRENT_IMAGE_SELECTOR: &str = "img[data-path]";
}
