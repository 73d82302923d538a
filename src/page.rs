//! The page the label actions run against.
//!
//! [`Page`] is everything the actions need from the browser: reading the
//! checkbox state and the current image, modal dialogs, and navigation.
//! `crate::web::DomPage` implements it on top of `web_sys`.

use crate::labels::{ImagePath, LabelCheckbox};

/// Which checkboxes to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxScope {
    /// Every checkbox with a `data-label` on the page
    Labels,
    /// Only the checkboxes of the labeled-images filter panel
    Filter,
}

/// Browser-side collaborator of the label actions.
pub trait Page {
    /// Path of the image shown on this page, if there is one.
    fn current_image(&self) -> Option<ImagePath>;

    /// Checkbox states in document order.
    fn checkboxes(&self, scope: CheckboxScope) -> Vec<LabelCheckbox>;

    /// Click the element bound to `key` through its `data-key` attribute.
    /// Returns false when no element carries that key.
    fn click_key_target(&self, key: &str) -> bool;

    /// Ask the user to confirm. Returns true when accepted.
    fn confirm(&self, message: &str) -> bool;

    /// Show a blocking message to the user.
    fn alert(&self, message: &str);

    /// Load `url` in the current window.
    fn navigate(&self, url: &str);

    /// Close the current window.
    fn close(&self);

    /// Go one step back in the session history.
    fn history_back(&self);

    /// Open a new window and write `html` into it.
    fn open_html(&self, html: &str);

    /// Enable or disable the action controls while a request runs.
    fn set_busy(&self, busy: bool);
}
