//! Label selection state read from the page.

use serde::{Deserialize, Serialize};

/// Path of the image the current page is about.
///
/// Taken from the `data-path` attribute of the displayed image and sent
/// unchanged with every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePath(String);

impl ImagePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl std::fmt::Display for ImagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of one label checkbox as rendered on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCheckbox {
    /// Value of the `data-label` attribute
    pub label: String,
    /// Whether the box is ticked
    pub checked: bool,
}

impl LabelCheckbox {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

/// Labels selected for an image, in document order.
///
/// Built fresh from the checkboxes on every save. Entries are kept exactly
/// as the page has them, so duplicated checkboxes produce duplicated labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the labels of all checked boxes.
    pub fn from_checkboxes<'a>(boxes: impl IntoIterator<Item = &'a LabelCheckbox>) -> Self {
        Self(
            boxes
                .into_iter()
                .filter(|b| b.checked)
                .map(|b| b.label.clone())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for LabelSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Labels picked in the filter panel of the labeled-images preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFilter {
    labels: LabelSet,
    per_page: u32,
}

impl LabelFilter {
    pub fn new(labels: LabelSet, per_page: u32) -> Self {
        Self { labels, per_page }
    }

    /// URL of the labeled-images view at `base`, restricted to the selected
    /// labels.
    ///
    /// Labels are joined with commas; with no label selected the `labels`
    /// parameter is left out and every labeled image is listed.
    pub fn url(&self, base: &str) -> String {
        let mut url = format!("{}?perpage={}", base, self.per_page);
        if !self.labels.is_empty() {
            url.push_str("&labels=");
            url.push_str(&self.labels.iter().collect::<Vec<_>>().join(","));
        }
        url
    }
}
