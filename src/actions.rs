//! Label actions: save, delete, clear and the navigation around them.
//!
//! Every action reads what it needs from the [`Page`] at call time, sends at
//! most one request through the [`Transport`] and reports failures with the
//! operation's alert. Confirmation-gated actions do nothing at all when the
//! user declines.

use std::cell::Cell;
use std::time::Duration;

use serde::Serialize;

use crate::config::{ClientConfig, Endpoints, Messages};
use crate::error::RequestError;
use crate::labels::{ImagePath, LabelFilter, LabelSet};
use crate::page::{CheckboxScope, Page};
use crate::request::{self, PathRequest, SaveRequest, Transport};

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran to the end
    Completed,
    /// The user declined the confirmation; nothing was sent
    Declined,
    /// The request failed (the user was told where the action does that)
    Failed,
    /// Another request was still running; nothing was sent
    Busy,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        *self == Outcome::Completed
    }
}

/// Marks the page busy for the lifetime of one request.
struct BusyGuard<'a, P: Page> {
    page: &'a P,
    flag: &'a Cell<bool>,
}

impl<'a, P: Page> BusyGuard<'a, P> {
    fn acquire(page: &'a P, flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        page.set_busy(true);
        Some(Self { page, flag })
    }
}

impl<P: Page> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.flag.set(false);
        self.page.set_busy(false);
    }
}

/// The label actions of one page view.
pub struct LabelActions<P, T> {
    page: P,
    transport: T,
    endpoints: Endpoints,
    messages: Messages,
    timeout: Duration,
    labeled_per_page: u32,
    in_flight: Cell<bool>,
}

impl<P: Page, T: Transport> LabelActions<P, T> {
    pub fn new(page: P, transport: T, config: &ClientConfig) -> Self {
        Self {
            page,
            transport,
            endpoints: config.endpoints.clone(),
            messages: config.messages.clone(),
            timeout: config.request_timeout(),
            labeled_per_page: config.labeled_per_page,
            in_flight: Cell::new(false),
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Whether a request is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    async fn send<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<String, RequestError> {
        let Some(_guard) = BusyGuard::acquire(&self.page, &self.in_flight) else {
            return Err(RequestError::Busy);
        };
        request::post(&self.transport, endpoint, body, self.timeout).await
    }

    /// Save the checked labels for the current image.
    ///
    /// Returns true when the server accepted them. On failure the user gets
    /// the save alert, unless the request was dropped because another one
    /// was still running.
    pub async fn save(&self) -> bool {
        let Some(path) = self.page.current_image() else {
            log::warn!("No image with a data-path on this page, nothing to save");
            self.page.alert(&self.messages.save_failed);
            return false;
        };
        let classes = LabelSet::from_checkboxes(&self.page.checkboxes(CheckboxScope::Labels));
        let body = SaveRequest {
            path: &path,
            classes: &classes,
        };

        match self.send(&self.endpoints.save, &body).await {
            Ok(_) => {
                log::info!("Saved {} label(s) for {}", classes.len(), path);
                true
            }
            Err(RequestError::Busy) => {
                log::debug!("Save of {} skipped: request in flight", path);
                false
            }
            Err(e) => {
                log::warn!("Saving labels for {} failed: {}", path, e);
                self.page.alert(&self.messages.save_failed);
                false
            }
        }
    }

    /// Save, then tell the user it worked. The window stays open.
    pub async fn save_with_notice(&self) -> Outcome {
        if self.save().await {
            self.page.alert(&self.messages.saved);
            Outcome::Completed
        } else {
            Outcome::Failed
        }
    }

    /// Save, then close the window if the save went through.
    pub async fn save_and_close(&self) -> Outcome {
        if self.save().await {
            self.close_window()
        } else {
            Outcome::Failed
        }
    }

    /// Save, then move on to the next unlabeled image if the save went
    /// through.
    pub async fn next_image(&self) -> Outcome {
        if self.save().await {
            self.skip_image()
        } else {
            Outcome::Failed
        }
    }

    /// Ask, then delete the current image and move on to the next one.
    pub async fn delete_image(&self) -> Outcome {
        self.confirmed_request(
            &self.messages.confirm_delete,
            &self.endpoints.delete,
            &self.messages.delete_failed,
            || self.skip_image(),
        )
        .await
    }

    /// Ask, then drop the labeling of the current image and close the window.
    pub async fn clear_labeling(&self) -> Outcome {
        self.confirmed_request(
            &self.messages.confirm_clear,
            &self.endpoints.clear_labeling,
            &self.messages.clear_failed,
            || self.close_window(),
        )
        .await
    }

    async fn confirmed_request(
        &self,
        question: &str,
        endpoint: &str,
        failure: &str,
        on_success: impl FnOnce() -> Outcome,
    ) -> Outcome {
        if self.is_busy() {
            log::debug!("{} skipped: request in flight", endpoint);
            return Outcome::Busy;
        }
        if !self.page.confirm(question) {
            log::debug!("{} declined by user", endpoint);
            return Outcome::Declined;
        }
        let Some(path) = self.page.current_image() else {
            log::warn!("No image with a data-path on this page");
            self.page.alert(failure);
            return Outcome::Failed;
        };

        match self.send(endpoint, &PathRequest { path: &path }).await {
            Ok(_) => {
                log::info!("{} succeeded for {}", endpoint, path);
                on_success()
            }
            Err(RequestError::Busy) => Outcome::Busy,
            Err(e) => {
                log::warn!("{} failed for {}: {}", endpoint, path, e);
                self.page.alert(failure);
                Outcome::Failed
            }
        }
    }

    /// Fetch the label editor for `path` and open it in a new window.
    ///
    /// A failed request is only logged.
    pub async fn edit_labels(&self, path: &ImagePath) -> Outcome {
        match self
            .send(&self.endpoints.editing_labels, &PathRequest { path })
            .await
        {
            Ok(html) => {
                self.page.open_html(&html);
                Outcome::Completed
            }
            Err(RequestError::Busy) => Outcome::Busy,
            Err(e) => {
                log::warn!("Opening the label editor for {} failed: {}", path, e);
                Outcome::Failed
            }
        }
    }

    /// Run `action` unless a request is in flight.
    fn when_idle(&self, name: &str, action: impl FnOnce()) -> Outcome {
        if self.is_busy() {
            log::debug!("{} skipped: request in flight", name);
            return Outcome::Busy;
        }
        action();
        Outcome::Completed
    }

    /// Reload the labeled-images view filtered by the checked filter labels.
    pub fn update_page(&self) -> Outcome {
        self.when_idle("update_page", || {
            let labels = LabelSet::from_checkboxes(&self.page.checkboxes(CheckboxScope::Filter));
            let url =
                LabelFilter::new(labels, self.labeled_per_page).url(&self.endpoints.labeled);
            log::info!("Opening {}", url);
            self.page.navigate(&url);
        })
    }

    /// Go to the next unlabeled image without saving.
    pub fn skip_image(&self) -> Outcome {
        self.when_idle("skip_image", || self.page.navigate(&self.endpoints.next))
    }

    pub fn go_back(&self) -> Outcome {
        self.when_idle("go_back", || self.page.history_back())
    }

    pub fn close_window(&self) -> Outcome {
        self.when_idle("close_window", || self.page.close())
    }
}
