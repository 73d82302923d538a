//! In-memory page and transport for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::error::RequestError;
use crate::labels::{ImagePath, LabelCheckbox};
use crate::page::{CheckboxScope, Page};
use crate::request::Transport;

/// Something the code under test did to the page or the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Busy(bool),
    Post(String, String),
    Click(String),
    Confirm(String),
    Alert(String),
    Navigate(String),
    Close,
    Back,
    OpenHtml(String),
}

/// Shared, ordered record of [`Event`]s.
pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct MockPage {
    log: EventLog,
    image: Option<ImagePath>,
    labels: Vec<LabelCheckbox>,
    filter: Vec<LabelCheckbox>,
    data_keys: Vec<String>,
    confirm_answer: Cell<bool>,
}

impl MockPage {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            image: None,
            labels: Vec::new(),
            filter: Vec::new(),
            data_keys: Vec::new(),
            confirm_answer: Cell::new(true),
        }
    }

    pub fn with_image(mut self, path: &str) -> Self {
        self.image = Some(ImagePath::new(path));
        self
    }

    pub fn with_labels(mut self, labels: Vec<LabelCheckbox>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_filter(mut self, filter: Vec<LabelCheckbox>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_data_keys(mut self, keys: &[&str]) -> Self {
        self.data_keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn answering(self, answer: bool) -> Self {
        self.confirm_answer.set(answer);
        self
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl Page for MockPage {
    fn current_image(&self) -> Option<ImagePath> {
        self.image.clone()
    }

    fn checkboxes(&self, scope: CheckboxScope) -> Vec<LabelCheckbox> {
        match scope {
            CheckboxScope::Labels => self.labels.clone(),
            CheckboxScope::Filter => self.filter.clone(),
        }
    }

    fn click_key_target(&self, key: &str) -> bool {
        if self.data_keys.iter().any(|k| k == key) {
            self.push(Event::Click(key.to_string()));
            true
        } else {
            false
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.push(Event::Confirm(message.to_string()));
        self.confirm_answer.get()
    }

    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_string()));
    }

    fn navigate(&self, url: &str) {
        self.push(Event::Navigate(url.to_string()));
    }

    fn close(&self) {
        self.push(Event::Close);
    }

    fn history_back(&self) {
        self.push(Event::Back);
    }

    fn open_html(&self, html: &str) {
        self.push(Event::OpenHtml(html.to_string()));
    }

    fn set_busy(&self, busy: bool) {
        self.push(Event::Busy(busy));
    }
}

/// Transport that records requests and answers from a script.
pub struct MockTransport {
    log: EventLog,
    response: String,
    failure: RefCell<Option<RequestError>>,
}

impl MockTransport {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            response: String::new(),
            failure: RefCell::new(None),
        }
    }

    /// Answer every request with `body`.
    pub fn responding(mut self, body: &str) -> Self {
        self.response = body.to_string();
        self
    }

    /// Fail the next request with `error`.
    pub fn failing_with(self, error: RequestError) -> Self {
        *self.failure.borrow_mut() = Some(error);
        self
    }
}

impl Transport for MockTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        body: String,
        _timeout: Duration,
    ) -> Result<String, RequestError> {
        self.log
            .borrow_mut()
            .push(Event::Post(endpoint.to_string(), body));
        match self.failure.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(self.response.clone()),
        }
    }
}
