//! [`Transport`] over the browser `fetch` API.
//!
//! Each request gets its own `AbortController`; a timer aborts it when the
//! timeout expires so the awaiting action resolves to a failure instead of
//! hanging.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response, Window};

use crate::error::RequestError;
use crate::request::Transport;

#[derive(Debug, Clone)]
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn js_error(value: JsValue) -> RequestError {
    RequestError::Network(format!("{:?}", value))
}

impl Transport for FetchTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        body: String,
        timeout: Duration,
    ) -> Result<String, RequestError> {
        let controller = AbortController::new().map_err(js_error)?;
        let signal = controller.signal();

        let headers = Headers::new().map_err(js_error)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        init.set_signal(Some(&signal));
        let request = Request::new_with_str_and_init(endpoint, &init).map_err(js_error)?;

        let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        // Dropping the timer cancels it
        let _timer = Timeout::new(timeout_ms, move || controller.abort());

        let failed = |value: JsValue| {
            if signal.aborted() {
                RequestError::Timeout {
                    endpoint: endpoint.to_string(),
                    timeout_ms: u64::from(timeout_ms),
                }
            } else {
                js_error(value)
            }
        };

        let response: Response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(&failed)?
            .dyn_into()
            .map_err(js_error)?;

        if !response.ok() {
            return Err(RequestError::Status(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(&failed)?;
        Ok(text.as_string().unwrap_or_default())
    }
}
