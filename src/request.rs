//! Request bodies and the transport that carries them to the server.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::error::RequestError;
use crate::labels::{ImagePath, LabelSet};

/// Body of a save request: the image and the labels chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveRequest<'a> {
    pub path: &'a ImagePath,
    pub classes: &'a LabelSet,
}

/// Body of requests that only name the image (delete, clear, edit).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRequest<'a> {
    pub path: &'a ImagePath,
}

/// Sends JSON bodies to the labeling server.
///
/// Implementations must give up once `timeout` has passed and report
/// [`RequestError::Timeout`]. The returned string is the response body.
pub trait Transport {
    fn post_json(
        &self,
        endpoint: &str,
        body: String,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, RequestError>>;
}

/// Serialize `body` and post it through `transport`.
pub async fn post<T, B>(
    transport: &T,
    endpoint: &str,
    body: &B,
    timeout: Duration,
) -> Result<String, RequestError>
where
    T: Transport,
    B: Serialize,
{
    let json = serde_json::to_string(body)?;
    let started = web_time::Instant::now();
    let result = transport.post_json(endpoint, json, timeout).await;
    log::debug!(
        "POST {} finished in {:?} ({})",
        endpoint,
        started.elapsed(),
        if result.is_ok() { "ok" } else { "failed" }
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_body() {
        let path = ImagePath::new("/img/1.png");
        let classes: LabelSet = ["cat".to_string(), "dog".to_string()].into_iter().collect();
        let body = SaveRequest {
            path: &path,
            classes: &classes,
        };

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"path":"/img/1.png","classes":["cat","dog"]}"#
        );
    }

    #[test]
    fn test_save_request_with_no_labels() {
        let path = ImagePath::new("a.jpg");
        let classes = LabelSet::new();
        let body = SaveRequest {
            path: &path,
            classes: &classes,
        };

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"path":"a.jpg","classes":[]}"#
        );
    }

    #[test]
    fn test_path_request_body() {
        let path = ImagePath::new("sub/dir/b.png");
        assert_eq!(
            serde_json::to_string(&PathRequest { path: &path }).unwrap(),
            r#"{"path":"sub/dir/b.png"}"#
        );
    }
}
