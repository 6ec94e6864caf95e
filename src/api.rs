// API client module: a small blocking HTTP client that talks to the
// link-shortening service. It only moves bytes; deciding what a status
// code means is left to `response`.

use crate::config::Config;
use crate::request::AliasRequest;
use crate::response::Outcome;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use tracing::{debug, warn};

/// Sends one alias request and reports what came back. Implemented by
/// [`ApiClient`] and by scripted fakes in tests.
pub trait Dispatch {
    fn dispatch(&self, request: &AliasRequest) -> Outcome;
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn dispatch(&self, request: &AliasRequest) -> Outcome {
        (**self).dispatch(request)
    }
}

/// Holds a reqwest blocking client and the base URL of the service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, request: &AliasRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

impl Dispatch for ApiClient {
    fn dispatch(&self, request: &AliasRequest) -> Outcome {
        let url = self.endpoint(request);
        let method = request.method();
        debug!(%method, %url, "sending alias request");

        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = request.body() {
            req = req.json(&body);
        }

        let res = match req.send() {
            Ok(res) => res,
            Err(e) => {
                warn!(%method, %url, error = %e, "request failed before a response arrived");
                return Outcome::Transport(e.to_string());
            }
        };
        let status = res.status().as_u16();
        // A body that cannot be read is treated as empty; the status is
        // still meaningful on its own.
        let body = res.text().unwrap_or_default();
        debug!(%method, %url, status, "response received");
        Outcome::Response { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base_url: &str) -> ApiClient {
        let config = Config {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(1),
            copy_feedback: Duration::from_millis(1000),
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn endpoints_join_base_and_path() {
        let api = client("http://localhost:8080");
        let rename = AliasRequest::rename("old", "new").unwrap();
        assert_eq!(api.endpoint(&rename), "http://localhost:8080/url/old");
        let resolve = AliasRequest::resolve("abc123").unwrap();
        assert_eq!(api.endpoint(&resolve), "http://localhost:8080/abc123");
    }

    #[test]
    fn unreachable_service_is_a_transport_failure() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let api = client("http://127.0.0.1:9");
        let request = AliasRequest::delete("gone").unwrap();
        assert!(matches!(api.dispatch(&request), Outcome::Transport(_)));
    }
}
