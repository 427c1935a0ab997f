//! Blocking HTTP client for the quoting service
//!
//! Implements [`QuoteSource`] over the service's REST endpoints. Every
//! call carries the bearer token, a bounded timeout and a fixed retry
//! budget with backoff; once the budget is spent the call surfaces as a
//! single [`SourceError`]. Client errors (4xx) are never retried.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::core::source::{QuoteSource, SourceError, SourceResult};
use crate::entities::material::{InputMaterial, MaterialDetails, VendorRecord};
use crate::entities::part::{PartLineItem, RoutingRef};
use crate::entities::quote::QuoteSummary;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Fixed retry budget with linear backoff between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn with_attempts(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            ..Self::default()
        }
    }
}

/// One call attempt's failure, split by whether retrying can help.
enum CallError {
    Transient(String),
    Permanent(String),
}

/// Quoting service client. Holds the credential for the life of the run.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Build)?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http,
            base_url,
            token: token.into(),
            retry,
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> SourceResult<T> {
        self.call(Method::GET, path, None)
    }

    fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> SourceResult<T> {
        self.call(Method::POST, path, body)
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> SourceResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut last = String::new();

        for attempt in 1..=self.retry.attempts {
            let mut request = self
                .http
                .request(method.clone(), &url)
                .bearer_auth(&self.token);
            if let Some(ref body) = body {
                request = request.json(body);
            }

            match dispatch(request, &url) {
                Ok(value) => return Ok(value),
                Err(CallError::Permanent(message)) => {
                    return Err(SourceError {
                        attempts: attempt,
                        message,
                    });
                }
                Err(CallError::Transient(message)) => {
                    last = message;
                    if attempt < self.retry.attempts {
                        thread::sleep(self.retry.base_delay * attempt);
                    }
                }
            }
        }

        Err(SourceError {
            attempts: self.retry.attempts,
            message: last,
        })
    }
}

fn dispatch<T: DeserializeOwned>(request: RequestBuilder, url: &str) -> Result<T, CallError> {
    let response = request
        .send()
        .map_err(|e| CallError::Transient(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let message = format!("HTTP {status} from {url}");
        // Retrying a client error just repeats the same rejection.
        return if status.is_server_error() || status.as_u16() == 429 {
            Err(CallError::Transient(message))
        } else {
            Err(CallError::Permanent(message))
        };
    }

    response
        .json::<T>()
        .map_err(|e| CallError::Permanent(format!("bad response body from {url}: {e}")))
}

impl QuoteSource for ApiClient {
    fn find_quotes_by_number(&self, number: u32) -> SourceResult<Vec<QuoteSummary>> {
        self.post("quotes/list", Some(json!({ "numbers": [number] })))
    }

    fn list_parts(&self, quote_id: &str) -> SourceResult<Vec<PartLineItem>> {
        self.post(&format!("quotes/{quote_id}/part-line-items/list"), None)
    }

    fn list_routing_ids(&self, quote_id: &str, part_id: &str) -> SourceResult<Vec<String>> {
        let refs: Vec<RoutingRef> = self.get(&format!(
            "quotes/{quote_id}/part-line-items/{part_id}/make-summary"
        ))?;
        Ok(refs.into_iter().map(|r| r.routing_id).collect())
    }

    fn list_input_materials(
        &self,
        quote_id: &str,
        part_id: &str,
        routing_id: &str,
    ) -> SourceResult<Vec<InputMaterial>> {
        self.post(
            &format!(
                "quotes/{quote_id}/part-line-items/{part_id}/routing/{routing_id}/input-materials/list"
            ),
            None,
        )
    }

    fn vendor_name(&self, vendor_id: &str) -> SourceResult<String> {
        let vendor: VendorRecord = self.get(&format!("vendors/{vendor_id}"))?;
        Ok(vendor.name)
    }

    fn material_details(&self, material_id: &str) -> SourceResult<MaterialDetails> {
        let mut records: Vec<MaterialDetails> =
            self.post("materials/list", Some(json!({ "ids": [material_id] })))?;
        if records.is_empty() {
            return Err(SourceError {
                attempts: 1,
                message: format!("material {material_id} not found"),
            });
        }
        Ok(records.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(
            "https://example.com/api/",
            "tok",
            Duration::from_secs(5),
            RetryPolicy::default(),
        )
        .unwrap();

        assert_eq!(client.base_url, "https://example.com/api");
    }

    #[test]
    fn test_retry_policy_floor() {
        assert_eq!(RetryPolicy::with_attempts(0).attempts, 1);
        assert_eq!(RetryPolicy::with_attempts(5).attempts, 5);
    }
}
