//! HTTP transport seam.
//!
//! Workflows never talk to sockets directly; they go through [`ApiTransport`]
//! so tests can swap in [`MockTransport`] with canned collections and
//! injected failures.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::Url;
use serde_json::Value;

use crate::config;
use crate::error::ApiError;

/// Read/write access to the scheduling API, decoded to JSON.
pub trait ApiTransport {
    fn get_json(&self, url: Url) -> impl std::future::Future<Output = Result<Value, ApiError>>;
    fn post_json(
        &self,
        url: Url,
        body: &Value,
    ) -> impl std::future::Future<Output = Result<Value, ApiError>>;
}

/// Real transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    async fn decode(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiTransport for HttpTransport {
    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        Self::decode(response).await
    }

    async fn post_json(&self, url: Url, body: &Value) -> Result<Value, ApiError> {
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        Self::decode(response).await
    }
}

/// Mock transport for testing — canned responses keyed by URL substring.
///
/// Routes are matched first-wins against the full request URL. Unmatched
/// GETs return an empty collection; unmatched POSTs echo the body back with
/// an assigned id, the way the mock API server does.
pub struct MockTransport {
    routes: Vec<(String, Value)>,
    failing: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            failing: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, url_part: &str, response: Value) -> Self {
        self.routes.push((url_part.to_string(), response));
        self
    }

    /// Make every request whose URL contains `url_part` fail.
    pub fn fail_on(mut self, url_part: &str) -> Self {
        self.failing.push(url_part.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, url: &Url) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
    }

    fn check_failure(&self, url: &Url) -> Result<(), ApiError> {
        let url = url.to_string();
        if self.failing.iter().any(|part| url.contains(part.as_str())) {
            return Err(ApiError::Connection(url));
        }
        Ok(())
    }

    fn lookup(&self, url: &Url) -> Option<Value> {
        let url = url.to_string();
        self.routes
            .iter()
            .find(|(part, _)| url.contains(part.as_str()))
            .map(|(_, response)| response.clone())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiTransport for MockTransport {
    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        self.record(&url);
        self.check_failure(&url)?;
        Ok(self.lookup(&url).unwrap_or_else(|| Value::Array(Vec::new())))
    }

    async fn post_json(&self, url: Url, body: &Value) -> Result<Value, ApiError> {
        self.record(&url);
        self.check_failure(&url)?;
        Ok(self.lookup(&url).unwrap_or_else(|| {
            let mut created = body.clone();
            if let Value::Object(fields) = &mut created {
                fields.insert("id".into(), Value::from(501));
            }
            created
        }))
    }
}

/// Transport factory with the crate-wide client configuration. All real API
/// access should come through here rather than ad-hoc `reqwest::Client`s.
pub fn default_transport() -> HttpTransport {
    HttpTransport::new()
}

/// Base URL the default transport points at.
pub fn default_base_url() -> String {
    config::api_base_url()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn mock_returns_canned_response_for_matching_route() {
        let transport = MockTransport::new().route("/patients", json!([{"id": 1}]));
        let value = transport
            .get_json(url("http://localhost:3001/patients?q=red"))
            .await
            .unwrap();
        assert_eq!(value, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn mock_defaults_to_empty_collection() {
        let transport = MockTransport::new();
        let value = transport
            .get_json(url("http://localhost:3001/practitioners"))
            .await
            .unwrap();
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn mock_failure_injection() {
        let transport = MockTransport::new().fail_on("/appointments");
        let err = transport
            .get_json(url("http://localhost:3001/appointments"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Connection(_)));
    }

    #[tokio::test]
    async fn mock_records_requests_in_order() {
        let transport = MockTransport::new();
        let _ = transport.get_json(url("http://x/patients")).await;
        let _ = transport.get_json(url("http://x/practitioners")).await;
        assert_eq!(
            transport.requests(),
            vec!["http://x/patients", "http://x/practitioners"],
        );
    }

    #[tokio::test]
    async fn mock_post_echoes_body_with_assigned_id() {
        let transport = MockTransport::new();
        let created = transport
            .post_json(url("http://x/appointments"), &json!({"patient_id": 3}))
            .await
            .unwrap();
        assert_eq!(created["patient_id"], 3);
        assert_eq!(created["id"], 501);
    }
}
