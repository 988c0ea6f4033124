//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Each test starts the storefront router on an ephemeral local port with
//! the default configuration and talks to it over HTTP with a cookie-aware
//! client, so cart and wishlist state carries across requests the same way
//! it does in a browser.

use std::net::SocketAddr;

use rust_decimal::Decimal;
use serde_json::Value;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::state::AppState;

/// A running storefront and a client holding one shopper session.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new() -> Self {
        let config = StorefrontConfig::from_lookup(&|_| None).expect("default config is valid");
        Self::with_config(config).await
    }

    /// Start a storefront with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn with_config(config: StorefrontConfig) -> Self {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = shopfront_storefront::app(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second shopper with its own session against the same server.
    #[must_use]
    pub fn other_shopper(&self) -> Self {
        Self {
            client: new_client(),
            base_url: self.base_url.clone(),
        }
    }

    /// GET a path and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        decode(resp).await
    }

    /// Send a JSON body with the given method and decode the JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> (reqwest::StatusCode, Value) {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await.expect("request failed");
        decode(resp).await
    }
}

fn new_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

async fn decode(resp: reqwest::Response) -> (reqwest::StatusCode, Value) {
    let status = resp.status();
    let body = resp.json().await.expect("response body is not JSON");
    (status, body)
}

/// Read an exact decimal amount from a JSON string field.
///
/// # Panics
///
/// Panics if the value is not a decimal string.
#[must_use]
pub fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a decimal string: {value}"))
}
