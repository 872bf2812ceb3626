//! Thin reqwest wrapper shared by the item and auth endpoints.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use stockroom_core::{ClientError, ClientResult};

/// HTTP client bound to one API base URL.
///
/// Every request carries `Content-Type: application/json`. Cloning is cheap
/// (the connection pool is shared).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/endpoints/{script}`.
    pub fn endpoint(&self, script: &str) -> String {
        format!("{}/endpoints/{}", self.base_url, script)
    }

    pub(crate) fn request(&self, method: Method, script: &str) -> RequestBuilder {
        tracing::debug!(%method, endpoint = script, "issuing request");
        self.http.request(method, self.endpoint(script))
    }

    /// Send `request`; only transport failures are errors here.
    pub(crate) async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        request
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))
    }
}

pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| ClientError::decode(e.to_string()))
}

pub(crate) async fn body_text(response: Response) -> String {
    response.text().await.unwrap_or_default()
}
