//! HTTP implementation of the authentication backend.

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde_json::Value;

use stockroom_auth::{AuthBackend, AuthResponse, Credentials, Registration};
use stockroom_core::{ClientError, ClientResult};

use crate::http::{ApiClient, body_text, decode_json};

/// Talks to `endpoints/login.php` and `endpoints/register.php`.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    api: ApiClient,
}

impl HttpAuthBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let request = self.api.request(Method::POST, "login.php").json(credentials);
        auth_response(self.api.send(request).await?).await
    }

    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        let request = self
            .api
            .request(Method::POST, "register.php")
            .json(registration);
        auth_response(self.api.send(request).await?).await
    }
}

async fn auth_response(response: Response) -> ClientResult<AuthResponse> {
    let status = response.status();
    if !status.is_success() {
        let body = body_text(response).await;
        return Err(ClientError::auth(status.as_u16(), error_message(&body)));
    }
    decode_json(response).await
}

/// The backend reports failures as `{"message": "..."}`; fall back to the raw
/// body for anything else.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_string())
}
