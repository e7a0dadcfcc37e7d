use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::errors::{extract_error_message, ApiError};
use crate::core::config::Settings;
use crate::nav::{Navigator, Route};
use crate::session::SessionStore;

/// Thin HTTP facade over the EduQuiz backend: one resolved base address,
/// automatic bearer attachment from the session store, and the process-wide
/// 401 policy (clear session, force `/login`) applied to every response.
#[derive(Clone)]
pub(crate) struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
    navigator: Navigator,
}

impl ApiClient {
    pub(crate) fn from_settings(
        settings: &Settings,
        session: SessionStore,
        navigator: Navigator,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(settings.api().connect_timeout())
            .timeout(settings.api().request_timeout())
            .build()?;

        Ok(Self::new(http, settings.api().base_url.clone(), session, navigator))
    }

    pub(crate) fn new(
        http: Client,
        base_url: String,
        session: SessionStore,
        navigator: Navigator,
    ) -> Self {
        Self { http, base_url, session, navigator }
    }

    pub(crate) fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.execute(Method::GET, path, None).await?;
        decode(value)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::Decode(format!("invalid request body: {err}")))?;
        let value = self.execute(Method::POST, path, Some(body)).await?;
        decode(value)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        let payload = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&raw).unwrap_or(Value::Null)
        };

        if status == StatusCode::UNAUTHORIZED {
            // Cross-cutting policy: the session is gone no matter which call
            // tripped it. The caller still gets the error for its own
            // handling.
            tracing::warn!(%method, path, "Backend rejected credentials; clearing session");
            self.session.clear();
            self.navigator.force(Route::Login);
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = extract_error_message(&payload);
            tracing::debug!(%method, path, status = status.as_u16(), message, "Request failed");
            return Err(ApiError::Api { status: status.as_u16(), message });
        }

        Ok(payload)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}
