//! Backend HTTP client.
//!
//! `ApiClient::fetch` is the single path every backend call goes through. It
//! attaches the JSON content type and the bearer token, refuses to call
//! protected endpoints without a token, clears the session when the backend
//! rejects it, and turns every non-success outcome into a [`ClientError`].

use padelbook_common::http::{is_json_response, JSON_MEDIA_TYPE};
use padelbook_common::{backend_rejected, client_for, ClientError, SessionStore};
use padelbook_config::ApiConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Endpoints that may be called without a session token.
pub const PUBLIC_ENDPOINTS: [&str; 2] = ["/login", "/register"];

/// Fields the backend may use for a human-readable error, in lookup order.
const ERROR_MESSAGE_FIELDS: [&str; 3] = ["error", "message", "msg"];

pub fn is_public_endpoint(endpoint: &str) -> bool {
    PUBLIC_ENDPOINTS.contains(&endpoint)
}

/// Client for the booking backend's REST surface.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let http = client_for(config).map_err(|err| {
            ClientError::Unreachable(format!("failed to build HTTP client: {err}"))
        })?;
        Ok(Self::with_http_client(http, &config.base_url, session))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_http_client(
        http: Client,
        base_url: &str,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token storage this client reads and clears.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Sends a request and returns the parsed response body.
    ///
    /// Non-JSON responses yield an empty object. Errors:
    /// * [`ClientError::Unauthenticated`] - protected endpoint and no token; nothing is sent.
    /// * [`ClientError::SessionExpired`] - 401 from a protected endpoint; the token is cleared.
    /// * [`ClientError::BackendRejected`] - any other non-success status.
    /// * [`ClientError::Unreachable`] - no response at all.
    pub async fn fetch<B>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let is_public = is_public_endpoint(endpoint);
        let token = self.session.token();

        if !is_public && token.is_none() {
            warn!(endpoint, "request suppressed: no session token");
            return Err(ClientError::Unauthenticated {
                endpoint: endpoint.to_string(),
            });
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE);
        if let Some(token) = &token {
            request = request.bearer_auth(token.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, endpoint, "sending request");
        let response = request.send().await.map_err(|err| {
            error!(endpoint, error = %err, "backend unreachable");
            ClientError::Unreachable(err.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED && !is_public {
            warn!(endpoint, "session rejected by backend, clearing token");
            self.session.clear();
            return Err(ClientError::SessionExpired);
        }

        let data = if is_json_response(response.headers()) {
            response
                .json::<Value>()
                .await
                .map_err(|err| ClientError::Decode(err.to_string()))?
        } else {
            Value::Object(Map::new())
        };

        if !status.is_success() {
            let message = rejection_message(status, &data);
            warn!(endpoint, status = status.as_u16(), %message, "backend rejected request");
            return Err(backend_rejected(status.as_u16(), message));
        }

        Ok(data)
    }

    /// GET without a body.
    pub async fn get(&self, endpoint: &str) -> Result<Value, ClientError> {
        self.fetch::<()>(endpoint, Method::GET, None).await
    }

    /// POST with a JSON body.
    pub async fn post<B>(&self, endpoint: &str, body: &B) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.fetch(endpoint, Method::POST, Some(body)).await
    }
}

/// The backend's own message when it sent one, else "<status> <reason>".
pub fn rejection_message(status: StatusCode, data: &Value) -> String {
    ERROR_MESSAGE_FIELDS
        .iter()
        .find_map(|field| data.get(field).and_then(Value::as_str))
        .map(str::to_owned)
        .unwrap_or_else(|| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        })
}

/// Decodes a response body into `T`.
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ClientError> {
    Ok(serde_json::from_value(data)?)
}

/// Decodes a list that may come bare or wrapped as `{ "<key>": [...] }`.
///
/// A missing key yields an empty list.
pub fn decode_list<T: DeserializeOwned>(data: Value, key: &str) -> Result<Vec<T>, ClientError> {
    match data {
        Value::Array(_) => decode(data),
        Value::Object(mut map) => match map.remove(key) {
            Some(list) => decode(list),
            None => Ok(Vec::new()),
        },
        other => Err(ClientError::Decode(format!(
            "expected a list or an object with '{key}', got {other}"
        ))),
    }
}
