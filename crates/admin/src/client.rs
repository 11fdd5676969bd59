//! Authenticated HTTP client for the RideXtra backend.
//!
//! Every admin call goes through [`AuthenticatedClient::authorized_request`].
//! It attaches the current bearer token, decodes the response envelope
//! leniently, and reacts to 401/403 by clearing the shared session and
//! notifying the unauthorized hook once per session.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use ridextra_core::ResponseEnvelope;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::config::AdminConfig;
use crate::error::{AdminError, REQUEST_FAILED_MESSAGE};
use crate::request::{ApiRequest, RequestBody};
use crate::session::SessionStore;

/// Details of a rejection that ended the session.
#[derive(Debug, Clone)]
pub struct UnauthorizedEvent {
    /// The 401 or 403 status.
    pub status: StatusCode,
    /// Path of the rejected request.
    pub path: String,
}

/// Callback run when the backend ends the session.
///
/// Runs at most once per invalidated session generation, after the session
/// has been cleared.
/// Implemented for any `Fn(&UnauthorizedEvent) + Send + Sync` closure.
pub trait UnauthorizedHook: Send + Sync {
    /// Called after the session was cleared.
    fn on_unauthorized(&self, event: &UnauthorizedEvent);
}

impl<F> UnauthorizedHook for F
where
    F: Fn(&UnauthorizedEvent) + Send + Sync,
{
    fn on_unauthorized(&self, event: &UnauthorizedEvent) {
        self(event);
    }
}

/// HTTP client bound to one backend and one session store.
///
/// Cheap to clone; clones share the connection pool, the session store and
/// the hook.
#[derive(Clone)]
pub struct AuthenticatedClient {
    inner: Arc<ClientInner>,
}

#[derive(Clone)]
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
    on_unauthorized: Option<Arc<dyn UnauthorizedHook>>,
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl AuthenticatedClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &AdminConfig, session: Arc<SessionStore>) -> Result<Self, AdminError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self::with_http_client(http, config.api_base_url.clone(), session))
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: Url,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                session,
                on_unauthorized: None,
            }),
        }
    }

    /// Install the callback run when the backend ends the session.
    #[must_use]
    pub fn with_unauthorized_hook(self, hook: impl UnauthorizedHook + 'static) -> Self {
        let mut inner = Arc::unwrap_or_clone(self.inner);
        inner.on_unauthorized = Some(Arc::new(hook));
        Self {
            inner: Arc::new(inner),
        }
    }

    /// The shared session store.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.inner.session
    }

    /// The backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Full URL for a path relative to the base URL.
    ///
    /// Any path component of the base URL is kept.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the result is not a valid URL.
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url, AdminError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let separator = if path.starts_with('/') { "" } else { "/" };

        let mut url = Url::parse(&format!("{base}{separator}{path}"))
            .map_err(|e| AdminError::Validation(format!("invalid request path {path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Send a request with the current session's credentials.
    ///
    /// On 401 or 403 the session the request was sent under is cleared and
    /// the unauthorized hook runs, unless a concurrent rejection or a new
    /// login already replaced that session.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` on 401/403.
    /// Returns `AdminError::Request` on any other non-success status, carrying
    /// the backend message or a generic fallback.
    /// Returns `AdminError::Transport` if no response was received.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn authorized_request(
        &self,
        request: ApiRequest,
    ) -> Result<ResponseEnvelope, AdminError> {
        let snapshot = self.inner.session.snapshot().await;
        let path = request.path.clone();

        let (status, envelope) = self.send(request, snapshot.token.as_ref()).await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = status.as_u16(), "Backend rejected the session");
            if self.inner.session.invalidate(snapshot.generation).await
                && let Some(hook) = &self.inner.on_unauthorized
            {
                hook.on_unauthorized(&UnauthorizedEvent { status, path });
            }
            return Err(AdminError::Unauthorized { status });
        }

        if !status.is_success() {
            let message = envelope.message().unwrap_or(REQUEST_FAILED_MESSAGE).to_owned();
            tracing::debug!(status = status.as_u16(), %message, "Request failed");
            return Err(AdminError::Request { status, message });
        }

        Ok(envelope)
    }

    /// `GET` a path.
    ///
    /// # Errors
    ///
    /// See [`Self::authorized_request`].
    pub async fn get(&self, path: &str) -> Result<ResponseEnvelope, AdminError> {
        self.authorized_request(ApiRequest::get(path)).await
    }

    /// `POST` a JSON body to a path.
    ///
    /// # Errors
    ///
    /// See [`Self::authorized_request`].
    pub async fn post_json(&self, path: &str, body: Value) -> Result<ResponseEnvelope, AdminError> {
        self.authorized_request(ApiRequest::post(path).json_value(body))
            .await
    }

    /// Send a request and decode its `data` payload.
    ///
    /// # Errors
    ///
    /// Everything [`Self::authorized_request`] returns, plus
    /// `AdminError::Decode` if the payload is missing or has the wrong shape.
    pub async fn request_data<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, AdminError> {
        let envelope = self.authorized_request(request).await?;
        envelope
            .data_as::<T>()
            .map_err(|e| AdminError::Decode(e.to_string()))?
            .ok_or_else(|| AdminError::Decode("response has no data".to_string()))
    }

    /// Send a request without any session handling.
    ///
    /// Returns the HTTP status and the envelope for every received response.
    pub(crate) async fn send(
        &self,
        request: ApiRequest,
        token: Option<&SecretString>,
    ) -> Result<(StatusCode, ResponseEnvelope), AdminError> {
        let url = self.endpoint(&request.path, &request.query)?;
        let mut builder = self.inner.http.request(request.method, url);

        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder = match request.body {
            RequestBody::Empty => {
                builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            }
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        if !request.headers.is_empty() {
            builder = builder.headers(request.headers);
        }

        let response = builder.send().await?;
        let status = response.status();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read response body");
                Default::default()
            }
        };

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Backend responded");
        Ok((status, ResponseEnvelope::from_body(status.as_u16(), &body)))
    }
}
