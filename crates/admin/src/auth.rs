//! Admin login, logout and profile.
//!
//! Login talks to the backend directly (there is no token yet) and, on
//! success, writes the new session into the store shared with the
//! [`AuthenticatedClient`]. Logout and profile go through the client like any
//! other authorized call.

use ridextra_core::{ResponseEnvelope, SubjectId};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::client::AuthenticatedClient;
use crate::error::{AdminError, LOGIN_FAILED_MESSAGE};
use crate::request::ApiRequest;
use crate::session::Session;

/// Login endpoint.
pub const LOGIN_PATH: &str = "/admin/login";
/// Logout endpoint.
pub const LOGOUT_PATH: &str = "/admin/logout";
/// Profile endpoint.
pub const PROFILE_PATH: &str = "/admin/profile";

/// `data` of a successful login response.
#[derive(Deserialize)]
struct LoginData {
    #[serde(rename = "Id")]
    id: Value,
    #[serde(rename = "Token")]
    token: String,
}

impl LoginData {
    /// The subject id, accepting both string and numeric ids.
    fn subject_id(&self) -> Option<SubjectId> {
        let id = match &self.id {
            Value::String(id) => id.trim().to_owned(),
            Value::Number(id) => id.to_string(),
            _ => return None,
        };
        (!id.is_empty()).then(|| SubjectId::new(id))
    }
}

/// Exchanges credentials for a session.
#[derive(Debug, Clone)]
pub struct LoginFlow {
    client: AuthenticatedClient,
}

impl LoginFlow {
    /// Create a login flow that writes into `client`'s session store.
    #[must_use]
    pub const fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// The client this flow authenticates.
    #[must_use]
    pub const fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    /// Log in with email and password.
    ///
    /// On success the session is persisted and returned. On failure the
    /// session store is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if either field is empty (no request is
    /// sent).
    /// Returns `AdminError::Authentication` if the backend rejects the
    /// credentials, answers without a token, or cannot be reached.
    /// Returns `AdminError::Storage` if the session cannot be persisted.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session, AdminError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AdminError::Validation("Email is required".to_string()));
        }
        if password.expose_secret().is_empty() {
            return Err(AdminError::Validation("Password is required".to_string()));
        }

        let request = ApiRequest::post(LOGIN_PATH).json_value(json!({
            "email": email,
            "password": password.expose_secret(),
        }));

        let (status, envelope) = match self.client.send(request, None).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Login request failed");
                return Err(AdminError::Authentication(LOGIN_FAILED_MESSAGE.to_string()));
            }
        };

        if !status.is_success() || !envelope.status {
            tracing::info!(status = status.as_u16(), "Login rejected");
            return Err(rejection(&envelope));
        }

        let Some((subject_id, token)) = envelope
            .data_as::<LoginData>()
            .ok()
            .flatten()
            .and_then(|data| Some((data.subject_id()?, data.token)))
            .filter(|(_, token)| !token.is_empty())
        else {
            tracing::warn!("Login response did not include an id and token");
            return Err(rejection(&envelope));
        };

        let session = Session::new(subject_id, email, token);
        self.client.session().save(session.clone()).await?;

        tracing::info!(subject_id = %session.subject_id, "Admin logged in");
        Ok(session)
    }

    /// Log out.
    ///
    /// The local session is cleared whatever the backend answers.
    ///
    /// # Errors
    ///
    /// Returns the backend or transport error, after the session was cleared.
    /// A 401/403 (session already ended server-side) counts as success.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AdminError> {
        let result = self
            .client
            .authorized_request(ApiRequest::post(LOGOUT_PATH))
            .await;
        self.client.session().clear().await;

        match result {
            Ok(_) => {
                tracing::info!("Admin logged out");
                Ok(())
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Admin logged out (session already expired)");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed; local session cleared");
                Err(e)
            }
        }
    }

    /// Fetch the logged-in admin's profile.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::authorized_request`].
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<ResponseEnvelope, AdminError> {
        self.client.get(PROFILE_PATH).await
    }
}

fn rejection(envelope: &ResponseEnvelope) -> AdminError {
    AdminError::Authentication(
        envelope
            .message()
            .unwrap_or(LOGIN_FAILED_MESSAGE)
            .to_owned(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use secrecy::ExposeSecret;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::AdminConfig;
    use crate::services::test_support::closed_port_url;
    use crate::session::{SessionState, SessionStore};

    fn flow_for(server: &MockServer) -> LoginFlow {
        let base = Url::parse(&server.uri()).unwrap();
        let store = Arc::new(SessionStore::in_memory());
        LoginFlow::new(AuthenticatedClient::new(&AdminConfig::new(base), store).unwrap())
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_json(json!({"email": "a@b.com", "password": "x"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200,
                "status": true,
                "message": "Login successfully",
                "data": {"Id": "u1", "Token": "tok123"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let flow = flow_for(&server);
        let session = flow.login(" a@b.com ", &secret("x")).await.unwrap();
        assert_eq!(session.subject_id.as_str(), "u1");
        assert_eq!(session.email, "a@b.com");
        assert_eq!(session.token.expose_secret(), "tok123");

        let stored = flow.client().session().current().await.unwrap();
        assert_eq!(stored.subject_id.as_str(), "u1");
        assert_eq!(stored.token.expose_secret(), "tok123");
    }

    #[tokio::test]
    async fn test_empty_fields_send_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let flow = flow_for(&server);
        let err = flow.login("   ", &secret("x")).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        let err = flow.login("a@b.com", &secret("")).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rejected_credentials_use_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "statusCode": 400, "status": false, "message": "Invalid password"
            })))
            .mount(&server)
            .await;

        let flow = flow_for(&server);
        let err = flow.login("a@b.com", &secret("bad")).await.unwrap_err();
        assert!(matches!(err, AdminError::Authentication(ref m) if m == "Invalid password"));
        assert_eq!(flow.client().session().state().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_status_false_on_200_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": false})))
            .mount(&server)
            .await;

        let flow = flow_for(&server);
        let err = flow.login("a@b.com", &secret("x")).await.unwrap_err();
        assert!(matches!(err, AdminError::Authentication(ref m) if m == LOGIN_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200, "data": {"Id": "u1"}
            })))
            .mount(&server)
            .await;

        let flow = flow_for(&server);
        let err = flow.login("a@b.com", &secret("x")).await.unwrap_err();
        assert!(matches!(err, AdminError::Authentication(_)));
        assert!(flow.client().session().current().await.is_none());
    }

    #[tokio::test]
    async fn test_numeric_id_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"Id": 42, "Token": "t"}
            })))
            .mount(&server)
            .await;

        let session = flow_for(&server)
            .login("a@b.com", &secret("x"))
            .await
            .unwrap();
        assert_eq!(session.subject_id.as_str(), "42");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_authentication_error() {
        let store = Arc::new(SessionStore::in_memory());
        let client =
            AuthenticatedClient::new(&AdminConfig::new(closed_port_url()), Arc::clone(&store))
                .unwrap();
        let flow = LoginFlow::new(client);

        let err = flow.login("a@b.com", &secret("x")).await.unwrap_err();
        assert!(matches!(err, AdminError::Authentication(ref m) if m == LOGIN_FAILED_MESSAGE));
        assert_eq!(store.state().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let flow = flow_for(&server);
        flow.client()
            .session()
            .save(Session::new("u1", "a@b.com", "tok"))
            .await
            .unwrap();

        let err = flow.logout().await.unwrap_err();
        assert!(matches!(err, AdminError::Request { .. }));
        assert_eq!(flow.client().session().state().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_after_expiry_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let flow = flow_for(&server);
        flow.client()
            .session()
            .save(Session::new("u1", "a@b.com", "tok"))
            .await
            .unwrap();

        flow.logout().await.unwrap();
        assert!(flow.client().session().current().await.is_none());
    }
}
