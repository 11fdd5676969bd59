//! Integration tests for the RideXtra admin client.
//!
//! Every test runs the real [`AuthenticatedClient`], [`LoginFlow`] and
//! [`SessionStore`] against a `wiremock` server standing in for the backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ridextra-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Login, logout and session persistence
//! - `authorized_requests` - Bearer handling, envelopes, errors and 401/403
//! - `services` - List query rule and service request shapes

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ridextra_admin::{
    AdminConfig, AuthenticatedClient, LoginFlow, Session, SessionStore, UnauthorizedEvent,
};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token issued by [`TestBackend::mount_login`].
pub const TEST_TOKEN: &str = "tok123";

/// Subject id issued by [`TestBackend::mount_login`].
pub const TEST_SUBJECT: &str = "u1";

/// A mock backend plus a client wired to it.
pub struct TestBackend {
    /// The mock server.
    pub server: MockServer,
    /// Client bound to `server` and `store`.
    pub client: AuthenticatedClient,
    /// The shared session store.
    pub store: Arc<SessionStore>,
    /// Number of times the unauthorized hook has fired.
    pub unauthorized: Arc<AtomicUsize>,
}

impl TestBackend {
    /// Start a backend with an in-memory session store.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is not a valid URL.
    pub async fn start() -> Self {
        Self::with_store(SessionStore::in_memory()).await
    }

    /// Start a backend using `store`.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is not a valid URL.
    #[allow(clippy::unwrap_used)]
    pub async fn with_store(store: SessionStore) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);
        let unauthorized = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&unauthorized);
        let base = Url::parse(&server.uri()).unwrap();
        let client = AuthenticatedClient::new(&AdminConfig::new(base), Arc::clone(&store))
            .unwrap()
            .with_unauthorized_hook(move |_: &UnauthorizedEvent| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        Self {
            server,
            client,
            store,
            unauthorized,
        }
    }

    /// A login flow over this backend's client.
    #[must_use]
    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(self.client.clone())
    }

    /// How many times the unauthorized hook fired.
    #[must_use]
    pub fn unauthorized_count(&self) -> usize {
        self.unauthorized.load(Ordering::SeqCst)
    }

    /// Put a session in the store without going through login.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot persist the session.
    #[allow(clippy::unwrap_used)]
    pub async fn seed_session(&self, token: &str) {
        self.store
            .save(Session::new(TEST_SUBJECT, "a@b.com", token))
            .await
            .unwrap();
    }

    /// Answer `POST /admin/login` with a successful login.
    pub async fn mount_login(&self) {
        Mock::given(method("POST"))
            .and(path("/admin/login"))
            .respond_with(ok(json!({
                "statusCode": 200,
                "status": true,
                "message": "Login successfully",
                "data": {"Id": TEST_SUBJECT, "Token": TEST_TOKEN}
            })))
            .mount(&self.server)
            .await;
    }
}

/// A 200 response with a JSON body.
#[must_use]
pub fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
