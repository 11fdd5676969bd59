//! Terms and privacy policy pages.

use ridextra_core::{ResponseEnvelope, StaticContentKind};
use serde_json::{Value, json};
use tracing::instrument;

use crate::client::AuthenticatedClient;
use crate::error::AdminError;
use crate::request::ApiRequest;

const GET_PATH: &str = "/admins/getstatic";
const UPDATE_PATH: &str = "/admins/Update-static-content";

/// Static content endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ContentService<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> ContentService<'a> {
    /// Create a content service.
    #[must_use]
    pub const fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Current text of a page, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get(&self, kind: StaticContentKind) -> Result<Option<String>, AdminError> {
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(GET_PATH).query("type", kind))
            .await?;

        Ok(envelope
            .data
            .as_ref()
            .and_then(|data| data.get("content"))
            .and_then(Value::as_str)
            .map(str::to_owned))
    }

    /// Replace the text of a page.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if `content` is blank (nothing is sent),
    /// otherwise any request error.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn update(
        &self,
        kind: StaticContentKind,
        content: &str,
    ) -> Result<ResponseEnvelope, AdminError> {
        if content.trim().is_empty() {
            return Err(AdminError::Validation("Content cannot be empty".to_string()));
        }
        self.client
            .post_json(UPDATE_PATH, json!({"type": kind, "content": content}))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::test_support::logged_in_client;

    #[tokio::test]
    async fn test_get_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GET_PATH))
            .and(query_param("type", "TERMCONDITION"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"type": "TERMCONDITION", "content": "<p>Terms</p>"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(GET_PATH))
            .and(query_param("type", "POLICY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let terms = client
            .content()
            .get(StaticContentKind::TermsAndConditions)
            .await
            .unwrap();
        assert_eq!(terms.as_deref(), Some("<p>Terms</p>"));

        let policy = client.content().get(StaticContentKind::Policy).await.unwrap();
        assert!(policy.is_none());
    }

    #[tokio::test]
    async fn test_update_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(UPDATE_PATH))
            .and(body_json(json!({"type": "POLICY", "content": "<p>Policy</p>"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        client
            .content()
            .update(StaticContentKind::Policy, "<p>Policy</p>")
            .await
            .unwrap();

        let err = client
            .content()
            .update(StaticContentKind::Policy, "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }
}
