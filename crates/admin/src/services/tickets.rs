//! Support tickets.

use ridextra_core::{ListQuery, Paginated, ResponseEnvelope, TicketId, TicketStatus, TicketSummary};
use serde_json::json;
use tracing::instrument;

use super::{page, record, require_id};
use crate::client::AuthenticatedClient;
use crate::error::AdminError;
use crate::request::ApiRequest;

const LIST_PATH: &str = "/admin/get-all-ticket";
const DETAIL_PATH: &str = "/admin/get-ticket-id";
const STATUS_PATH: &str = "/admin/change-ticket-status";
const REPLY_PATH: &str = "/admin/send-reply";

/// An email reply to a ticket.
#[derive(Debug, Clone)]
pub struct TicketReply {
    /// Recipient, normally the ticket's email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

/// Support ticket endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TicketService<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> TicketService<'a> {
    /// Create a ticket service.
    #[must_use]
    pub const fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// List tickets.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the request fails or the page cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Paginated<TicketSummary>, AdminError> {
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(LIST_PATH).queries(query.to_pairs()))
            .await?;
        page(&envelope)
    }

    /// Fetch one ticket.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// or decode error.
    #[instrument(skip(self), fields(ticket_id = %id))]
    pub async fn get(&self, id: &TicketId) -> Result<TicketSummary, AdminError> {
        require_id(id.as_str(), "Ticket id")?;
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(DETAIL_PATH).query("id", id))
            .await?;
        record(envelope)
    }

    /// Move a ticket to another status.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// error.
    #[instrument(skip(self), fields(ticket_id = %id))]
    pub async fn set_status(
        &self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "Ticket id")?;
        self.client
            .post_json(STATUS_PATH, json!({"id": id, "status": status}))
            .await
    }

    /// Email a reply to the ticket's author.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the id, email or message is empty
    /// (nothing is sent), otherwise any request error.
    #[instrument(skip(self, reply), fields(ticket_id = %id))]
    pub async fn reply(
        &self,
        id: &TicketId,
        reply: &TicketReply,
    ) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "Ticket id")?;
        if reply.email.trim().is_empty() {
            return Err(AdminError::Validation("Recipient email is required".to_string()));
        }
        if reply.message.trim().is_empty() {
            return Err(AdminError::Validation("Please write a reply message".to_string()));
        }

        self.client
            .post_json(
                REPLY_PATH,
                json!({
                    "id": id,
                    "email": reply.email.trim(),
                    "subject": reply.subject,
                    "message": reply.message,
                }),
            )
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

    fn reply(message: &str) -> TicketReply {
        TicketReply {
            email: "rider@example.com".to_string(),
            subject: "Re: refund".to_string(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_ticket_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .and(query_param("id", "t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"data": {"_id": "t1", "Status": "InProgress", "title": "Refund"}}
            })))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let ticket = client.tickets().get(&TicketId::new("t1")).await.unwrap();
        assert_eq!(ticket.status, Some(TicketStatus::InProgress));
        assert_eq!(ticket.title.as_deref(), Some("Refund"));
    }

    #[tokio::test]
    async fn test_set_status_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(STATUS_PATH))
            .and(body_json(json!({"id": "t1", "status": "Completed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"statusCode": 200})))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        client
            .tickets()
            .set_status(&TicketId::new("t1"), TicketStatus::Completed)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REPLY_PATH))
            .and(body_json(json!({
                "id": "t1",
                "email": "rider@example.com",
                "subject": "Re: refund",
                "message": "Refund issued."
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true, "message": "Reply sent"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let envelope = client
            .tickets()
            .reply(&TicketId::new("t1"), &reply("Refund issued."))
            .await
            .unwrap();
        assert_eq!(envelope.message(), Some("Reply sent"));
    }

    #[tokio::test]
    async fn test_empty_reply_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let err = client
            .tickets()
            .reply(&TicketId::new("t1"), &reply("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }
}
