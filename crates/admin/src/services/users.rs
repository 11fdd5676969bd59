//! Rider account management.

use ridextra_core::{ListQuery, Paginated, ResponseEnvelope, TripSummary, UserId, UserSummary};
use serde_json::json;
use tracing::instrument;

use super::{page, record, require_id};
use crate::client::AuthenticatedClient;
use crate::error::AdminError;
use crate::request::ApiRequest;

const LIST_PATH: &str = "/admin/get-all-user";
const DETAIL_PATH: &str = "/admin/get-user-id";
const TRIPS_PATH: &str = "/admin/get-user-trips";
const STATUS_PATH: &str = "/admin/change-user-status";

/// Rider account endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> UserService<'a> {
    /// Create a user service.
    #[must_use]
    pub const fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// List riders.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the request fails or the page cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Paginated<UserSummary>, AdminError> {
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(LIST_PATH).queries(query.to_pairs()))
            .await?;
        page(&envelope)
    }

    /// Fetch one rider.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// or decode error.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get(&self, id: &UserId) -> Result<UserSummary, AdminError> {
        require_id(id.as_str(), "User id")?;
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(DETAIL_PATH).query("id", id))
            .await?;
        record(envelope)
    }

    /// A rider's trip history.
    ///
    /// Unlike top-level lists, `page` and `limit` are sent alongside `filter`.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// or decode error.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn trips(
        &self,
        user_id: &UserId,
        query: &ListQuery,
    ) -> Result<Paginated<TripSummary>, AdminError> {
        require_id(user_id.as_str(), "User id")?;
        let request = ApiRequest::get(TRIPS_PATH)
            .query("userId", user_id)
            .queries(query.to_pairs_with_paging());
        let envelope = self.client.authorized_request(request).await?;
        page(&envelope)
    }

    /// Block or unblock a rider.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// error.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn set_blocked(
        &self,
        id: &UserId,
        blocked: bool,
    ) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "User id")?;
        self.client
            .post_json(STATUS_PATH, json!({"id": id, "block": blocked}))
            .await
    }

    /// Delete a rider account.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// error.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &UserId) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "User id")?;
        self.client
            .post_json(STATUS_PATH, json!({"id": id, "deleted": true}))
            .await
    }
}
