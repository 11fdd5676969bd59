//! Rides and bus rides.

use ridextra_core::{ListQuery, Paginated, ResponseEnvelope, RideId, TripSummary};
use serde_json::Value;
use tracing::instrument;

use super::{page, record, require_id};
use crate::client::AuthenticatedClient;
use crate::error::AdminError;
use crate::request::ApiRequest;

const LIST_PATH: &str = "/admin/get-all-ride";
const DETAIL_PATH: &str = "/admin/get-ride-id";
const BUS_LIST_PATH: &str = "/admin/get-all-bus-ride";
// Spelled as the backend routes it.
const ASSIGN_BUS_PATH: &str = "/admin/assisgn-bus";

/// Ride endpoints.
#[derive(Debug, Clone, Copy)]
pub struct RideService<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> RideService<'a> {
    /// Create a ride service.
    #[must_use]
    pub const fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// List rides.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the request fails or the page cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Paginated<TripSummary>, AdminError> {
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(LIST_PATH).queries(query.to_pairs()))
            .await?;
        page(&envelope)
    }

    /// Fetch one ride.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// or decode error.
    #[instrument(skip(self), fields(ride_id = %id))]
    pub async fn get(&self, id: &RideId) -> Result<TripSummary, AdminError> {
        require_id(id.as_str(), "Ride id")?;
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(DETAIL_PATH).query("id", id))
            .await?;
        record(envelope)
    }

    /// List bus rides.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the request fails or the page cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_bus_rides(
        &self,
        query: &ListQuery,
    ) -> Result<Paginated<TripSummary>, AdminError> {
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(BUS_LIST_PATH).queries(query.to_pairs()))
            .await?;
        page(&envelope)
    }

    /// Assign a bus and driver to a bus ride. The payload is passed through
    /// as-is.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the payload is not a JSON object,
    /// otherwise any request error.
    #[instrument(skip(self, payload))]
    pub async fn assign_bus(&self, payload: Value) -> Result<ResponseEnvelope, AdminError> {
        if !payload.is_object() {
            return Err(AdminError::Validation(
                "Bus assignment must be a JSON object".to_string(),
            ));
        }
        self.client.post_json(ASSIGN_BUS_PATH, payload).await
    }
}
