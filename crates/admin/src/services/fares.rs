//! Fare schedules per vehicle type.

use ridextra_core::{FareInput, FareSchedule, ResponseEnvelope, VehicleTypeId};
use serde_json::{Value, json};
use tracing::instrument;

use super::{page, require_id};
use crate::client::AuthenticatedClient;
use crate::error::AdminError;

const LIST_PATH: &str = "/admin/get-all-vehicle";
const CREATE_PATH: &str = "/admin/add-vehicle";
const UPDATE_PATH: &str = "/admin/edit-vehicle-price";
const DELETE_PATH: &str = "/admin/delete-vehicle";
const STATUS_PATH: &str = "/admin/change-vehicle-status";

/// Fare schedule endpoints.
#[derive(Debug, Clone, Copy)]
pub struct FareService<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> FareService<'a> {
    /// Create a fare service.
    #[must_use]
    pub const fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// All fare schedules.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the request fails or the list cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FareSchedule>, AdminError> {
        let envelope = self.client.get(LIST_PATH).await?;
        Ok(page::<FareSchedule>(&envelope)?.items)
    }

    /// Add a vehicle type with its fares.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the input is invalid (nothing is
    /// sent), otherwise any request error.
    #[instrument(skip(self, input), fields(vehicle_type = %input.vehicle_type))]
    pub async fn create(&self, input: &FareInput) -> Result<ResponseEnvelope, AdminError> {
        let body = fare_body(input)?;
        self.client.post_json(CREATE_PATH, body).await
    }

    /// Replace the fares of an existing vehicle type.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the id or input is invalid,
    /// otherwise any request error.
    #[instrument(skip(self, input), fields(fare_id = %id))]
    pub async fn update(
        &self,
        id: &VehicleTypeId,
        input: &FareInput,
    ) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "Vehicle type id")?;
        let mut body = fare_body(input)?;
        if let Value::Object(fields) = &mut body {
            fields.insert("id".to_string(), json!(id));
        }
        self.client.post_json(UPDATE_PATH, body).await
    }

    /// Remove a vehicle type.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// error.
    #[instrument(skip(self), fields(fare_id = %id))]
    pub async fn delete(&self, id: &VehicleTypeId) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "Vehicle type id")?;
        self.client.post_json(DELETE_PATH, json!({"id": id})).await
    }

    /// Enable or disable a vehicle type for booking.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// error.
    #[instrument(skip(self), fields(fare_id = %id))]
    pub async fn set_active(
        &self,
        id: &VehicleTypeId,
        active: bool,
    ) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "Vehicle type id")?;
        self.client
            .post_json(STATUS_PATH, json!({"id": id, "status": active}))
            .await
    }
}

/// Validate a fare input and encode it with a trimmed vehicle type.
fn fare_body(input: &FareInput) -> Result<Value, AdminError> {
    input
        .validate()
        .map_err(|e| AdminError::Validation(e.to_string()))?;

    let trimmed = FareInput {
        vehicle_type: input.vehicle_type.trim().to_string(),
        ..input.clone()
    };
    serde_json::to_value(&trimmed).map_err(|e| AdminError::Validation(e.to_string()))
}
