//! Driver account management and document verification.

use ridextra_core::{
    DriverId, DriverSummary, ListQuery, Paginated, ResponseEnvelope, TripSummary,
    VerificationSection,
};
use serde_json::json;
use tracing::instrument;

use super::{page, record, require_id};
use crate::client::AuthenticatedClient;
use crate::error::AdminError;
use crate::request::ApiRequest;

const LIST_PATH: &str = "/admin/get-all-driver";
const DETAIL_PATH: &str = "/admin/get-driver-id";
const TRIPS_PATH: &str = "/admin/get-user-trips";
const STATUS_PATH: &str = "/admin/change-driver-status";

/// Endpoint that approves or rejects one verification section.
#[must_use]
pub const fn verification_path(section: VerificationSection) -> &'static str {
    match section {
        VerificationSection::Bank => "/admin/verify-bank",
        VerificationSection::Vehicle => "/admin/verify-VehicleDetails",
        VerificationSection::License => "/admin/verify-license",
        VerificationSection::Profile => "/admin/verify-by-admin",
    }
}

/// Driver account endpoints.
#[derive(Debug, Clone, Copy)]
pub struct DriverService<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> DriverService<'a> {
    /// Create a driver service.
    #[must_use]
    pub const fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// List drivers.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the request fails or the page cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Paginated<DriverSummary>, AdminError> {
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(LIST_PATH).queries(query.to_pairs()))
            .await?;
        page(&envelope)
    }

    /// Fetch one driver.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// or decode error.
    #[instrument(skip(self), fields(driver_id = %id))]
    pub async fn get(&self, id: &DriverId) -> Result<DriverSummary, AdminError> {
        require_id(id.as_str(), "Driver id")?;
        let envelope = self
            .client
            .authorized_request(ApiRequest::get(DETAIL_PATH).query("id", id))
            .await?;
        record(envelope)
    }

    /// A driver's trip history. Drivers share the rider trip endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// or decode error.
    #[instrument(skip(self), fields(driver_id = %id))]
    pub async fn trips(
        &self,
        id: &DriverId,
        query: &ListQuery,
    ) -> Result<Paginated<TripSummary>, AdminError> {
        require_id(id.as_str(), "Driver id")?;
        let request = ApiRequest::get(TRIPS_PATH)
            .query("userId", id)
            .queries(query.to_pairs_with_paging());
        let envelope = self.client.authorized_request(request).await?;
        page(&envelope)
    }

    /// Block or unblock a driver.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// error.
    #[instrument(skip(self), fields(driver_id = %id))]
    pub async fn set_blocked(
        &self,
        id: &DriverId,
        blocked: bool,
    ) -> Result<ResponseEnvelope, AdminError> {
        require_id(id.as_str(), "Driver id")?;
        self.client
            .post_json(STATUS_PATH, json!({"id": id, "block": blocked}))
            .await
    }

    /// Approve or reject one section of a driver's documents.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an empty id, otherwise any request
    /// error.
    #[instrument(skip(self), fields(driver_id = %driver_id))]
    pub async fn verify(
        &self,
        section: VerificationSection,
        driver_id: &DriverId,
        approved: bool,
    ) -> Result<ResponseEnvelope, AdminError> {
        require_id(driver_id.as_str(), "Driver id")?;
        self.client
            .post_json(
                verification_path(section),
                json!({"driverId": driver_id, "status": approved}),
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

    #[test]
    fn test_verification_paths() {
        assert_eq!(
            verification_path(VerificationSection::Vehicle),
            "/admin/verify-VehicleDetails"
        );
        assert_eq!(
            verification_path(VerificationSection::Profile),
            "/admin/verify-by-admin"
        );
    }

    #[tokio::test]
    async fn test_get_driver_flags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .and(query_param("id", "d1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "_id": "d1",
                    "name": "Kiran",
                    "isbankVerified": true,
                    "isvehicleVerified": true,
                    "islicenseVerified": true,
                    "isadminVerified": false
                }
            })))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let driver = client.drivers().get(&DriverId::new("d1")).await.unwrap();
        assert!(driver.is_bank_verified);
        assert!(!driver.is_fully_verified());
    }

    #[tokio::test]
    async fn test_verify_posts_to_section_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/verify-license"))
            .and(body_json(json!({"driverId": "d1", "status": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200, "status": true, "message": "License rejected"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let envelope = client
            .drivers()
            .verify(VerificationSection::License, &DriverId::new("d1"), false)
            .await
            .unwrap();
        assert_eq!(envelope.message(), Some("License rejected"));
    }

    #[tokio::test]
    async fn test_block_driver() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(STATUS_PATH))
            .and(body_json(json!({"id": "d1", "block": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        client
            .drivers()
            .set_blocked(&DriverId::new("d1"), false)
            .await
            .unwrap();
    }
}
