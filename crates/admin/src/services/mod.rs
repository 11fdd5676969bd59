//! Typed wrappers over the backend's admin endpoints.
//!
//! Each service borrows an [`AuthenticatedClient`], builds an [`ApiRequest`]
//! per call and decodes the envelope's `data`. They add no state of their
//! own.
//!
//! # Services
//!
//! - `users` - Rider accounts, their trips, block and delete
//! - `drivers` - Driver accounts, block and document verification
//! - `rides` - Rides and bus rides
//! - `tickets` - Support tickets, status changes and replies
//! - `fares` - Per-vehicle-type fare schedules
//! - `content` - Terms and privacy policy pages
//!
//! [`ApiRequest`]: crate::request::ApiRequest

pub mod content;
pub mod drivers;
pub mod fares;
pub mod rides;
pub mod tickets;
pub mod users;

pub use content::ContentService;
pub use drivers::DriverService;
pub use fares::FareService;
pub use rides::RideService;
pub use tickets::TicketService;
pub use users::UserService;

use ridextra_core::{Paginated, ResponseEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::error::AdminError;

impl AuthenticatedClient {
    /// Rider account endpoints.
    #[must_use]
    pub const fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Driver account endpoints.
    #[must_use]
    pub const fn drivers(&self) -> DriverService<'_> {
        DriverService::new(self)
    }

    /// Ride endpoints.
    #[must_use]
    pub const fn rides(&self) -> RideService<'_> {
        RideService::new(self)
    }

    /// Support ticket endpoints.
    #[must_use]
    pub const fn tickets(&self) -> TicketService<'_> {
        TicketService::new(self)
    }

    /// Fare schedule endpoints.
    #[must_use]
    pub const fn fares(&self) -> FareService<'_> {
        FareService::new(self)
    }

    /// Static content endpoints.
    #[must_use]
    pub const fn content(&self) -> ContentService<'_> {
        ContentService::new(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Reject an empty identifier before anything is sent.
fn require_id(id: &str, what: &str) -> Result<(), AdminError> {
    if id.trim().is_empty() {
        return Err(AdminError::Validation(format!("{what} is required")));
    }
    Ok(())
}

/// Decode a list response. A response without `data` is an empty page.
fn page<T: DeserializeOwned>(envelope: &ResponseEnvelope) -> Result<Paginated<T>, AdminError> {
    Ok(envelope
        .data_as::<Paginated<T>>()
        .map_err(|e| AdminError::Decode(e.to_string()))?
        .unwrap_or_else(|| Paginated {
            items: Vec::new(),
            total_pages: 1,
        }))
}

/// Decode a single-record response.
///
/// Detail endpoints return the record either directly in `data` or wrapped
/// one level deeper as `data.data`.
fn record<T: DeserializeOwned>(envelope: ResponseEnvelope) -> Result<T, AdminError> {
    let data = envelope
        .data
        .ok_or_else(|| AdminError::Decode("response has no data".to_string()))?;

    let data = match data {
        Value::Object(mut fields) if !fields.contains_key("_id") => match fields.remove("data") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                fields.insert("data".to_string(), other);
                Value::Object(fields)
            }
            None => Value::Object(fields),
        },
        other => other,
    };

    serde_json::from_value(data).map_err(|e| AdminError::Decode(e.to_string()))
}
