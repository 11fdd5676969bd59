//! Record summaries decoded from list and detail endpoints.
//!
//! Only the fields the console acts on are typed; everything else the backend
//! sends is kept verbatim in `extra` so nothing is lost when a record is
//! printed or passed on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{DriverId, RideId, TicketId, UserId};
use super::status::{StaticContentKind, TicketStatus, TripStatus};

/// A rider account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub is_phone_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A driver account and its document verification flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSummary {
    #[serde(rename = "_id")]
    pub id: DriverId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "isBlocked", default)]
    pub is_blocked: bool,
    #[serde(rename = "isadminVerified", default)]
    pub is_admin_verified: bool,
    #[serde(rename = "isbankVerified", default)]
    pub is_bank_verified: bool,
    #[serde(rename = "isvehicleVerified", default)]
    pub is_vehicle_verified: bool,
    #[serde(rename = "islicenseVerified", default)]
    pub is_license_verified: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DriverSummary {
    /// Whether every document section and the profile itself are verified.
    #[must_use]
    pub const fn is_fully_verified(&self) -> bool {
        self.is_admin_verified
            && self.is_bank_verified
            && self.is_vehicle_verified
            && self.is_license_verified
    }
}

/// One trip from a rider's or driver's history, or the ride list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    #[serde(rename = "_id")]
    pub id: RideId,
    #[serde(default)]
    pub status: Option<TripStatus>,
    #[serde(default)]
    pub pickup_location: Option<Value>,
    #[serde(default)]
    pub drop_location: Option<Value>,
    #[serde(default)]
    pub travel_date: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    #[serde(rename = "_id")]
    pub id: TicketId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<TicketStatus>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An editable static content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticContent {
    #[serde(rename = "type")]
    pub kind: StaticContentKind,
    pub content: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_summary_keeps_unknown_fields() {
        let user: UserSummary = serde_json::from_value(json!({
            "_id": "u1",
            "name": "Asha",
            "isBlocked": true,
            "walletBalance": 120
        }))
        .unwrap();

        assert_eq!(user.id.as_str(), "u1");
        assert!(user.is_blocked);
        assert!(!user.is_deleted);
        assert_eq!(user.extra["walletBalance"], 120);
    }

    #[test]
    fn test_driver_verification_flags() {
        let driver: DriverSummary = serde_json::from_value(json!({
            "_id": "d1",
            "isadminVerified": true,
            "isbankVerified": true,
            "isvehicleVerified": true,
            "islicenseVerified": false
        }))
        .unwrap();
        assert!(!driver.is_fully_verified());
    }

    #[test]
    fn test_ticket_status_field() {
        let ticket: TicketSummary = serde_json::from_value(json!({
            "_id": "t1",
            "Status": "InProgress",
            "type": "Payment"
        }))
        .unwrap();
        assert_eq!(ticket.status, Some(TicketStatus::InProgress));
        assert_eq!(ticket.kind.as_deref(), Some("Payment"));
    }
}
