//! Fare schedules per vehicle type, using decimal arithmetic.
//!
//! The backend stores one fare record per vehicle type ("Mini", "Sedan", ...)
//! and is inconsistent about numeric encoding: amounts arrive as JSON numbers
//! or as numeric strings depending on how the record was written. Reading is
//! lenient; writing always sends decimal strings.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::id::VehicleTypeId;

/// Minimum length of a vehicle type name.
pub const MIN_VEHICLE_TYPE_LENGTH: usize = 2;

/// Errors that can occur when validating a [`FareInput`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FareInputError {
    /// Vehicle type name is too short.
    #[error("vehicle type must be at least {min} characters")]
    VehicleTypeTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// Vehicle type contains characters other than letters, spaces and hyphens.
    #[error("vehicle type may only contain letters, spaces and hyphens")]
    VehicleTypeInvalid,
    /// An amount is negative.
    #[error("{field} cannot be negative")]
    NegativeAmount {
        /// Wire name of the offending field.
        field: &'static str,
    },
}

/// A stored fare schedule for one vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareSchedule {
    #[serde(rename = "_id")]
    pub id: VehicleTypeId,
    #[serde(rename = "VehicalType")]
    pub vehicle_type: String,
    #[serde(rename = "baseprice", deserialize_with = "lenient_decimal")]
    pub base_price: Decimal,
    #[serde(rename = "timeprice", deserialize_with = "lenient_decimal")]
    pub time_price: Decimal,
    #[serde(rename = "distaceprice", deserialize_with = "lenient_decimal")]
    pub distance_price: Decimal,
    /// Platform commission in percent.
    #[serde(rename = "plateformfees", deserialize_with = "lenient_decimal")]
    pub platform_fee_percent: Decimal,
    #[serde(rename = "cancelprice", deserialize_with = "lenient_decimal")]
    pub cancel_price: Decimal,
    /// Whether the vehicle type is offered to riders.
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields for creating or editing a fare schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareInput {
    #[serde(rename = "VehicalType")]
    pub vehicle_type: String,
    #[serde(rename = "baseprice")]
    pub base_price: Decimal,
    #[serde(rename = "timeprice")]
    pub time_price: Decimal,
    #[serde(rename = "distaceprice")]
    pub distance_price: Decimal,
    #[serde(rename = "plateformfees")]
    pub platform_fee_percent: Decimal,
    #[serde(rename = "cancelprice")]
    pub cancel_price: Decimal,
}

impl FareInput {
    /// Check the input before it is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle type is shorter than two characters or
    /// contains anything but letters, spaces and hyphens, or if any amount is
    /// negative.
    pub fn validate(&self) -> Result<(), FareInputError> {
        let name = self.vehicle_type.trim();
        if name.chars().count() < MIN_VEHICLE_TYPE_LENGTH {
            return Err(FareInputError::VehicleTypeTooShort {
                min: MIN_VEHICLE_TYPE_LENGTH,
            });
        }
        if !name
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
        {
            return Err(FareInputError::VehicleTypeInvalid);
        }

        let amounts = [
            ("baseprice", self.base_price),
            ("timeprice", self.time_price),
            ("distaceprice", self.distance_price),
            ("plateformfees", self.platform_fee_percent),
            ("cancelprice", self.cancel_price),
        ];
        if let Some(&(field, _)) = amounts.iter().find(|(_, amount)| amount.is_sign_negative()) {
            return Err(FareInputError::NegativeAmount { field });
        }
        Ok(())
    }
}

impl From<&FareSchedule> for FareInput {
    fn from(schedule: &FareSchedule) -> Self {
        Self {
            vehicle_type: schedule.vehicle_type.clone(),
            base_price: schedule.base_price,
            time_price: schedule.time_price,
            distance_price: schedule.distance_price,
            platform_fee_percent: schedule.platform_fee_percent,
            cancel_price: schedule.cancel_price,
        }
    }
}

/// Accept a decimal encoded as a JSON number or a numeric string.
fn lenient_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map_err(D::Error::custom),
        Value::String(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Value::String(s) => Decimal::from_str(s.trim()).map_err(D::Error::custom),
        Value::Null => Ok(Decimal::ZERO),
        other => Err(D::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}
