//! The uniform response envelope returned by backend endpoints.
//!
//! Every endpoint is expected to answer with
//! `{ "statusCode": 200, "status": true, "message": "...", "data": ... }`.
//! Some do not (an empty body on a 204, an HTML error page from a proxy, a
//! field left out), so decoding never fails: whatever is missing is filled in
//! from the HTTP status and `data` becomes `None`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded backend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Application status code reported by the backend.
    pub status_code: u16,
    /// Application-level success flag.
    pub status: bool,
    /// Human-readable message (may be empty).
    pub message: String,
    /// Endpoint payload. `None` when absent, `null`, or unparseable.
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    /// Build an envelope from a raw HTTP response body.
    ///
    /// Missing `statusCode` falls back to `http_status`, missing `status` to
    /// "the HTTP status is 2xx", missing `message` to an empty string. A body
    /// that is empty, not JSON, or not a JSON object yields `data: None`.
    #[must_use]
    pub fn from_body(http_status: u16, body: &[u8]) -> Self {
        let http_ok = (200..300).contains(&http_status);

        let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::empty(http_status, http_ok);
        };

        let status_code = fields
            .get("statusCode")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(http_status);
        let status = fields
            .get("status")
            .and_then(Value::as_bool)
            .unwrap_or(http_ok);
        let message = fields
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let data = fields.remove("data").filter(|value| !value.is_null());

        Self {
            status_code,
            status,
            message,
            data,
        }
    }

    /// An envelope with no payload and no message.
    #[must_use]
    pub const fn empty(status_code: u16, status: bool) -> Self {
        Self {
            status_code,
            status,
            message: String::new(),
            data: None,
        }
    }

    /// The backend message, if it is non-empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        let message = self.message.trim();
        (!message.is_empty()).then_some(message)
    }

    /// Decode `data` into a typed value.
    ///
    /// Returns `Ok(None)` when there is no payload.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the payload does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.data.clone().map(serde_json::from_value).transpose()
    }
}
