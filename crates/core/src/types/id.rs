//! Newtype IDs for type-safe entity references.
//!
//! The backend identifies every record with an opaque string (a document ID).
//! Use the `define_id!` macro to create wrappers that prevent accidentally
//! passing a driver ID where a user ID is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use ridextra_core::define_id;
/// define_id!(UserId);
/// define_id!(DriverId);
///
/// let user_id = UserId::new("65f1c0");
/// let driver_id = DriverId::new("65f1c0");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = driver_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(SubjectId);
define_id!(UserId);
define_id!(DriverId);
define_id!(RideId);
define_id!(TicketId);
define_id!(VehicleTypeId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_conversion() {
        let id = UserId::new("u1");
        assert_eq!(id.to_string(), "u1");
        assert_eq!(id.as_str(), "u1");
        assert_eq!(UserId::from("u1"), id);
        assert_eq!(id.into_inner(), "u1".to_string());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = DriverId::new("d42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"d42\"");

        let parsed: DriverId = serde_json::from_str("\"d42\"").unwrap();
        assert_eq!(parsed, id);
    }
}
