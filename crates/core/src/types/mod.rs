//! Core types for the RideXtra admin client.
//!
//! This module provides type-safe wrappers for the backend's domain concepts.

pub mod envelope;
pub mod fare;
pub mod id;
pub mod page;
pub mod records;
pub mod status;

pub use envelope::ResponseEnvelope;
pub use fare::{FareInput, FareInputError, FareSchedule};
pub use id::*;
pub use page::{ListQuery, Paginated};
pub use records::*;
pub use status::*;
