//! RideXtra Core - Shared types library.
//!
//! This crate provides common types used across all RideXtra admin components:
//! - `admin` - Session store, authenticated API client and typed services
//! - `cli` - Command-line console for staff
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - String IDs, the response envelope, pagination, fares,
//!   statuses and record summaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
