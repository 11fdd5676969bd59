//! RideXtra Admin library.
//!
//! Client side of the RideXtra admin console: the session store, the
//! authenticated HTTP client every backend call goes through, the login flow,
//! and typed services for each admin area.
//!
//! # Security
//!
//! A session grants full administrative access to riders, drivers, rides and
//! fares. Tokens are held as [`secrecy::SecretString`], never logged, and
//! persisted with owner-only permissions.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use ridextra_admin::{AdminConfig, AuthenticatedClient, LoginFlow, SessionStore};
//! use ridextra_core::ListQuery;
//!
//! let config = AdminConfig::from_env()?;
//! let store = Arc::new(SessionStore::open(config.session_file.clone()).await);
//! let client = AuthenticatedClient::new(&config, store)?
//!     .with_unauthorized_hook(|_: &_| eprintln!("Session expired, please log in again"));
//!
//! LoginFlow::new(client.clone()).login("ops@ridextra.app", &password).await?;
//! let riders = client.users().list(&ListQuery::paged(1, 10)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod services;
pub mod session;

pub use auth::LoginFlow;
pub use client::{AuthenticatedClient, UnauthorizedEvent, UnauthorizedHook};
pub use config::{AdminConfig, ConfigError};
pub use error::AdminError;
pub use request::{ApiRequest, RequestBody};
pub use services::tickets::TicketReply;
pub use session::{Session, SessionState, SessionStore};
