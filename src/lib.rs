//! # stax-gateway
//!
//! REST API for community sport events paid by manual bank transfer.
//!
//! Signed-in users submit a registration together with a photo of their
//! transfer. Every registration starts as `pending`; an administrator
//! checks the proof and flips it to `paid` (or back). Two independent
//! authentication paths exist: end-user sessions issued by an external
//! identity provider, and a username/password admin login answered with
//! a 24 hour token.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Extractors (auth/)
//!     │
//!     ├── RegistrationService, AdminAuthService (service/)
//!     │
//!     ├── ObjectStorage (storage/) ── bucket / local dir
//!     └── RegistrationStore, AdminStore (persistence/) ── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod storage;
