//! Service layer: business logic orchestration.
//!
//! [`RegistrationService`] runs the upload-then-insert submission flow,
//! listing, statistics and payment-status changes. [`AdminAuthService`]
//! handles the admin username/password login.

pub mod admin_service;
pub mod registration_service;

pub use admin_service::{AdminAuthService, AdminLogin};
pub use registration_service::RegistrationService;
