//! Data Transfer Objects for REST request/response serialization.
//!
//! Rupiah amounts are plain JSON integers. Multipart form schemas exist
//! only to describe upload endpoints in the OpenAPI document.

pub mod admin_dto;
pub mod common_dto;
pub mod registration_dto;
pub mod zumba_dto;

pub use admin_dto::*;
pub use common_dto::*;
pub use registration_dto::*;
pub use zumba_dto::*;
