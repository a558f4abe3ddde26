//! Domain layer: registrations, payment status, prices, and identities.
//!
//! Everything here is plain data plus the few pure rules the workflow
//! relies on: ticket totals, the pending-on-creation guarantee, dashboard
//! statistics, and the admin display heuristic.

pub mod admin;
pub mod payment_status;
pub mod pricing;
pub mod registration;
pub mod registration_id;
pub mod stats;
pub mod user;
pub mod zumba;

pub use admin::{AdminAccount, AdminProfile};
pub use payment_status::{PaymentStatus, StatusFilter};
pub use pricing::{TicketPricing, ZIN_GATHERING_PRICING};
pub use registration::{NewRegistration, NewZumbaRegistration, Registration, ZumbaRegistration};
pub use registration_id::RegistrationId;
pub use stats::{DashboardStats, RevenueBasis};
pub use user::SessionUser;
pub use zumba::ZumbaTier;
