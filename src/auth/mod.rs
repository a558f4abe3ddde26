//! Authentication: admin passwords and tokens, identity-provider sessions.
//!
//! Two independent mechanisms coexist:
//!
//! - **Admin login** ([`password`], [`admin_token`]): username and bcrypt
//!   password against the `admins` table, answered with a 24 hour JWT.
//! - **Identity provider** ([`identity`]): end users sign in elsewhere and
//!   present the provider's token; the service only verifies it.

pub mod admin_token;
pub mod extract;
pub mod identity;
pub mod password;

pub use admin_token::{ADMIN_ROLE, AdminClaims, AdminTokenService, TokenError};
pub use extract::AdminSession;
pub use identity::IdentityVerifier;
pub use password::{hash_password, hash_password_with_cost, verify_password};
