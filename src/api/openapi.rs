//! OpenAPI document for the REST API.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::handlers::{admin, registration, system, zumba};

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "stax-gateway",
        description = "Event registration with manual bank-transfer verification."
    ),
    paths(
        system::health_handler,
        system::events_handler,
        registration::submit_registration,
        registration::list_registrations,
        registration::registration_stats,
        registration::update_registration_status,
        zumba::list_tiers,
        zumba::submit_zumba_registration,
        zumba::list_own_zumba_registrations,
        admin::login,
        admin::login_ready,
        admin::list_registrations,
        admin::stats,
        admin::update_registration_status,
        admin::list_zumba_registrations,
        admin::update_zumba_registration_status,
    ),
    modifiers(&BearerSchemes),
    tags(
        (name = "System", description = "Health and catalog"),
        (name = "Registrations", description = "ZIN gathering registrations"),
        (name = "Zumba", description = "Power Duo Zumba registrations"),
        (name = "Admin", description = "Admin login and verification dashboard"),
    )
)]
pub struct ApiDoc;

/// Registers the `identity` and `admin` bearer schemes.
#[derive(Debug)]
struct BearerSchemes;

impl Modify for BearerSchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        for name in ["identity", "admin"] {
            components.add_security_scheme(
                name,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_admin_login() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/admin/login"));
        assert!(doc.paths.paths.contains_key("/api/registrations/{id}/status"));
    }
}
