//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{AuthResponse, LoginRequest, RegisterRequest};
use domain::CollaboratorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::collaborator_handler::get_current_collaborator,
    ),
    components(schemas(RegisterRequest, LoginRequest, AuthResponse, CollaboratorResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Collaborator registration and login"),
        (name = "Collaborators", description = "Authenticated collaborator endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
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
