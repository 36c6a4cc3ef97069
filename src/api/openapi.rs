use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use super::handlers::{aus, auth, health, ApiMessage};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "auwiki",
        description = "Community backend for Alternate Universe submissions",
    ),
    paths(
        health::health,
        auth::register,
        auth::login,
        aus::list,
        aus::create,
        aus::delete,
    ),
    components(schemas(
        ApiMessage,
        auth::types::Credentials,
        auth::types::LoginResponse,
        aus::types::Au,
        aus::types::NewAu,
        aus::types::AuCreated,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "aus", description = "Community AU submissions"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
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
    fn openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/auth/register"));
        assert!(paths.contains_key("/auth/login"));
        assert!(paths.contains_key("/aus"));
        assert!(paths.contains_key("/aus/{id}"));
    }

    #[test]
    fn openapi_registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components should exist");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
