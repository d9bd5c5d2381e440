//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every post, engagement and health endpoint together
//! with the response DTOs and the bearer-token security scheme. The document
//! backs Swagger UI (debug builds) and the `openapi-dump` binary.

use crate::inbound::http::posts_dto::{
    CommentResponse, LikeResponse, MessageResponse, PostResponse, TextRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the accepted token schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "LegacyToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "x-auth-token",
                "Same token as BearerToken, for older clients.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Postboard API",
        description = "Posts with likes and comments behind bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = []), ("LegacyToken" = [])),
    paths(
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::engagement::like_post,
        crate::inbound::http::engagement::dislike_post,
        crate::inbound::http::engagement::add_comment,
        crate::inbound::http::engagement::delete_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TextRequest,
        PostResponse,
        LikeResponse,
        CommentResponse,
        MessageResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "posts", description = "Publishing, reading and deleting posts"),
        (name = "engagement", description = "Likes and comments on posts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
