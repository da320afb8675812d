//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in `inbound::http`, the envelope
//! schemas from `inbound::http::schemas`, and the bearer token scheme used by
//! the protected routes. Swagger UI serves it under `/docs` in debug builds.

use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, LoginResponseSchema, MessageResponseSchema, ProfileResponseSchema,
    TaskListResponseSchema, TaskResponseSchema,
};
use crate::inbound::http::tasks::{TaskRequest, TaskView};
use crate::inbound::http::users::{LoginRequest, LoginUserView, SignupRequest, UserView};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme applied to protected routes.
pub const BEARER_SCHEME: &str = "BearerToken";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token from POST /login; the `Bearer` prefix is optional.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Task board API",
        description = "Accounts with token authentication and per-user task lists."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::profile,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCodeSchema,
        MessageResponseSchema,
        LoginResponseSchema,
        ProfileResponseSchema,
        TaskListResponseSchema,
        TaskResponseSchema,
        SignupRequest,
        LoginRequest,
        TaskRequest,
        UserView,
        LoginUserView,
        TaskView,
    )),
    tags(
        (name = "users", description = "Signup, login and profile"),
        (name = "tasks", description = "Tasks owned by the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
