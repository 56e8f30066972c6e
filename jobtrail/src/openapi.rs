//! OpenAPI documentation for the management API.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Security scheme for authenticated endpoints: a session JWT, sent either as
/// the session cookie or as a bearer token.
struct SessionTokenAddon;

impl Modify for SessionTokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "session_token".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token issued by `/authentication/login`. Browsers receive it as an \
                            HttpOnly cookie; API clients may instead send it in the `Authorization` header:\n\n\
                            ```\nAuthorization: Bearer YOUR_SESSION_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::applications::list_applications,
        api::handlers::applications::create_application,
        api::handlers::applications::get_application,
        api::handlers::applications::update_application,
        api::handlers::applications::delete_application,
        api::handlers::applications::status_summary,
        api::handlers::timelines::list_timeline,
        api::handlers::timelines::create_timeline_entry,
        api::handlers::timelines::latest_timeline_entry,
        api::handlers::timelines::update_timeline_entry,
        api::handlers::timelines::delete_timeline_entry,
        api::handlers::contacts::list_contacts,
        api::handlers::contacts::create_contact,
        api::handlers::contacts::get_contact,
        api::handlers::contacts::update_contact,
        api::handlers::contacts::delete_contact,
    ),
    components(schemas(
        api::models::auth::RegisterRequest,
        api::models::auth::LoginRequest,
        api::models::auth::AuthResponse,
        api::models::auth::AuthSuccessResponse,
        api::models::users::UserResponse,
        api::models::applications::ApplicationCreateRequest,
        api::models::applications::ApplicationUpdateRequest,
        api::models::applications::ApplicationResponse,
        api::models::applications::StatusCountResponse,
        api::models::timelines::TimelineEntryCreateRequest,
        api::models::timelines::TimelineEntryUpdateRequest,
        api::models::timelines::TimelineEntryResponse,
        api::models::contacts::ContactCreateRequest,
        api::models::contacts::ContactUpdateRequest,
        api::models::contacts::ContactResponse,
    )),
    modifiers(&SessionTokenAddon),
    tags(
        (name = "authentication", description = "Registration, login, and logout"),
        (name = "applications", description = "Job application tracking"),
        (name = "timeline", description = "Per-application status timeline"),
        (name = "contacts", description = "Networking contacts"),
    ),
    info(
        title = "jobtrail API",
        description = "Job application tracking service. All `/api/v1/*` endpoints require a session token."
    )
)]
pub struct ApiDoc;
