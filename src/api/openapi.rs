//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{admin_handler, application_handler, event_handler};
use crate::domain::{
    AdminApplicationView, Application, ApplicationStatus, ApplicationWithEvent, Event,
    EventSummary, UserSummary,
};
use crate::services::{DashboardSummary, StatusCounts};

/// OpenAPI documentation for the registration API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trailhead",
        version = "0.1.0",
        description = "Camping event registration API with applicant submissions and admin review",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Event endpoints
        event_handler::list_events,
        event_handler::get_event,
        // Application endpoints
        application_handler::list_my_applications,
        application_handler::get_my_application,
        application_handler::submit_application,
        application_handler::update_my_application,
        application_handler::delete_my_application,
        // Admin endpoints
        admin_handler::list_applications,
        admin_handler::get_application,
        admin_handler::update_status,
        admin_handler::dashboard,
    ),
    components(
        schemas(
            // Domain types
            ApplicationStatus,
            Application,
            ApplicationWithEvent,
            AdminApplicationView,
            Event,
            EventSummary,
            UserSummary,
            DashboardSummary,
            StatusCounts,
            // Request types
            application_handler::SubmitApplicationRequest,
            application_handler::UpdateApplicationRequest,
            admin_handler::StatusUpdateRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Events", description = "Public event catalog"),
        (name = "Applications", description = "Applicant-owned application lifecycle"),
        (name = "Admin", description = "Application review and dashboard")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for bearer session tokens
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
                        .description(Some("Session token issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
