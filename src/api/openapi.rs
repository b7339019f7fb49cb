//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, equipment, health, reports, requests, teams};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "0.3.0",
        description = "Equipment maintenance tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        // Requests
        requests::list_requests,
        requests::get_request,
        requests::create_request,
        requests::update_request,
        // Reports
        reports::by_team,
        reports::by_category,
        reports::by_type,
        // Teams
        teams::list_teams,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::User,
            crate::models::user::UserClaims,
            crate::models::enums::Role,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentWithCount,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Requests
            crate::models::enums::RequestStatus,
            crate::models::enums::RequestType,
            crate::models::request::MaintenanceRequest,
            crate::models::request::MaintenanceRequestDetails,
            crate::models::request::CreateMaintenanceRequest,
            crate::models::request::UpdateMaintenanceRequest,
            // Reports
            crate::models::report::TeamReport,
            crate::models::report::CategoryReport,
            crate::models::report::TypeReport,
            // Teams
            crate::models::team::TeamWithMembers,
            crate::models::team::TeamMember,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment registry"),
        (name = "requests", description = "Maintenance request workflow"),
        (name = "reports", description = "Aggregate reports"),
        (name = "teams", description = "Maintenance teams")
    )
)]
pub struct ApiDoc;

/// Declares the `bearer_auth` scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
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

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
