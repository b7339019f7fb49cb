//! API handlers for GearGuard REST endpoints

pub mod auth;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod requests;
pub mod teams;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        let token = match auth_header.split_once(' ') {
            Some(("Bearer", token)) if !token.trim().is_empty() => token.trim(),
            _ => {
                return Err(AppError::Authentication(
                    "Invalid authorization header format".to_string(),
                ))
            }
        };

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // The dashboard is served from its own origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/login", axum::routing::post(auth::login))
        .route("/auth/me", get(auth::me))
        // Equipment
        .route("/equipment", get(equipment::list_equipment).post(equipment::create_equipment))
        .route("/equipment/:id", get(equipment::get_equipment).put(equipment::update_equipment))
        // Maintenance requests
        .route("/requests", get(requests::list_requests).post(requests::create_request))
        .route("/requests/:id", get(requests::get_request).put(requests::update_request))
        // Reports
        .route("/reports/by-team", get(reports::by_team))
        .route("/reports/by-category", get(reports::by_category))
        .route("/reports/by-type", get(reports::by_type))
        // Teams
        .route("/teams", get(teams::list_teams))
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
