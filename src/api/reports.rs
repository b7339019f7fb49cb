//! Report endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::report::{CategoryReport, TeamReport, TypeReport},
};

use super::AuthenticatedUser;

/// Request counts per maintenance team
#[utoipa::path(
    get,
    path = "/reports/by-team",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts per team, busiest first", body = Vec<TeamReport>)
    )
)]
pub async fn by_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<TeamReport>>> {
    Ok(Json(state.services.reports.by_team().await?))
}

/// Request counts per equipment category
#[utoipa::path(
    get,
    path = "/reports/by-category",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts per category", body = Vec<CategoryReport>)
    )
)]
pub async fn by_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<CategoryReport>>> {
    Ok(Json(state.services.reports.by_category().await?))
}

/// Request counts per request type
#[utoipa::path(
    get,
    path = "/reports/by-type",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts per type", body = Vec<TypeReport>)
    )
)]
pub async fn by_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<TypeReport>>> {
    Ok(Json(state.services.reports.by_type().await?))
}
