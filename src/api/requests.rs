//! Maintenance request API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{
        CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails, RequestQuery,
        UpdateMaintenanceRequest,
    },
};

use super::AuthenticatedUser;

/// List maintenance requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<MaintenanceRequestDetails>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let requests = state.services.requests.list(query.status).await?;
    Ok(Json(requests))
}

/// Get a maintenance request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.requests.get_by_id(id).await?;
    Ok(Json(request))
}

/// Open a maintenance request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    claims.require_role(&state.config.access.request_create)?;
    let request = state.services.requests.create(&data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Update a maintenance request; `status: scrap` also scraps the equipment
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 400, description = "No recognized field supplied", body = crate::error::ErrorResponse),
        (status = 403, description = "Role not permitted", body = crate::error::ErrorResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenanceRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    claims.require_role(&state.config.access.request_update)?;
    let request = state.services.requests.update(id, &data).await?;
    Ok(Json(request))
}
