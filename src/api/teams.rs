//! Maintenance team endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::team::TeamWithMembers};

use super::AuthenticatedUser;

/// List maintenance teams with their members
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Teams", body = Vec<TeamWithMembers>)
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<TeamWithMembers>>> {
    Ok(Json(state.services.teams.list().await?))
}
