//! Maintenance teams repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::team::{MaintenanceTeam, TeamMemberRow, TeamWithMembers},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamsStore: Send + Sync {
    async fn list_with_members(&self) -> AppResult<Vec<TeamWithMembers>>;
}

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamsStore for TeamsRepository {
    async fn list_with_members(&self) -> AppResult<Vec<TeamWithMembers>> {
        let teams = sqlx::query_as::<_, MaintenanceTeam>(
            "SELECT id, name FROM maintenance_teams ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let members = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT tm.team_id, u.id AS user_id, u.name, u.email, u.role
            FROM team_members tm
            JOIN users u ON u.id = tm.user_id
            ORDER BY u.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(TeamWithMembers::group(teams, members))
    }
}
