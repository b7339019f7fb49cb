//! Aggregate report queries. Everything is computed on read.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::report::{CategoryReport, TeamReport, TypeReport},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsStore: Send + Sync {
    async fn by_team(&self) -> AppResult<Vec<TeamReport>>;
    async fn by_category(&self) -> AppResult<Vec<CategoryReport>>;
    async fn by_type(&self) -> AppResult<Vec<TypeReport>>;
}

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Postgres>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportsStore for ReportsRepository {
    async fn by_team(&self) -> AppResult<Vec<TeamReport>> {
        let rows = sqlx::query_as::<_, TeamReport>(
            r#"
            SELECT mt.id AS team_id,
                   mt.name AS team_name,
                   COUNT(r.id) AS request_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'new') AS new_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'in_progress') AS in_progress_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'repaired') AS repaired_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'scrap') AS scrap_count
            FROM maintenance_teams mt
            LEFT JOIN maintenance_requests r ON r.maintenance_team_id = mt.id
            GROUP BY mt.id, mt.name
            ORDER BY request_count DESC, mt.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn by_category(&self) -> AppResult<Vec<CategoryReport>> {
        let rows = sqlx::query_as::<_, CategoryReport>(
            r#"
            SELECT e.category,
                   COUNT(r.id) AS request_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'new') AS new_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'in_progress') AS in_progress_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'repaired') AS repaired_count,
                   COUNT(r.id) FILTER (WHERE r.status = 'scrap') AS scrap_count,
                   COUNT(r.id) FILTER (WHERE r.request_type = 'corrective') AS corrective_count,
                   COUNT(r.id) FILTER (WHERE r.request_type = 'preventive') AS preventive_count
            FROM equipment e
            LEFT JOIN maintenance_requests r ON r.equipment_id = e.id
            WHERE e.category IS NOT NULL
            GROUP BY e.category
            ORDER BY request_count DESC, e.category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn by_type(&self) -> AppResult<Vec<TypeReport>> {
        let rows = sqlx::query_as::<_, TypeReport>(
            r#"
            SELECT request_type,
                   COUNT(*) AS count,
                   COUNT(*) FILTER (WHERE status = 'new') AS new_count,
                   COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress_count,
                   COUNT(*) FILTER (WHERE status = 'repaired') AS repaired_count,
                   COUNT(*) FILTER (WHERE status = 'scrap') AS scrap_count
            FROM maintenance_requests
            GROUP BY request_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
