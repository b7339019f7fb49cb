//! Maintenance requests repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RequestStatus,
        request::{
            CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
            UpdateMaintenanceRequest,
        },
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestsStore: Send + Sync {
    /// Requests joined with equipment and technician names, newest first
    async fn list(&self, status: Option<RequestStatus>) -> AppResult<Vec<MaintenanceRequestDetails>>;

    async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest>;

    /// Insert the request as given; team derivation happens in the service
    async fn create(&self, data: &CreateMaintenanceRequest) -> AppResult<MaintenanceRequest>;

    /// Apply the supplied fields. A move to `scrap` flags the target equipment
    /// (see [`UpdateMaintenanceRequest::scrap_target`]) in the same
    /// transaction, with the request row locked while it is resolved.
    async fn update(&self, id: i32, data: &UpdateMaintenanceRequest) -> AppResult<MaintenanceRequest>;
}

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestsStore for RequestsRepository {
    async fn list(&self, status: Option<RequestStatus>) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let rows = sqlx::query_as::<_, MaintenanceRequestDetails>(
            r#"
            SELECT r.*,
                   e.name AS equipment_name,
                   u.name AS technician_name,
                   u.avatar_url
            FROM maintenance_requests r
            LEFT JOIN equipment e ON r.equipment_id = e.id
            LEFT JOIN users u ON r.assigned_technician = u.id
            WHERE ($1::text IS NULL OR r.status = $1::text)
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>("SELECT * FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    async fn create(&self, data: &CreateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                subject, request_type, equipment_id, maintenance_team_id,
                assigned_technician, scheduled_date, duration_hours, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.subject)
        .bind(data.request_type)
        .bind(data.equipment_id)
        .bind(data.maintenance_team_id)
        .bind(data.assigned_technician)
        .bind(data.scheduled_date)
        .bind(data.duration_hours)
        .bind(data.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.subject, "subject");
        add_field!(data.request_type, "request_type");
        add_field!(data.equipment_id, "equipment_id");
        add_field!(data.maintenance_team_id, "maintenance_team_id");
        add_field!(data.assigned_technician, "assigned_technician");
        add_field!(data.scheduled_date, "scheduled_date");
        add_field!(data.duration_hours, "duration_hours");
        add_field!(data.status, "status");

        if sets.is_empty() {
            return Err(AppError::Validation("No updates provided".to_string()));
        }

        let query = format!(
            "UPDATE maintenance_requests SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.subject);
        bind_field!(data.request_type);
        bind_field!(data.equipment_id);
        bind_field!(data.maintenance_team_id);
        bind_field!(data.assigned_technician);
        bind_field!(data.scheduled_date);
        bind_field!(data.duration_hours);
        bind_field!(data.status);

        let mut tx = self.pool.begin().await?;

        let stored: Option<Option<i32>> = sqlx::query_scalar(
            "SELECT equipment_id FROM maintenance_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(stored_equipment) = stored else {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("Request {} not found", id)));
        };

        if let Some(equipment_id) = data.scrap_target(stored_equipment) {
            tracing::info!(request_id = id, equipment_id, "Scrapping equipment");
            sqlx::query("UPDATE equipment SET is_scrapped = TRUE WHERE id = $1")
                .bind(equipment_id)
                .execute(&mut *tx)
                .await?;
        }

        let row = builder.bind(id).fetch_optional(&mut *tx).await?;

        match row {
            Some(request) => {
                tx.commit().await?;
                Ok(request)
            }
            None => {
                tx.rollback().await?;
                Err(AppError::NotFound(format!("Request {} not found", id)))
            }
        }
    }
}
