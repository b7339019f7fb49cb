//! Equipment repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RequestStatus,
        equipment::{CreateEquipment, Equipment, EquipmentWithCount, UpdateEquipment},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// All equipment with open request counts, newest first
    async fn list(&self) -> AppResult<Vec<EquipmentWithCount>>;

    async fn get_by_id(&self, id: i32) -> AppResult<EquipmentWithCount>;

    async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment>;

    /// Apply the supplied fields only
    async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment>;

    /// Current owning team, `None` when the equipment is unknown or unassigned
    async fn maintenance_team_of(&self, id: i32) -> AppResult<Option<i32>>;
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentStore for EquipmentRepository {
    async fn list(&self) -> AppResult<Vec<EquipmentWithCount>> {
        let rows = sqlx::query_as::<_, EquipmentWithCount>(
            r#"
            SELECT e.*, COUNT(r.id) FILTER (WHERE r.status <> $1) AS open_request_count
            FROM equipment e
            LEFT JOIN maintenance_requests r ON r.equipment_id = e.id
            GROUP BY e.id
            ORDER BY e.id DESC
            "#,
        )
        .bind(RequestStatus::Repaired)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<EquipmentWithCount> {
        sqlx::query_as::<_, EquipmentWithCount>(
            r#"
            SELECT e.*, COUNT(r.id) FILTER (WHERE r.status <> $1) AS open_request_count
            FROM equipment e
            LEFT JOIN maintenance_requests r ON r.equipment_id = e.id
            WHERE e.id = $2
            GROUP BY e.id
            "#,
        )
        .bind(RequestStatus::Repaired)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, serial_number, category, purchase_date, warranty_info,
                location, department, assigned_employee, maintenance_team_id, is_scrapped
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, FALSE))
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(&data.category)
        .bind(data.purchase_date)
        .bind(&data.warranty_info)
        .bind(&data.location)
        .bind(&data.department)
        .bind(&data.assigned_employee)
        .bind(data.maintenance_team_id)
        .bind(data.is_scrapped)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
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

        add_field!(data.name, "name");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.category, "category");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.warranty_info, "warranty_info");
        add_field!(data.location, "location");
        add_field!(data.department, "department");
        add_field!(data.assigned_employee, "assigned_employee");
        add_field!(data.maintenance_team_id, "maintenance_team_id");
        // The flag only ever moves from false to true
        if data.is_scrapped.is_some() {
            sets.push(format!("is_scrapped = (is_scrapped OR ${})", idx));
            idx += 1;
        }

        if sets.is_empty() {
            return Err(AppError::Validation("No updates provided".to_string()));
        }

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.serial_number);
        bind_field!(data.category);
        bind_field!(data.purchase_date);
        bind_field!(data.warranty_info);
        bind_field!(data.location);
        bind_field!(data.department);
        bind_field!(data.assigned_employee);
        bind_field!(data.maintenance_team_id);
        bind_field!(data.is_scrapped);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    async fn maintenance_team_of(&self, id: i32) -> AppResult<Option<i32>> {
        let team: Option<Option<i32>> = sqlx::query_scalar(
            "SELECT maintenance_team_id FROM equipment WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(team.flatten())
    }
}
