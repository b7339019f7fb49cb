//! Equipment service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentWithCount, UpdateEquipment},
    repository::EquipmentStore,
};

#[derive(Clone)]
pub struct EquipmentService {
    store: Arc<dyn EquipmentStore>,
}

impl EquipmentService {
    pub fn new(store: Arc<dyn EquipmentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentWithCount>> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentWithCount> {
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let equipment = self.store.create(data).await?;
        tracing::info!(equipment_id = equipment.id, "Registered equipment");
        Ok(equipment)
    }

    /// Partial update; rejects payloads without any recognized field
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        if data.is_empty() {
            return Err(AppError::Validation("No updates provided".to_string()));
        }
        self.store.update(id, data).await
    }
}
