//! Maintenance request workflow

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RequestStatus,
        request::{
            CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
            UpdateMaintenanceRequest,
        },
    },
    repository::{EquipmentStore, RequestsStore},
};

#[derive(Clone)]
pub struct RequestsService {
    requests: Arc<dyn RequestsStore>,
    equipment: Arc<dyn EquipmentStore>,
}

impl RequestsService {
    pub fn new(requests: Arc<dyn RequestsStore>, equipment: Arc<dyn EquipmentStore>) -> Self {
        Self { requests, equipment }
    }

    pub async fn list(&self, status: Option<RequestStatus>) -> AppResult<Vec<MaintenanceRequestDetails>> {
        self.requests.list(status).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        self.requests.get_by_id(id).await
    }

    /// Create a request. With an equipment reference the owning team always
    /// comes from that equipment, whatever the client sent.
    pub async fn create(&self, data: &CreateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        let mut data = data.clone();
        if let Some(equipment_id) = data.equipment_id {
            data.maintenance_team_id = self.equipment.maintenance_team_of(equipment_id).await?;
        }
        if data.status.is_none() {
            data.status = Some(RequestStatus::New);
        }

        let request = self.requests.create(&data).await?;
        tracing::info!(
            request_id = request.id,
            equipment_id = ?request.equipment_id,
            team_id = ?request.maintenance_team_id,
            "Opened maintenance request"
        );
        Ok(request)
    }

    /// Partial update. Moving a request to `scrap` also flags its equipment
    /// as scrapped, atomically with the status change.
    pub async fn update(&self, id: i32, data: &UpdateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        if data.is_empty() {
            return Err(AppError::Validation("No updates provided".to_string()));
        }
        self.requests.update(id, data).await
    }
}
