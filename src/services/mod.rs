//! Business logic services

pub mod auth;
pub mod equipment;
pub mod reports;
pub mod requests;
pub mod teams;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
    pub reports: reports::ReportsService,
    pub teams: teams::TeamsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let equipment_store = Arc::new(repository.equipment.clone());
        Self {
            auth: auth::AuthService::new(Arc::new(repository.users.clone()), auth_config),
            equipment: equipment::EquipmentService::new(equipment_store.clone()),
            requests: requests::RequestsService::new(
                Arc::new(repository.requests.clone()),
                equipment_store,
            ),
            reports: reports::ReportsService::new(Arc::new(repository.reports.clone())),
            teams: teams::TeamsService::new(Arc::new(repository.teams.clone())),
            repository,
        }
    }

    /// Liveness check against storage
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        self.repository.ping().await
    }
}
