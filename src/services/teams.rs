//! Maintenance teams service

use std::sync::Arc;

use crate::{error::AppResult, models::team::TeamWithMembers, repository::TeamsStore};

#[derive(Clone)]
pub struct TeamsService {
    store: Arc<dyn TeamsStore>,
}

impl TeamsService {
    pub fn new(store: Arc<dyn TeamsStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<TeamWithMembers>> {
        self.store.list_with_members().await
    }
}
