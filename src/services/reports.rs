//! Reporting aggregator

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::report::{CategoryReport, TeamReport, TypeReport},
    repository::ReportsStore,
};

#[derive(Clone)]
pub struct ReportsService {
    store: Arc<dyn ReportsStore>,
}

impl ReportsService {
    pub fn new(store: Arc<dyn ReportsStore>) -> Self {
        Self { store }
    }

    /// Every team with per-status counts, busiest first
    pub async fn by_team(&self) -> AppResult<Vec<TeamReport>> {
        self.store.by_team().await
    }

    /// Per-category counts; equipment without a category is left out
    pub async fn by_category(&self) -> AppResult<Vec<CategoryReport>> {
        self.store.by_category().await
    }

    pub async fn by_type(&self) -> AppResult<Vec<TypeReport>> {
        self.store.by_type().await
    }
}
