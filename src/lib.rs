//! GearGuard Equipment Maintenance Tracker
//!
//! REST JSON API over PostgreSQL for registering equipment, tracking
//! maintenance requests through their lifecycle and reporting on workload.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
