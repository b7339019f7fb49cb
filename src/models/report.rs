//! Aggregate report rows

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::RequestType;

/// Request counts for one maintenance team
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct TeamReport {
    pub team_id: i32,
    pub team_name: String,
    pub request_count: i64,
    pub new_count: i64,
    pub in_progress_count: i64,
    pub repaired_count: i64,
    pub scrap_count: i64,
}

/// Request counts for one equipment category
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct CategoryReport {
    pub category: String,
    pub request_count: i64,
    pub new_count: i64,
    pub in_progress_count: i64,
    pub repaired_count: i64,
    pub scrap_count: i64,
    pub corrective_count: i64,
    pub preventive_count: i64,
}

/// Request counts for one request type
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct TypeReport {
    /// `null` groups requests created without a type
    pub request_type: Option<RequestType>,
    pub count: i64,
    pub new_count: i64,
    pub in_progress_count: i64,
    pub repaired_count: i64,
    pub scrap_count: i64,
}
