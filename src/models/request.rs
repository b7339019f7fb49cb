//! Maintenance request model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{RequestStatus, RequestType};

/// Maintenance request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub subject: Option<String>,
    pub request_type: Option<RequestType>,
    pub equipment_id: Option<i32>,
    /// Copied from the equipment when the request is created
    pub maintenance_team_id: Option<i32>,
    /// User id of the technician working the request
    pub assigned_technician: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub duration_hours: Option<f64>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Request as shown on the board and calendar
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct MaintenanceRequestDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub equipment_name: Option<String>,
    pub technician_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Create maintenance request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateMaintenanceRequest {
    pub subject: Option<String>,
    pub request_type: Option<RequestType>,
    pub equipment_id: Option<i32>,
    /// Ignored when `equipment_id` is set
    pub maintenance_team_id: Option<i32>,
    pub assigned_technician: Option<i32>,
    #[serde(default, deserialize_with = "super::blank_date")]
    pub scheduled_date: Option<NaiveDate>,
    pub duration_hours: Option<f64>,
    /// Defaults to `new`
    pub status: Option<RequestStatus>,
}

/// Partial maintenance request update (see [`super::equipment::UpdateEquipment`]
/// for the null/absent convention)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMaintenanceRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub subject: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<RequestType>)]
    pub request_type: Option<Option<RequestType>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub equipment_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub maintenance_team_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub assigned_technician: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::blank_date_patch")]
    #[schema(value_type = Option<NaiveDate>)]
    pub scheduled_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub duration_hours: Option<Option<f64>>,
    pub status: Option<RequestStatus>,
}

impl UpdateMaintenanceRequest {
    /// True when no recognized field was supplied
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.request_type.is_none()
            && self.equipment_id.is_none()
            && self.maintenance_team_id.is_none()
            && self.assigned_technician.is_none()
            && self.scheduled_date.is_none()
            && self.duration_hours.is_none()
            && self.status.is_none()
    }

    /// Equipment to flag scrapped when this update moves the request to
    /// `scrap`: the supplied equipment, else the one stored on the request.
    pub fn scrap_target(&self, stored_equipment: Option<i32>) -> Option<i32> {
        if self.status != Some(RequestStatus::Scrap) {
            return None;
        }
        match self.equipment_id {
            Some(Some(equipment_id)) => Some(equipment_id),
            _ => stored_equipment,
        }
    }
}

/// Request list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RequestQuery {
    /// Only return requests in this status
    #[serde(default, deserialize_with = "super::blank_as_none")]
    pub status: Option<RequestStatus>,
}
