//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: Option<String>,
    /// Manufacturer serial, unique across the registry
    pub serial_number: Option<String>,
    pub category: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_info: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    /// Employee using the asset (free text)
    pub assigned_employee: Option<String>,
    /// Team responsible for servicing the asset
    pub maintenance_team_id: Option<i32>,
    /// Set once a scrap request retires the asset; never cleared
    pub is_scrapped: bool,
}

/// Equipment annotated with its number of open (non-repaired) requests
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct EquipmentWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub equipment: Equipment,
    pub open_request_count: i64,
}

/// Create equipment request. Missing fields are stored as null.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateEquipment {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "super::blank_date")]
    pub purchase_date: Option<NaiveDate>,
    pub warranty_info: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub assigned_employee: Option<String>,
    pub maintenance_team_id: Option<i32>,
    pub is_scrapped: Option<bool>,
}

/// Partial equipment update.
///
/// The outer `Option` tells whether the field was sent at all; an explicit
/// `null` clears the column.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub serial_number: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::blank_date_patch")]
    #[schema(value_type = Option<NaiveDate>)]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub warranty_info: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub department: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub assigned_employee: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub maintenance_team_id: Option<Option<i32>>,
    /// Only `true` has an effect; a scrapped asset stays scrapped
    pub is_scrapped: Option<bool>,
}

impl UpdateEquipment {
    /// True when no recognized field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.serial_number.is_none()
            && self.category.is_none()
            && self.purchase_date.is_none()
            && self.warranty_info.is_none()
            && self.location.is_none()
            && self.department.is_none()
            && self.assigned_employee.is_none()
            && self.maintenance_team_id.is_none()
            && self.is_scrapped.is_none()
    }
}
