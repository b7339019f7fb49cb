//! Data models for GearGuard

pub mod enums;
pub mod equipment;
pub mod report;
pub mod request;
pub mod team;
pub mod user;

use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer};
use std::{fmt::Display, str::FromStr};

// Re-export commonly used types
pub use enums::{RequestStatus, RequestType, Role};
pub use equipment::{Equipment, EquipmentWithCount};
pub use request::{MaintenanceRequest, MaintenanceRequestDetails};
pub use team::TeamWithMembers;
pub use user::{User, UserClaims};

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (date part kept).
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| format!("Invalid date: {}", s))
}

/// Optional date where a blank string counts as missing.
pub(crate) fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s).map(Some).map_err(de::Error::custom),
    }
}

/// Patch form of [`blank_date`]: an absent field stays `None` (via
/// `#[serde(default)]`), while `null` or `""` becomes `Some(None)`.
pub(crate) fn blank_date_patch<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_date(deserializer).map(Some)
}

/// Query-string value where `?status=` means no filter.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}
