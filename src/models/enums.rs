//! Shared domain enums stored as TEXT columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements string conversions and TEXT column encoding for a unit enum.
macro_rules! text_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err(format!("Invalid {} value: {}", stringify!($ty), other)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Static user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Technician,
    Manager,
}

text_enum!(Role {
    User => "user",
    Technician => "technician",
    Manager => "manager",
});

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a maintenance request. `Scrap` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    New,
    InProgress,
    Repaired,
    Scrap,
}

text_enum!(RequestStatus {
    New => "new",
    InProgress => "in_progress",
    Repaired => "repaired",
    Scrap => "scrap",
});

// ---------------------------------------------------------------------------
// RequestType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Reactive repair after a breakdown
    Corrective,
    /// Scheduled upkeep
    Preventive,
}

text_enum!(RequestType {
    Corrective => "corrective",
    Preventive => "preventive",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_matches_serde() {
        for status in [
            RequestStatus::New,
            RequestStatus::InProgress,
            RequestStatus::Repaired,
            RequestStatus::Scrap,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_stored_text_matches_report_filters() {
        let statuses = [
            RequestStatus::New,
            RequestStatus::InProgress,
            RequestStatus::Repaired,
            RequestStatus::Scrap,
        ]
        .map(|status| status.as_str());
        assert_eq!(statuses, ["new", "in_progress", "repaired", "scrap"]);

        let types = [RequestType::Corrective, RequestType::Preventive].map(|kind| kind.as_str());
        assert_eq!(types, ["corrective", "preventive"]);
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("admin".parse::<Role>().is_err());
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
    }
}
