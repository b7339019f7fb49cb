//! Maintenance team model

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::Role;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct MaintenanceTeam {
    pub id: i32,
    pub name: String,
}

/// One membership row joined with the member's user record
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberRow {
    pub team_id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Team with the users working in it
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TeamWithMembers {
    pub id: i32,
    pub name: String,
    pub members: Vec<TeamMember>,
}

impl TeamWithMembers {
    /// Attach membership rows to their teams, keeping team order.
    /// Rows for unknown teams are dropped.
    pub fn group(teams: Vec<MaintenanceTeam>, rows: Vec<TeamMemberRow>) -> Vec<Self> {
        let mut grouped: Vec<Self> = teams
            .into_iter()
            .map(|t| Self { id: t.id, name: t.name, members: Vec::new() })
            .collect();

        for row in rows {
            if let Some(team) = grouped.iter_mut().find(|t| t.id == row.team_id) {
                team.members.push(TeamMember {
                    id: row.user_id,
                    name: row.name,
                    email: row.email,
                    role: row.role,
                });
            }
        }
        grouped
    }
}
