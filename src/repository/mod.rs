//! Repository layer for database operations
//!
//! Each sub-repository implements a store trait; services only see the
//! traits so they can be exercised against mocks.

pub mod equipment;
pub mod reports;
pub mod requests;
pub mod teams;
pub mod users;

use sqlx::{Pool, Postgres};

pub use equipment::EquipmentStore;
pub use reports::ReportsStore;
pub use requests::RequestsStore;
pub use teams::TeamsStore;
pub use users::UsersStore;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub requests: requests::RequestsRepository,
    pub reports: reports::ReportsRepository,
    pub teams: teams::TeamsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            teams: teams::TeamsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query to check the database is reachable
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
