use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{equipment, maintenance_events, sites};

pub mod migrator;
pub mod repositories;

pub use repositories::equipment::{EquipmentCounts, NewEquipment};
pub use repositories::maintenance::{MaintenanceCounts, NewMaintenanceEvent};
pub use repositories::user::User;

/// Facade over the sea-orm connection pool. Each request borrows a pooled
/// connection; there are no cross-request transactions and no retry policy.
/// A failed query is reported to the resolution layer as-is.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn equipment_repo(&self) -> repositories::equipment::EquipmentRepository {
        repositories::equipment::EquipmentRepository::new(self.conn.clone())
    }

    fn site_repo(&self) -> repositories::site::SiteRepository {
        repositories::site::SiteRepository::new(self.conn.clone())
    }

    fn maintenance_repo(&self) -> repositories::maintenance::MaintenanceRepository {
        repositories::maintenance::MaintenanceRepository::new(self.conn.clone())
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    /// Verify a password against the stored Argon2id hash, returning the
    /// user on success and `None` on mismatch or unknown username.
    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn list_equipment(&self) -> Result<Vec<equipment::Model>> {
        self.equipment_repo().list().await
    }

    pub async fn create_equipment(&self, input: NewEquipment) -> Result<equipment::Model> {
        self.equipment_repo().create(input).await
    }

    pub async fn equipment_counts(&self) -> Result<EquipmentCounts> {
        self.equipment_repo().counts().await
    }

    pub async fn list_sites(&self) -> Result<Vec<sites::Model>> {
        self.site_repo().list().await
    }

    pub async fn list_maintenance_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<maintenance_events::Model>> {
        self.maintenance_repo().list_between(start, end).await
    }

    pub async fn add_maintenance_event(
        &self,
        input: NewMaintenanceEvent,
    ) -> Result<maintenance_events::Model> {
        self.maintenance_repo().add(input).await
    }

    pub async fn maintenance_counts(&self) -> Result<MaintenanceCounts> {
        self.maintenance_repo().counts().await
    }
}
