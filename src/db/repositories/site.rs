use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::sites;

pub struct SiteRepository {
    conn: DatabaseConnection,
}

impl SiteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<sites::Model>> {
        sites::Entity::find()
            .order_by_asc(sites::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list sites")
    }
}
