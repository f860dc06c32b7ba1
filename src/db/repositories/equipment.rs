use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::equipment;

/// Input for creating an equipment row.
#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub location: Option<String>,
    pub site_id: Option<i32>,
    pub production_line_id: Option<i32>,
}

/// Equipment counts grouped by status.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentCounts {
    pub total: u64,
    pub active: u64,
    pub maintenance: u64,
    pub out_of_service: u64,
}

pub struct EquipmentRepository {
    conn: DatabaseConnection,
}

impl EquipmentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<equipment::Model>> {
        equipment::Entity::find()
            .order_by_asc(equipment::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list equipment")
    }

    pub async fn create(&self, input: NewEquipment) -> Result<equipment::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = equipment::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            status: Set(input.status),
            location: Set(input.location),
            site_id: Set(input.site_id),
            production_line_id: Set(input.production_line_id),
            created_at: Set(Some(now.clone())),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert equipment")
    }

    pub async fn counts(&self) -> Result<EquipmentCounts> {
        let total = equipment::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count equipment")?;

        let active = self.count_with_status("active").await?;
        let maintenance = self.count_with_status("maintenance").await?;
        let out_of_service = self.count_with_status("out_of_service").await?;

        Ok(EquipmentCounts {
            total,
            active,
            maintenance,
            out_of_service,
        })
    }

    async fn count_with_status(&self, status: &str) -> Result<u64> {
        equipment::Entity::find()
            .filter(equipment::Column::Status.eq(status))
            .count(&self.conn)
            .await
            .with_context(|| format!("Failed to count equipment with status '{status}'"))
    }
}
