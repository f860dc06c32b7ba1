use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::maintenance_events;

/// Input for persisting a maintenance event.
#[derive(Debug, Clone)]
pub struct NewMaintenanceEvent {
    pub title: String,
    pub start: String,
    pub end: String,
    pub equipment_id: Option<i32>,
    pub equipment_name: Option<String>,
    pub kind: String,
    pub status: String,
    pub technician: Option<String>,
    pub description: Option<String>,
}

/// Maintenance counts used by the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceCounts {
    pub pending: u64,
    pub completed: u64,
}

pub struct MaintenanceRepository {
    conn: DatabaseConnection,
}

impl MaintenanceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// List events whose start falls inside the given range.
    /// Bounds must be RFC 3339 strings normalized to UTC, as stored.
    pub async fn list_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<maintenance_events::Model>> {
        maintenance_events::Entity::find()
            .filter(maintenance_events::Column::Start.gte(start))
            .filter(maintenance_events::Column::Start.lte(end))
            .order_by_asc(maintenance_events::Column::Start)
            .all(&self.conn)
            .await
            .context("Failed to query maintenance events")
    }

    pub async fn add(&self, input: NewMaintenanceEvent) -> Result<maintenance_events::Model> {
        let active = maintenance_events::ActiveModel {
            title: Set(input.title),
            start: Set(normalize_utc(&input.start)?),
            end: Set(normalize_utc(&input.end)?),
            equipment_id: Set(input.equipment_id),
            equipment_name: Set(input.equipment_name),
            kind: Set(input.kind),
            status: Set(input.status),
            technician: Set(input.technician),
            description: Set(input.description),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert maintenance event")
    }

    pub async fn counts(&self) -> Result<MaintenanceCounts> {
        let pending = self.count_with_status("scheduled").await?;
        let completed = self.count_with_status("completed").await?;

        Ok(MaintenanceCounts { pending, completed })
    }

    async fn count_with_status(&self, status: &str) -> Result<u64> {
        maintenance_events::Entity::find()
            .filter(maintenance_events::Column::Status.eq(status))
            .count(&self.conn)
            .await
            .with_context(|| format!("Failed to count maintenance events with status '{status}'"))
    }
}

/// Rewrite a timestamp into the canonical `+00:00` UTC form. Stored values
/// must share one suffix or the lexicographic range filter misorders
/// equal instants written as `Z` versus `+00:00`.
fn normalize_utc(raw: &str) -> Result<String> {
    let parsed = chrono::DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid RFC 3339 timestamp '{raw}'"))?;
    Ok(parsed.with_timezone(&chrono::Utc).to_rfc3339())
}
