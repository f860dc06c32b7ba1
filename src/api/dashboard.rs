use axum::extract::State;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::resolve::{self, SourcedJson};
use crate::api::types::DashboardStats;
use crate::db::Store;

/// GET /api/dashboard/stats
///
/// Pure read-side aggregation, recomputed per request. The store path counts
/// equipment rows by status and maintenance events by pending/completed; the
/// fallback path serves the fixed literals.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<SourcedJson<DashboardStats>, ApiError> {
    let outcome = match state.store() {
        Some(store) => Some(compute_stats(store).await),
        None => None,
    };

    let resolved = resolve::degrade_read(state.fallback_enabled(), "dashboard_stats", outcome, || {
        DashboardStats::from(state.fallback().stats)
    })?;

    Ok(SourcedJson(resolved))
}

async fn compute_stats(store: &Store) -> anyhow::Result<DashboardStats> {
    let equipment = store.equipment_counts().await?;
    let maintenance = store.maintenance_counts().await?;

    Ok(DashboardStats {
        total_equipment: equipment.total,
        active_equipment: equipment.active,
        maintenance_equipment: equipment.maintenance,
        out_of_service_equipment: equipment.out_of_service,
        pending_maintenances: maintenance.pending,
        completed_maintenances: maintenance.completed,
    })
}
