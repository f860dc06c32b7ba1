use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, AppState};
use crate::api::resolve::{self, Resolved, SourcedJson};
use crate::api::types::{EquipmentCreate, EquipmentResponse};

/// GET /api/equipment
pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
) -> Result<SourcedJson<Vec<EquipmentResponse>>, ApiError> {
    let outcome = match state.store() {
        Some(store) => Some(store.list_equipment().await.map(|rows| {
            rows.into_iter()
                .map(EquipmentResponse::from)
                .collect::<Vec<_>>()
        })),
        None => None,
    };

    let resolved = resolve::degrade_read(state.fallback_enabled(), "equipment_list", outcome, || {
        state
            .fallback()
            .equipment
            .iter()
            .map(EquipmentResponse::from)
            .collect()
    })?;

    Ok(SourcedJson(resolved))
}

/// POST /api/equipment
///
/// Persists when a store is available. In fallback mode the write is not
/// persisted: the submitted fields are echoed back under the fixed synthetic
/// id, and the degraded source is visible in the X-Data-Source header.
pub async fn create_equipment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EquipmentCreate>,
) -> Result<SourcedJson<EquipmentResponse>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Equipment name is required"));
    }

    if let Some(store) = state.store() {
        match store.create_equipment(payload.clone().into()).await {
            Ok(model) => return Ok(SourcedJson(Resolved::live(model.into()))),
            Err(e) => {
                if !state.fallback_enabled() {
                    return Err(ApiError::StoreUnavailable(format!("{e:#}")));
                }
                warn!("Equipment insert failed, echoing unpersisted payload: {e:#}");
                metrics::counter!("fallback_responses_total", "endpoint" => "equipment_create")
                    .increment(1);
            }
        }
    }

    Ok(SourcedJson(Resolved::fallback(EquipmentResponse::echo(
        payload,
    ))))
}
