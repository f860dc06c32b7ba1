use axum::{Json, extract::State};
use std::sync::Arc;

use super::AppState;
use crate::api::types::{HealthResponse, RootResponse};

/// GET /
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Maintenance Platform API is running!".to_string(),
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_label(&state).to_string(),
    })
}

/// GET /health
///
/// Liveness probe: when a store is configured the connection is pinged, so a
/// pool that went away after startup is reported instead of assumed healthy.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.store() {
        Some(store) => match store.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!("Health check ping failed: {e:#}");
                "error"
            }
        },
        None => "fallback",
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API is running".to_string(),
        environment: std::env::var("RAILWAY_ENVIRONMENT").unwrap_or_else(|_| "unknown".to_string()),
        database: database.to_string(),
    })
}

fn database_label(state: &AppState) -> &'static str {
    if state.shared.store.is_some() {
        "connected"
    } else {
        "fallback"
    }
}
