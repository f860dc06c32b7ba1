use axum::extract::State;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::resolve::{self, SourcedJson};
use crate::api::types::SiteResponse;

/// GET /api/sites
pub async fn list_sites(
    State(state): State<Arc<AppState>>,
) -> Result<SourcedJson<Vec<SiteResponse>>, ApiError> {
    let outcome = match state.store() {
        Some(store) => Some(
            store
                .list_sites()
                .await
                .map(|rows| rows.into_iter().map(SiteResponse::from).collect::<Vec<_>>()),
        ),
        None => None,
    };

    let resolved = resolve::degrade_read(state.fallback_enabled(), "sites_list", outcome, || {
        state
            .fallback()
            .sites
            .iter()
            .map(SiteResponse::from)
            .collect()
    })?;

    Ok(SourcedJson(resolved))
}
