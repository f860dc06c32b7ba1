//! Data resolution policy for read endpoints.
//!
//! A handler asks the store first when one is present. A store failure is
//! downgraded to the static fallback dataset only when the fallback flag is
//! on; the failure is logged and counted, and the response carries an
//! `X-Data-Source: fallback` header so degraded reads stay observable
//! without changing the body contract.

use axum::{
    Json,
    http::{HeaderValue, header::HeaderName},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use super::ApiError;

pub static DATA_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-data-source");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback,
}

impl DataSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug)]
pub struct Resolved<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Resolved<T> {
    pub const fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    pub const fn fallback(data: T) -> Self {
        Self {
            data,
            source: DataSource::Fallback,
        }
    }
}

/// Apply the read-side policy to a store outcome.
///
/// `outcome` is `None` when no store is configured, `Some(Err(..))` when the
/// store path failed. Both degrade to `make_fallback()` when fallback mode is
/// on; a failure with fallback off surfaces as a 500.
pub fn degrade_read<T>(
    fallback_enabled: bool,
    endpoint: &'static str,
    outcome: Option<anyhow::Result<T>>,
    make_fallback: impl FnOnce() -> T,
) -> Result<Resolved<T>, ApiError> {
    match outcome {
        Some(Ok(data)) => Ok(Resolved::live(data)),
        Some(Err(e)) => {
            if !fallback_enabled {
                return Err(ApiError::StoreUnavailable(format!("{e:#}")));
            }
            warn!(endpoint, "Store read failed, serving fallback data: {e:#}");
            metrics::counter!("fallback_responses_total", "endpoint" => endpoint).increment(1);
            Ok(Resolved::fallback(make_fallback()))
        }
        None => {
            if !fallback_enabled {
                // Startup validation prevents this combination.
                return Err(ApiError::StoreUnavailable("no store configured".to_string()));
            }
            metrics::counter!("fallback_responses_total", "endpoint" => endpoint).increment(1);
            Ok(Resolved::fallback(make_fallback()))
        }
    }
}

/// JSON responder that stamps the resolved data source onto the response.
pub struct SourcedJson<T>(pub Resolved<T>);

impl<T: Serialize> IntoResponse for SourcedJson<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0.data).into_response();
        response.headers_mut().insert(
            DATA_SOURCE_HEADER.clone(),
            HeaderValue::from_static(self.0.source.as_str()),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_result_passes_through() {
        let resolved = degrade_read(true, "test", Some(Ok(1)), || 2).unwrap();
        assert_eq!(resolved.data, 1);
        assert_eq!(resolved.source, DataSource::Live);
    }

    #[test]
    fn test_store_error_degrades_when_enabled() {
        let outcome: Option<anyhow::Result<i32>> = Some(Err(anyhow::anyhow!("boom")));
        let resolved = degrade_read(true, "test", outcome, || 2).unwrap();
        assert_eq!(resolved.data, 2);
        assert_eq!(resolved.source, DataSource::Fallback);
    }

    #[test]
    fn test_store_error_surfaces_when_disabled() {
        let outcome: Option<anyhow::Result<i32>> = Some(Err(anyhow::anyhow!("boom")));
        assert!(degrade_read(false, "test", outcome, || 2).is_err());
    }

    #[test]
    fn test_missing_store_serves_fallback() {
        let resolved = degrade_read(true, "test", None::<anyhow::Result<i32>>, || 2).unwrap();
        assert_eq!(resolved.data, 2);
        assert_eq!(resolved.source, DataSource::Fallback);
    }
}
