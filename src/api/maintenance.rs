use axum::extract::{Query, State};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::resolve::{self, SourcedJson};
use crate::api::types::MaintenanceEventDto;
use crate::fallback::FallbackDataset;

/// Number of synthesized events served per calendar request in fallback mode.
const SYNTHETIC_EVENT_COUNT: usize = 5;

const EVENT_KINDS: [&str; 3] = ["preventive", "corrective", "inspection"];
const EVENT_STATUSES: [&str; 3] = ["scheduled", "in_progress", "completed"];
const EVENT_TITLES: [&str; 3] = [
    "Preventive maintenance",
    "Corrective maintenance",
    "Inspection",
];

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/v1/maintenance/calendar
///
/// Store path runs a real range query over persisted events. Fallback path
/// synthesizes a fixed number of pseudo-random events inside the range.
/// Malformed dates are a 400, never a silent empty list.
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<SourcedJson<Vec<MaintenanceEventDto>>, ApiError> {
    let start = parse_date(&query.start_date, "start_date")?;
    let end = parse_date(&query.end_date, "end_date")?;

    if end < start {
        return Err(ApiError::validation("end_date must not precede start_date"));
    }

    let outcome = match state.store() {
        Some(store) => Some(
            store
                // Bounds are normalized to UTC so the stored-string comparison
                // is chronological.
                .list_maintenance_between(&start.to_rfc3339(), &end.to_rfc3339())
                .await
                .map(|rows| {
                    rows.into_iter()
                        .map(MaintenanceEventDto::from)
                        .collect::<Vec<_>>()
                }),
        ),
        None => None,
    };

    let resolved = resolve::degrade_read(
        state.fallback_enabled(),
        "maintenance_calendar",
        outcome,
        || synthesize_events(state.fallback(), start, end),
    )?;

    Ok(SourcedJson(resolved))
}

fn parse_date(raw: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApiError::validation(format!("{field} must be an RFC 3339 timestamp")))
}

/// Placeholder events for degraded mode: starts land on random days inside
/// the range, events last two hours (clamped to the range end), and equipment
/// names come from the fallback dataset so the substitute data stays
/// self-consistent.
fn synthesize_events(
    dataset: &FallbackDataset,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<MaintenanceEventDto> {
    let mut rng = rand::rng();
    let span_days = (end - start).num_days().max(1);

    (0..SYNTHETIC_EVENT_COUNT)
        .map(|i| {
            let offset = rng.random_range(0..span_days);
            let event_start = start + Duration::days(offset);
            let event_end = (event_start + Duration::hours(2)).min(end);
            let equipment = &dataset.equipment[i % dataset.equipment.len()];

            MaintenanceEventDto {
                id: i32::try_from(i).unwrap_or(i32::MAX) + 1,
                title: EVENT_TITLES[i % 3].to_string(),
                start: event_start.to_rfc3339(),
                end: event_end.to_rfc3339(),
                equipment_id: Some(equipment.id),
                equipment_name: Some(equipment.name.to_string()),
                kind: EVENT_KINDS[i % 3].to_string(),
                status: EVENT_STATUSES[i % 3].to_string(),
                technician: Some(format!("Technician {}", rng.random_range(1..=3))),
                description: Some(format!("Maintenance work order {}", i + 1)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_events_stay_in_range() {
        let dataset = FallbackDataset::seeded();
        let start = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339("2025-01-07T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let events = synthesize_events(&dataset, start, end);
        assert_eq!(events.len(), SYNTHETIC_EVENT_COUNT);

        for event in &events {
            let event_start = DateTime::parse_from_rfc3339(&event.start).unwrap();
            let event_end = DateTime::parse_from_rfc3339(&event.end).unwrap();
            assert!(event_start >= start);
            assert!(event_end <= end);
            assert_eq!(event_end - event_start, Duration::hours(2));
        }
    }

    #[test]
    fn test_synthesized_events_fit_a_short_range() {
        let dataset = FallbackDataset::seeded();
        let start = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let end = start + Duration::hours(1);

        for event in synthesize_events(&dataset, start, end) {
            let event_start = DateTime::parse_from_rfc3339(&event.start).unwrap();
            let event_end = DateTime::parse_from_rfc3339(&event.end).unwrap();
            assert!(event_start >= start);
            assert!(event_end <= end);
        }
    }

    #[test]
    fn test_synthesized_events_cycle_kind_and_status() {
        let dataset = FallbackDataset::seeded();
        let start = Utc::now();
        let end = start + Duration::days(7);

        let events = synthesize_events(&dataset, start, end);
        assert_eq!(events[0].kind, "preventive");
        assert_eq!(events[1].kind, "corrective");
        assert_eq!(events[2].kind, "inspection");
        assert_eq!(events[3].kind, "preventive");
        assert_eq!(events[0].status, "scheduled");
        assert_eq!(events[4].status, "in_progress");
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        assert!(parse_date("2025-01-01T00:00:00Z", "start_date").is_ok());
        assert!(parse_date("2025-01-01", "start_date").is_err());
        assert!(parse_date("not-a-date", "start_date").is_err());
    }
}
