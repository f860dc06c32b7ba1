//! Store-backed integration tests against an in-memory SQLite database.
//! Fallback mode is off, so every response must come from the live store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use maintarr::api::AppState;
use maintarr::config::Config;
use maintarr::db::NewMaintenanceEvent;
use tower::ServiceExt;

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A pooled :memory: connection gets its own database, so keep one.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.fallback.enabled = false;

    let state = maintarr::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    (maintarr::api::router(state.clone()), state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_login_issues_signed_token_and_me_round_trips() {
    let (app, _state) = spawn_app().await;

    let payload = serde_json::json!({"username": "admin", "password": "admin123"});
    let response = app
        .clone()
        .oneshot(post_json("/api/auth/login-json", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    assert!(!token.starts_with("token_"));
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["username"], "admin");
    assert_eq!(json["user"]["first_name"], "Admin");
    assert_eq!(json["user"]["last_name"], "User");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "admin");
    assert_eq!(json["role"], "admin");
    assert!(json["is_active"].as_bool().unwrap());
}

#[tokio::test]
async fn test_health_pings_the_store() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (app, _state) = spawn_app().await;

    let payload = serde_json::json!({"username": "tech1", "password": "wrong"});
    let response = app
        .oneshot(post_json("/api/auth/login-json", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_legacy_token_rejected_when_fallback_off() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("Authorization", "Bearer token_admin_1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_equipment_create_persists() {
    let (app, _state) = spawn_app().await;

    let payload = serde_json::json!({
        "name": "Presse hydraulique",
        "status": "active",
        "location": "Atelier D"
    });

    let response = app
        .clone()
        .oneshot(post_json("/api/equipment", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-data-source").unwrap(), "live");
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_ne!(id, 999);
    assert_eq!(created["name"], "Presse hydraulique");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/equipment")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-data-source").unwrap(), "live");
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id);
}

#[tokio::test]
async fn test_dashboard_counts_reflect_rows() {
    let (app, _state) = spawn_app().await;

    for (name, status) in [
        ("Compresseur A1", "active"),
        ("Robot de soudure", "active"),
        ("Convoyeur B2", "maintenance"),
    ] {
        let payload = serde_json::json!({"name": name, "status": status});
        let response = app
            .clone()
            .oneshot(post_json("/api/equipment", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_equipment"], 3);
    assert_eq!(json["active_equipment"], 2);
    assert_eq!(json["maintenance_equipment"], 1);
    assert_eq!(json["out_of_service_equipment"], 0);
    assert_eq!(json["pending_maintenances"], 0);
    assert_eq!(json["completed_maintenances"], 0);
}

#[tokio::test]
async fn test_calendar_runs_range_query() {
    let (app, state) = spawn_app().await;
    let store = state.store().expect("store must be configured");

    let events = [
        ("Pump overhaul", "2025-03-02T09:00:00+00:00", "scheduled"),
        ("Belt inspection", "2025-03-05T14:00:00+00:00", "completed"),
        ("Out of range check", "2025-04-01T09:00:00+00:00", "scheduled"),
    ];

    for (title, start, status) in events {
        store
            .add_maintenance_event(NewMaintenanceEvent {
                title: title.to_string(),
                start: start.to_string(),
                end: start.replace("09:00", "11:00").replace("14:00", "16:00"),
                equipment_id: Some(1),
                equipment_name: Some("Compresseur A1".to_string()),
                kind: "preventive".to_string(),
                status: status.to_string(),
                technician: Some("tech1".to_string()),
                description: None,
            })
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(
                    "/api/v1/maintenance/calendar\
                     ?start_date=2025-03-01T00:00:00Z&end_date=2025-03-31T00:00:00Z",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-data-source").unwrap(), "live");
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Pump overhaul");
    assert_eq!(items[1]["title"], "Belt inspection");

    // The persisted pending/completed pair shows up on the dashboard too.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["pending_maintenances"], 2);
    assert_eq!(json["completed_maintenances"], 1);
}

#[tokio::test]
async fn test_calendar_keeps_exact_boundary_events() {
    let (app, state) = spawn_app().await;
    let store = state.store().expect("store must be configured");

    // Stored with a Z suffix; the query bound arrives in +00:00 form.
    store
        .add_maintenance_event(NewMaintenanceEvent {
            title: "Boundary overhaul".to_string(),
            start: "2025-03-01T00:00:00Z".to_string(),
            end: "2025-03-01T02:00:00Z".to_string(),
            equipment_id: Some(1),
            equipment_name: Some("Compresseur A1".to_string()),
            kind: "preventive".to_string(),
            status: "scheduled".to_string(),
            technician: Some("tech1".to_string()),
            description: None,
        })
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(
                    "/api/v1/maintenance/calendar\
                     ?start_date=2025-03-01T00:00:00Z&end_date=2025-03-31T00:00:00Z",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Boundary overhaul");
    assert_eq!(items[0]["start"], "2025-03-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_sites_list_is_live_and_empty() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/sites")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-data-source").unwrap(), "live");
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}
